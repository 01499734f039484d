//! Deterministic accent colors
//!
//! A project's accent is a pure function of its name: the sum of the name's
//! UTF-16 code units picks the hue, saturation and lightness are fixed.

use swipedeck_model::AccentColor;

pub const ACCENT_SATURATION: u8 = 70;
pub const ACCENT_LIGHTNESS: u8 = 50;

/// Sum of UTF-16 code units.
pub fn name_hash(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

pub fn derive_accent(name: &str) -> AccentColor {
    let hue = (name_hash(name) % 360) as u16;
    AccentColor::hsl(hue, ACCENT_SATURATION, ACCENT_LIGHTNESS)
}
