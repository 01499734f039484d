//! Accent colors used to theme a card and the backdrop behind the deck.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Theming color attached to a project.
///
/// Derived projects carry an HSL value; projects whose resolution degraded
/// (and the empty backdrop) carry a fixed solid color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AccentColor {
    Hsl {
        /// Hue in degrees (0-359)
        hue: u16,
        /// Saturation as percentage (0-100)
        saturation: u8,
        /// Lightness as percentage (0-100)
        lightness: u8,
    },
    Solid(Rgb),
}

impl AccentColor {
    /// Mid-gray substituted for projects whose domain lookup failed.
    pub const NEUTRAL: AccentColor = AccentColor::Solid(Rgb::gray(0x44));

    /// Backdrop shown when no card is on screen.
    pub const BACKDROP: AccentColor = AccentColor::Solid(Rgb::gray(0x33));

    pub fn hsl(hue: u16, saturation: u8, lightness: u8) -> Self {
        AccentColor::Hsl {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// Convert to sRGB for renderers that cannot take HSL directly.
    pub fn to_rgb(&self) -> Rgb {
        match *self {
            AccentColor::Solid(rgb) => rgb,
            AccentColor::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(
                hue as f32,
                saturation as f32 / 100.0,
                lightness as f32 / 100.0,
            ),
        }
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccentColor::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
            AccentColor::Solid(rgb) => rgb.fmt(f),
        }
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r1), channel(g1), channel(b1))
}
