//! Deck constants
//!
//! Shared defaults for gesture classification, deck pacing and the platform
//! API. Runtime overrides go through [`super::config::DeckConfig`]; tuning of
//! the defaults should happen here.

/// Pointer gesture thresholds for the front-most card.
pub mod gesture {
    /// Hold duration (ms) before a stationary press becomes a long-press.
    pub const LONG_PRESS_MS: u64 = 500;
    /// Horizontal offset (px) a release must exceed to commit a swipe.
    pub const SWIPE_OFFSET_PX: f32 = 100.0;
    /// Horizontal velocity (px/s) a release must exceed to commit a swipe.
    pub const SWIPE_VELOCITY_PX_S: f32 = 800.0;
}

/// Drag feedback curves handed to the presentation layer.
pub mod feedback {
    /// Offset (px) at which rotation saturates.
    pub const ROTATION_RANGE_PX: f32 = 200.0;
    /// Maximum card tilt in degrees.
    pub const MAX_ROTATION_DEG: f32 = 15.0;
    /// Opacity keyframes: offsets (px) and the opacity at each.
    pub const OPACITY_STOPS_PX: [f32; 5] = [-200.0, -150.0, 0.0, 150.0, 200.0];
    pub const OPACITY_VALUES: [f32; 5] = [0.0, 1.0, 1.0, 1.0, 0.0];
    /// The commit-right affordance fades in between these offsets (px).
    pub const COMMIT_RIGHT_FADE_START_PX: f32 = 20.0;
    pub const COMMIT_RIGHT_FADE_END_PX: f32 = 100.0;
}

/// Deck pacing.
pub mod deck {
    /// Delay (ms) between a swipe commit and the index advance, leaving
    /// room for the exit animation.
    pub const ADVANCE_DELAY_MS: u64 = 400;
}

/// Platform API defaults.
pub mod api {
    pub const BASE_URL: &str = "https://api.vercel.com";
    /// Suffix of the default per-project subdomain.
    pub const FALLBACK_DOMAIN_SUFFIX: &str = "vercel.app";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Upper bound for a single project's domain lookup.
    pub const DOMAIN_LOOKUP_TIMEOUT_MS: u64 = 10_000;
    pub const PROJECTS_PATH: &str = "/v9/projects";
}
