//! Drag feedback curves
//!
//! Continuous visual hints derived from the horizontal drag offset. The
//! state machine only tracks offset and velocity; these helpers turn them
//! into the values a renderer animates.

use crate::infra::constants::feedback as cfg;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    pub offset_x: f32,
    pub velocity_x: f32,
    /// Card tilt in degrees, positive clockwise
    pub rotation_deg: f32,
    pub opacity: f32,
    /// Visibility of the "visit" affordance (0..=1)
    pub commit_right_opacity: f32,
}

impl DragFeedback {
    pub fn at(offset_x: f32, velocity_x: f32) -> Self {
        Self {
            offset_x,
            velocity_x,
            rotation_deg: rotation_for(offset_x),
            opacity: opacity_for(offset_x),
            commit_right_opacity: commit_right_opacity_for(offset_x),
        }
    }

    /// Neutral pose: centered, upright, fully visible.
    pub fn neutral() -> Self {
        Self::at(0.0, 0.0)
    }
}

pub fn rotation_for(offset_x: f32) -> f32 {
    interpolate(
        offset_x,
        &[-cfg::ROTATION_RANGE_PX, cfg::ROTATION_RANGE_PX],
        &[-cfg::MAX_ROTATION_DEG, cfg::MAX_ROTATION_DEG],
    )
}

pub fn opacity_for(offset_x: f32) -> f32 {
    interpolate(offset_x, &cfg::OPACITY_STOPS_PX, &cfg::OPACITY_VALUES)
}

pub fn commit_right_opacity_for(offset_x: f32) -> f32 {
    interpolate(
        offset_x,
        &[cfg::COMMIT_RIGHT_FADE_START_PX, cfg::COMMIT_RIGHT_FADE_END_PX],
        &[0.0, 1.0],
    )
}

/// Piecewise-linear map through `(stops[i], values[i])`, clamped at both
/// ends. `stops` must be ascending and the same length as `values`.
fn interpolate(x: f32, stops: &[f32], values: &[f32]) -> f32 {
    debug_assert_eq!(stops.len(), values.len());
    let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    if x.is_nan() || x <= first {
        return values[0];
    }
    if x >= last {
        return values[values.len() - 1];
    }
    for i in 1..stops.len() {
        if x <= stops[i] {
            let span = stops[i] - stops[i - 1];
            let t = if span > 0.0 { (x - stops[i - 1]) / span } else { 1.0 };
            return values[i - 1] + (values[i] - values[i - 1]) * t;
        }
    }
    values[values.len() - 1]
}
