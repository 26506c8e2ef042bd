//! Favorability scoring
//!
//! This module turns one wind reading into scores relative to a segment:
//! - Directional alignment with cosine decay inside the tolerance
//! - Wind speed normalized against a saturation cap
//! - A weighted blend of the two

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::angle::angle_diff;

/// Default share of the overall score given to directional alignment
pub const DEFAULT_DIRECTION_WEIGHT: f64 = 0.3;

/// Default share of the overall score given to normalized wind speed
pub const DEFAULT_SPEED_WEIGHT: f64 = 0.7;

/// Relative weighting of alignment and speed in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub direction: f64,
    pub speed: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            direction: DEFAULT_DIRECTION_WEIGHT,
            speed: DEFAULT_SPEED_WEIGHT,
        }
    }
}

/// Alignment between the wind's travel direction and the segment (0-1).
///
/// Returns 1.0 for a perfect tailwind, decays along a quarter cosine to 0.0 at
/// `tolerance`, and is exactly 0.0 beyond it. `tolerance` must be positive.
pub fn wind_alignment_score(segment_bearing: f64, wind_bearing: f64, tolerance: f64) -> f64 {
    let diff = angle_diff(segment_bearing, wind_bearing);
    if diff >= tolerance {
        return 0.0;
    }
    ((diff / tolerance) * FRAC_PI_2).cos()
}

/// Wind speed relative to `cap`, saturating at 1.0
pub fn speed_norm(speed: f64, cap: f64) -> f64 {
    (speed / cap).min(1.0)
}

/// Weighted blend of alignment and normalized speed (0-1).
///
/// Weights are relative: they are divided by their sum, so any non-negative
/// pair with a positive sum keeps the result within `[0, 1]`.
pub fn overall_favorability(alignment: f64, speed_norm: f64, weights: Weights) -> f64 {
    let total = weights.direction + weights.speed;
    if total <= 0.0 {
        return 0.0;
    }
    (weights.direction * alignment + weights.speed * speed_norm) / total
}
