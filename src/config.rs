//! Run configuration
//!
//! [`Settings`] is built once per run (by the CLI from arguments and the
//! environment) and passed explicitly to everything that needs it.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::WindError;
use crate::scoring::Weights;

/// Default minimum wind speed worth considering (mph)
pub const DEFAULT_MIN_WIND_SPEED: f64 = 12.0;
/// Default maximum offset from a perfect tailwind (degrees)
pub const DEFAULT_DIRECTION_TOLERANCE: f64 = 15.0;
/// Default minimum overall favorability to report (percent)
pub const DEFAULT_QUALITY_PERCENTAGE: u32 = 60;
/// Default wind speed at which the speed score saturates (mph)
pub const DEFAULT_TOP_WIND_SPEED: f64 = 20.0;
/// Charlotte, MI
pub const DEFAULT_LATITUDE: f64 = 42.5702;
pub const DEFAULT_LONGITUDE: f64 = -84.8352;
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Thresholds and weights consumed by the favorability engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub min_wind_speed: f64,
    pub direction_tolerance: f64,
    pub quality_percentage: u32,
    pub top_wind_speed: f64,
    pub weights: Weights,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            min_wind_speed: DEFAULT_MIN_WIND_SPEED,
            direction_tolerance: DEFAULT_DIRECTION_TOLERANCE,
            quality_percentage: DEFAULT_QUALITY_PERCENTAGE,
            top_wind_speed: DEFAULT_TOP_WIND_SPEED,
            weights: Weights::default(),
        }
    }
}

impl ScoringParams {
    /// Reject values the engine cannot score with
    pub fn validate(&self) -> Result<(), WindError> {
        if !(self.direction_tolerance.is_finite() && self.direction_tolerance > 0.0) {
            return Err(WindError::InvalidConfig(format!(
                "direction tolerance must be positive, got {}",
                self.direction_tolerance
            )));
        }
        if !(self.top_wind_speed.is_finite() && self.top_wind_speed > 0.0) {
            return Err(WindError::InvalidConfig(format!(
                "top wind speed must be positive, got {}",
                self.top_wind_speed
            )));
        }
        if !(self.min_wind_speed.is_finite() && self.min_wind_speed >= 0.0) {
            return Err(WindError::InvalidConfig(format!(
                "minimum wind speed must be non-negative, got {}",
                self.min_wind_speed
            )));
        }
        if self.quality_percentage > 100 {
            return Err(WindError::InvalidConfig(format!(
                "quality percentage must be within 0-100, got {}",
                self.quality_percentage
            )));
        }
        let Weights { direction, speed } = self.weights;
        if !(direction.is_finite() && speed.is_finite()) || direction < 0.0 || speed < 0.0 {
            return Err(WindError::InvalidConfig(format!(
                "weights must be non-negative, got direction={} speed={}",
                direction, speed
            )));
        }
        if direction + speed == 0.0 {
            return Err(WindError::InvalidConfig(
                "direction and speed weights cannot both be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Location of the forecast point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name, e.g. "America/New_York"
    pub timezone: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Location {
    /// Resolve the configured timezone
    pub fn tz(&self) -> Result<Tz, WindError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| WindError::InvalidTimezone(self.timezone.clone()))
    }
}

/// Complete configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub scoring: ScoringParams,
    pub location: Location,
}

impl Settings {
    pub fn validate(&self) -> Result<(), WindError> {
        self.scoring.validate()?;
        if !(-90.0..=90.0).contains(&self.location.latitude)
            || !(-180.0..=180.0).contains(&self.location.longitude)
        {
            return Err(WindError::InvalidConfig(format!(
                "coordinates out of range: {}, {}",
                self.location.latitude, self.location.longitude
            )));
        }
        self.location.tz()?;
        Ok(())
    }
}
