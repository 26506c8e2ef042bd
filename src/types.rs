//! Core types for segment-wind
//!
//! These are the records that flow between the input adapters, the
//! favorability engine, and the reporter: forecast observations, segments,
//! and the scored opportunities the engine produces.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::angle;
use crate::error::WindError;

/// One forecast time step at the configured location.
///
/// All timestamps carry the local offset of the configured timezone, so
/// `timestamp.date_naive()` and `timestamp.time()` are local wall-clock values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Start of the forecast period
    pub timestamp: DateTime<FixedOffset>,
    /// Sustained wind speed (mph)
    pub wind_speed: f64,
    /// Direction the wind is coming from (degrees, meteorological)
    pub wind_bearing: f64,
    /// Gust speed (mph), when the provider reports one
    pub wind_gust: Option<f64>,
    /// Sunrise on the observation's own calendar date
    pub sunrise: DateTime<FixedOffset>,
    /// Sunset on the observation's own calendar date
    pub sunset: DateTime<FixedOffset>,
    /// Air temperature (°F)
    pub temperature: f64,
    /// Display glyph for the weather condition
    pub icon: String,
}

impl Observation {
    /// Local calendar date of this observation
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Cardinal label for the wind's origin (e.g. "WSW")
    pub fn wind_cardinal(&self) -> &'static str {
        angle::degrees_to_cardinal(self.wind_bearing)
    }
}

/// Sunrise and sunset for a single local date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

/// The 16 points of the compass rose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::Nne,
        CompassPoint::Ne,
        CompassPoint::Ene,
        CompassPoint::E,
        CompassPoint::Ese,
        CompassPoint::Se,
        CompassPoint::Sse,
        CompassPoint::S,
        CompassPoint::Ssw,
        CompassPoint::Sw,
        CompassPoint::Wsw,
        CompassPoint::W,
        CompassPoint::Wnw,
        CompassPoint::Nw,
        CompassPoint::Nnw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }

    /// Bearing in degrees, 22.5° per point clockwise from north
    pub fn degrees(&self) -> f64 {
        let index = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        index as f64 * 22.5
    }

    /// Parse a compass label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Result<Self, WindError> {
        let wanted = label.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| WindError::UnknownDirection(label.to_string()))
    }
}

/// A named route with record and personal-best attempt times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    /// Length with unit, e.g. "1.2 km"
    pub distance: String,
    pub climb: String,
    /// Compass label for the direction of travel
    pub direction: String,
    pub record_holder: String,
    /// "M:SS" or "MM:SS", optionally suffixed with a unit
    pub record_time: String,
    pub record_speed: String,
    pub personal_rank: String,
    pub personal_best_time: String,
    pub personal_speed: String,
}

impl Segment {
    /// Travel bearing in degrees; unmapped labels fall back to 0°
    pub fn bearing_degrees(&self) -> f64 {
        CompassPoint::parse(&self.direction)
            .map(|p| p.degrees())
            .unwrap_or(0.0)
    }

    /// Whether the rider already holds the record on this segment
    pub fn is_held(&self) -> bool {
        self.personal_rank.trim() == "1"
    }
}

/// A qualifying observation together with its overall favorability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Overall favorability (0-1)
    pub score: f64,
    pub observation: Observation,
}

impl Opportunity {
    /// Score rounded to the nearest whole percent (half away from zero)
    pub fn percent(&self) -> u32 {
        score_percent(self.score)
    }
}

/// Round a 0-1 score to a whole percentage, half away from zero
pub fn score_percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}
