//! Bearing arithmetic
//!
//! Wind bearings follow the meteorological convention (the direction the wind
//! is coming from); segment bearings are directions of travel. Everything that
//! compares the two goes through [`angle_diff`].

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Minimal separation (0-180°) between a segment's travel direction and the
/// direction the wind is blowing towards.
pub fn angle_diff(segment_bearing: f64, wind_bearing: f64) -> f64 {
    let to_bearing = (wind_bearing + 180.0).rem_euclid(360.0);
    let raw = (segment_bearing - to_bearing).abs();
    raw.min(360.0 - raw)
}

/// Nearest of the 16 compass labels for a bearing in degrees
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let index = (degrees / 22.5 + 0.5).floor().rem_euclid(16.0) as usize;
    CARDINALS[index]
}
