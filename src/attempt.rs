//! Personal-best vs record comparison
//!
//! Converts segment times and distances into average speeds and the gap a
//! rider has to close to take the record.

use serde::Serialize;

use crate::error::WindError;
use crate::types::Segment;

/// Miles per kilometre
pub const KM_TO_MILES: f64 = 0.621371;

/// Parse "M:SS" / "MM:SS" with an optional trailing unit ("1:45 min") into seconds
pub fn parse_time_to_seconds(time: &str) -> Result<f64, WindError> {
    let trimmed = time.trim();
    let numeric_end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == ':' || c == '.'))
        .unwrap_or(trimmed.len());
    let clean = &trimmed[..numeric_end];

    let (minutes, seconds) = clean
        .split_once(':')
        .ok_or_else(|| WindError::TimeParse(time.to_string()))?;
    let minutes: f64 = minutes
        .parse()
        .map_err(|_| WindError::TimeParse(time.to_string()))?;
    let seconds: f64 = seconds
        .parse()
        .map_err(|_| WindError::TimeParse(time.to_string()))?;

    Ok(minutes * 60.0 + seconds)
}

/// Parse "<number> <unit>" into miles. Units: km (default), m, mi.
pub fn parse_distance_miles(distance: &str) -> Result<f64, WindError> {
    let mut parts = distance.split_whitespace();
    let value: f64 = parts
        .next()
        .and_then(|v| v.replace(',', "").parse().ok())
        .filter(|v: &f64| v.is_finite() && *v > 0.0)
        .ok_or_else(|| WindError::DistanceParse(distance.to_string()))?;

    let unit = parts.next().unwrap_or("km").to_ascii_lowercase();
    match unit.as_str() {
        "km" => Ok(value * KM_TO_MILES),
        "m" => Ok(value / 1000.0 * KM_TO_MILES),
        "mi" | "mile" | "miles" => Ok(value),
        _ => Err(WindError::DistanceParse(distance.to_string())),
    }
}

/// Format whole seconds as signed "M:SS"
pub fn format_signed_mss(seconds: f64) -> String {
    let total = seconds.round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!("{}{}:{:02}", sign, total / 60, total % 60)
}

/// How far a personal best is from the segment record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptComparison {
    /// Personal-best average speed (mph)
    pub personal_speed: f64,
    /// Record average speed (mph)
    pub record_speed: f64,
    /// Extra speed needed to match the record (mph)
    pub speed_deficit: f64,
    /// Personal time minus record time (seconds)
    pub time_deficit_seconds: f64,
    /// `time_deficit_seconds` as signed "M:SS"
    pub time_deficit: String,
}

impl AttemptComparison {
    pub fn for_segment(segment: &Segment) -> Result<Self, WindError> {
        let miles = parse_distance_miles(&segment.distance)?;
        let record_seconds = parse_time_to_seconds(&segment.record_time)?;
        let personal_seconds = parse_time_to_seconds(&segment.personal_best_time)?;

        if record_seconds <= 0.0 || personal_seconds <= 0.0 {
            return Err(WindError::TimeParse(format!(
                "{} / {}",
                segment.record_time, segment.personal_best_time
            )));
        }

        let record_speed = miles / (record_seconds / 3600.0);
        let personal_speed = miles / (personal_seconds / 3600.0);
        let time_deficit_seconds = personal_seconds - record_seconds;

        Ok(Self {
            personal_speed,
            record_speed,
            speed_deficit: record_speed - personal_speed,
            time_deficit_seconds,
            time_deficit: format_signed_mss(time_deficit_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(distance: &str, record: &str, personal: &str) -> Segment {
        Segment {
            name: "Lake Loop".to_string(),
            distance: distance.to_string(),
            climb: "0 m".to_string(),
            direction: "W".to_string(),
            record_holder: "K. Om".to_string(),
            record_time: record.to_string(),
            record_speed: String::new(),
            personal_rank: "3".to_string(),
            personal_best_time: personal.to_string(),
            personal_speed: String::new(),
        }
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time_to_seconds("1:45").unwrap(), 105.0);
        assert_eq!(parse_time_to_seconds("12:03").unwrap(), 723.0);
        assert_eq!(parse_time_to_seconds(" 2:01 min").unwrap(), 121.0);
        assert_eq!(parse_time_to_seconds("0:59s").unwrap(), 59.0);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(matches!(
            parse_time_to_seconds("fast"),
            Err(WindError::TimeParse(_))
        ));
        assert!(parse_time_to_seconds("").is_err());
        assert!(parse_time_to_seconds("145").is_err());
        assert!(parse_time_to_seconds("1:2:3").is_err());
    }

    #[test]
    fn test_parse_distance() {
        assert!((parse_distance_miles("10 km").unwrap() - 6.21371).abs() < 1e-9);
        assert!((parse_distance_miles("800 m").unwrap() - 0.4970968).abs() < 1e-9);
        assert_eq!(parse_distance_miles("2.5 mi").unwrap(), 2.5);
        assert!(matches!(
            parse_distance_miles("far"),
            Err(WindError::DistanceParse(_))
        ));
        assert!(parse_distance_miles("3 leagues").is_err());
    }

    #[test]
    fn test_format_signed_mss() {
        assert_eq!(format_signed_mss(120.0), "2:00");
        assert_eq!(format_signed_mss(65.0), "1:05");
        assert_eq!(format_signed_mss(-90.0), "-1:30");
        assert_eq!(format_signed_mss(-5.0), "-0:05");
        assert_eq!(format_signed_mss(0.0), "0:00");
    }

    #[test]
    fn test_ten_km_comparison() {
        let cmp = AttemptComparison::for_segment(&segment("10 km", "20:00", "22:00")).unwrap();

        assert!((cmp.record_speed - 18.64113).abs() < 0.001);
        assert!((cmp.personal_speed - 16.94648).abs() < 0.001);
        assert!((cmp.speed_deficit - 1.69465).abs() < 0.001);
        assert_eq!(cmp.time_deficit_seconds, 120.0);
        assert_eq!(cmp.time_deficit, "2:00");
    }

    #[test]
    fn test_personal_faster_than_record() {
        let cmp = AttemptComparison::for_segment(&segment("1 km", "2:00", "1:50")).unwrap();
        assert_eq!(cmp.time_deficit, "-0:10");
        assert!(cmp.speed_deficit < 0.0);
    }

    #[test]
    fn test_malformed_input_propagates() {
        assert!(AttemptComparison::for_segment(&segment("10 km", "n/a", "22:00")).is_err());
        assert!(AttemptComparison::for_segment(&segment("", "20:00", "22:00")).is_err());
        assert!(AttemptComparison::for_segment(&segment("1 km", "0:00", "1:00")).is_err());
    }
}
