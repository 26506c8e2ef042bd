//! Pipeline orchestration
//!
//! Runs every segment once through the favorability engine against the same
//! forecast and pairs the result with the segment's attempt comparison.

use log::{debug, warn};
use serde::Serialize;

use crate::adapters::{ObservationSource, SegmentSource};
use crate::attempt::AttemptComparison;
use crate::config::Settings;
use crate::engine::find_favorable_conditions;
use crate::error::WindError;
use crate::types::{Observation, Opportunity, Segment};

/// Everything the reporter needs about one segment
#[derive(Debug, Clone, Serialize)]
pub struct SegmentReport {
    pub segment: Segment,
    pub bearing: f64,
    pub comparison: AttemptComparison,
    pub opportunities: Vec<Opportunity>,
}

/// Evaluate one segment against the forecast.
///
/// Returns `Ok(None)` when nothing qualifies.
pub fn evaluate_segment(
    segment: &Segment,
    observations: &[Observation],
    settings: &Settings,
) -> Result<Option<SegmentReport>, WindError> {
    let bearing = segment.bearing_degrees();
    let opportunities = find_favorable_conditions(bearing, observations, &settings.scoring);
    debug!(
        "{}: {} of {} observations qualify",
        segment.name,
        opportunities.len(),
        observations.len()
    );

    if opportunities.is_empty() {
        return Ok(None);
    }

    let comparison = AttemptComparison::for_segment(segment)?;
    Ok(Some(SegmentReport {
        segment: segment.clone(),
        bearing,
        comparison,
        opportunities,
    }))
}

/// Evaluate every segment not already held by the rider, in input order.
///
/// Segments whose times or distance cannot be parsed are skipped with a
/// warning; invalid settings abort the scan before any segment is scored.
pub fn scan(
    segments: &[Segment],
    observations: &[Observation],
    settings: &Settings,
) -> Result<Vec<SegmentReport>, WindError> {
    settings.validate()?;

    let mut reports = Vec::new();
    for segment in segments.iter().filter(|s| !s.is_held()) {
        match evaluate_segment(segment, observations, settings) {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(e) => warn!("Skipping segment {}: {}", segment.name, e),
        }
    }

    Ok(reports)
}

/// Load both inputs from their sources and scan
pub fn scan_sources(
    segment_source: &dyn SegmentSource,
    observation_source: &dyn ObservationSource,
    settings: &Settings,
) -> Result<Vec<SegmentReport>, WindError> {
    settings.validate()?;
    let observations = observation_source.observations()?;
    let segments = segment_source.segments()?;
    scan(&segments, &observations, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 3, hour, 0, 0)
            .unwrap()
    }

    fn forecast() -> Vec<Observation> {
        // Wind from the east at 18 mph: a tailwind for westbound segments
        vec![Observation {
            timestamp: at(12),
            wind_speed: 18.0,
            wind_bearing: 90.0,
            wind_gust: None,
            sunrise: at(6),
            sunset: at(21),
            temperature: 72.0,
            icon: String::new(),
        }]
    }

    fn segment(name: &str, direction: &str, rank: &str, record_time: &str) -> Segment {
        Segment {
            name: name.to_string(),
            distance: "2 km".to_string(),
            climb: "0 m".to_string(),
            direction: direction.to_string(),
            record_holder: "R. Holder".to_string(),
            record_time: record_time.to_string(),
            record_speed: String::new(),
            personal_rank: rank.to_string(),
            personal_best_time: "3:30".to_string(),
            personal_speed: String::new(),
        }
    }

    #[test]
    fn test_scan_filters_and_keeps_order() {
        let segments = vec![
            segment("West A", "W", "5", "3:00"),
            segment("East", "E", "5", "3:00"),
            segment("West held", "W", "1", "3:00"),
            segment("West B", "w", "2", "3:10"),
        ];

        let reports = scan(&segments, &forecast(), &Settings::default()).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.segment.name.as_str()).collect();

        assert_eq!(names, vec!["West A", "West B"]);
        assert_eq!(reports[0].bearing, 270.0);
        assert_eq!(reports[0].opportunities.len(), 1);
        assert_eq!(reports[0].comparison.time_deficit, "0:30");
    }

    #[test]
    fn test_bad_segment_times_are_skipped() {
        let segments = vec![
            segment("Broken", "W", "5", "n/a"),
            segment("Fine", "W", "5", "3:00"),
        ];
        let reports = scan(&segments, &forecast(), &Settings::default()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].segment.name, "Fine");
    }

    #[test]
    fn test_invalid_settings_abort() {
        let mut settings = Settings::default();
        settings.scoring.direction_tolerance = 0.0;
        let segments = vec![segment("West A", "W", "5", "3:00")];
        assert!(matches!(
            scan(&segments, &forecast(), &settings),
            Err(WindError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_scan_sources() {
        struct Fixed(Vec<Segment>);
        impl SegmentSource for Fixed {
            fn segments(&self) -> Result<Vec<Segment>, WindError> {
                Ok(self.0.clone())
            }
        }

        let segments = Fixed(vec![segment("West A", "W", "5", "3:00")]);
        let reports = scan_sources(&segments, &forecast(), &Settings::default()).unwrap();
        assert_eq!(reports.len(), 1);
    }
}
