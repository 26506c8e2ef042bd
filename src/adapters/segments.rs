//! Segment list adapter
//!
//! Reads the segment export CSV (one row per segment, with record and
//! personal-best columns) into [`Segment`] records.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::WindError;
use crate::types::Segment;

/// Default location of the segment list
pub const DEFAULT_SEGMENTS_PATH: &str = "kom-list.csv";

/// CSV segment list adapter
pub struct SegmentCsvAdapter;

impl SegmentCsvAdapter {
    /// Parse segments from any CSV reader
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<Segment>, WindError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut segments = Vec::new();
        for row in csv_reader.deserialize::<SegmentRow>() {
            segments.push(row?.into());
        }
        Ok(segments)
    }

    /// Parse segments from a file
    pub fn read_path(&self, path: &Path) -> Result<Vec<Segment>, WindError> {
        let file = std::fs::File::open(path)?;
        self.parse(file)
    }
}

// Segment export columns

#[derive(Debug, Deserialize)]
struct SegmentRow {
    #[serde(rename = "Segment name")]
    segment_name: String,
    #[serde(rename = "Distance")]
    distance: String,
    #[serde(rename = "Climb", default)]
    climb: String,
    #[serde(rename = "Direction")]
    direction: String,
    #[serde(rename = "KOM holder")]
    kom_holder: String,
    #[serde(rename = "KOM Time")]
    kom_time: String,
    #[serde(rename = "Speed", default)]
    speed: String,
    #[serde(rename = "My Rank")]
    my_rank: String,
    #[serde(rename = "My Time")]
    my_time: String,
    #[serde(rename = "My Speed", default)]
    my_speed: String,
}

impl From<SegmentRow> for Segment {
    fn from(row: SegmentRow) -> Self {
        Segment {
            name: row.segment_name,
            distance: row.distance,
            climb: row.climb,
            direction: row.direction,
            record_holder: row.kom_holder,
            record_time: row.kom_time,
            record_speed: row.speed,
            personal_rank: row.my_rank,
            personal_best_time: row.my_time,
            personal_speed: row.my_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Segment name,Distance,Climb,Direction,KOM holder,KOM Time,Speed,My Rank,My Time,My Speed
Airport Sprint,1.6 km,3 m,WSW,Jo Fast,2:05,28.6 mph,7,2:21 min,25.4 mph
Mill Pond Drag,0.8 km,0 m,n,Sam Quick,1:01,29.3 mph,1,1:01,29.3 mph
";

    #[test]
    fn test_parse_segments() {
        let segments = SegmentCsvAdapter.parse(SAMPLE.as_bytes()).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            Segment {
                name: "Airport Sprint".to_string(),
                distance: "1.6 km".to_string(),
                climb: "3 m".to_string(),
                direction: "WSW".to_string(),
                record_holder: "Jo Fast".to_string(),
                record_time: "2:05".to_string(),
                record_speed: "28.6 mph".to_string(),
                personal_rank: "7".to_string(),
                personal_best_time: "2:21 min".to_string(),
                personal_speed: "25.4 mph".to_string(),
            }
        );
        assert_eq!(segments[0].bearing_degrees(), 247.5);
        assert_eq!(segments[1].bearing_degrees(), 0.0);
        assert!(segments[1].is_held());
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Segment name,Distance\nAirport Sprint,1.6 km\n";
        assert!(matches!(
            SegmentCsvAdapter.parse(csv.as_bytes()),
            Err(WindError::CsvError(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let result = SegmentCsvAdapter.read_path(Path::new("/nonexistent/kom-list.csv"));
        assert!(matches!(result, Err(WindError::Io(_))));
    }
}
