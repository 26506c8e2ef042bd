//! Input adapters
//!
//! Adapters parse provider payloads (forecast JSON, sun-times JSON, segment
//! CSV) into the typed records the engine consumes. The source traits are the
//! seam between the pipeline and wherever those payloads come from.

mod http;
mod openweather;
mod segments;
mod sunrise;

pub use http::{HttpForecastSource, API_KEY_ENV};
pub use openweather::{icon_glyph, OpenWeatherAdapter, FORECAST_API_URL, FORECAST_PERIODS};
pub use segments::{SegmentCsvAdapter, DEFAULT_SEGMENTS_PATH};
pub use sunrise::{SunTable, SunriseSunsetAdapter, SUNRISE_API_URL};

use std::path::PathBuf;

use crate::error::WindError;
use crate::types::{Observation, Segment};

/// Produces the forecast observations for one run
pub trait ObservationSource {
    fn observations(&self) -> Result<Vec<Observation>, WindError>;
}

/// Produces the segment list for one run
pub trait SegmentSource {
    fn segments(&self) -> Result<Vec<Segment>, WindError>;
}

/// Segments read from a CSV file on disk
pub struct CsvSegmentSource {
    pub path: PathBuf,
}

impl CsvSegmentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SegmentSource for CsvSegmentSource {
    fn segments(&self) -> Result<Vec<Segment>, WindError> {
        SegmentCsvAdapter.read_path(&self.path)
    }
}

/// A fixed, already-loaded observation list
impl ObservationSource for Vec<Observation> {
    fn observations(&self) -> Result<Vec<Observation>, WindError> {
        Ok(self.clone())
    }
}
