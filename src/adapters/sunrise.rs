//! sunrisesunset.io adapter
//!
//! Parses the `/json` endpoint's date-range response into per-date sun times.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::WindError;
use crate::types::SunTimes;

/// Base URL of the sunrise/sunset service
pub const SUNRISE_API_URL: &str = "https://api.sunrisesunset.io/json";

/// Sun times keyed by local calendar date
pub type SunTable = BTreeMap<NaiveDate, SunTimes>;

/// sunrisesunset.io payload adapter
pub struct SunriseSunsetAdapter;

impl SunriseSunsetAdapter {
    /// Parse a response requested with `timezone=<tz>`
    pub fn parse(&self, raw_json: &str, tz: Tz) -> Result<SunTable, WindError> {
        let payload: SunPayload = serde_json::from_str(raw_json)?;

        if payload.status != "OK" {
            return Err(WindError::Upstream {
                service: "sunrise/sunset API",
                status: payload.status,
            });
        }

        let mut table = SunTable::new();
        for day in payload.results.unwrap_or_default() {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                .map_err(|e| WindError::DateParseError(format!("{}: {}", day.date, e)))?;
            let sunrise = local_instant(date, &day.sunrise, tz)?;
            let sunset = local_instant(date, &day.sunset, tz)?;
            table.insert(date, SunTimes { sunrise, sunset });
        }

        Ok(table)
    }
}

/// Combine a date and a "8:03:15 AM" wall-clock string in `tz`
fn local_instant(date: NaiveDate, time: &str, tz: Tz) -> Result<DateTime<FixedOffset>, WindError> {
    let time = NaiveTime::parse_from_str(time.trim(), "%I:%M:%S %p")
        .map_err(|e| WindError::DateParseError(format!("{}: {}", time, e)))?;
    let naive = NaiveDateTime::new(date, time);

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| WindError::DateParseError(format!("{} does not exist in {}", naive, tz.name())))
}

// sunrisesunset.io response structures

#[derive(Debug, Deserialize)]
struct SunPayload {
    status: String,
    results: Option<Vec<SunDay>>,
}

#[derive(Debug, Deserialize)]
struct SunDay {
    date: String,
    sunrise: String,
    sunset: String,
}
