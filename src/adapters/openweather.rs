//! OpenWeather adapter
//!
//! Parses the 5-day / 3-hour `/forecast` payload (imperial units) and attaches
//! each period's own-date sunrise and sunset.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::Deserialize;

use super::sunrise::SunTable;
use crate::error::WindError;
use crate::types::Observation;

/// Base URL of the forecast service
pub const FORECAST_API_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

/// Periods requested per call (40 × 3h = 5 days)
pub const FORECAST_PERIODS: u32 = 40;

/// OpenWeather forecast payload adapter
pub struct OpenWeatherAdapter;

impl OpenWeatherAdapter {
    /// Convert a forecast payload into observations in `tz`.
    ///
    /// Periods whose local date has no entry in `sun_times` are dropped.
    pub fn parse(
        &self,
        raw_json: &str,
        sun_times: &SunTable,
        tz: Tz,
    ) -> Result<Vec<Observation>, WindError> {
        let payload: ForecastPayload = serde_json::from_str(raw_json)?;
        let mut observations = Vec::new();

        for period in payload.list.unwrap_or_default() {
            let timestamp = Utc
                .timestamp_opt(period.dt, 0)
                .single()
                .ok_or_else(|| WindError::DateParseError(format!("bad unix time {}", period.dt)))?
                .with_timezone(&tz)
                .fixed_offset();

            let Some(sun) = sun_times.get(&timestamp.date_naive()) else {
                debug!("No sunrise/sunset for {}, skipping period", timestamp);
                continue;
            };

            let icon = period
                .weather
                .first()
                .map(|w| icon_glyph(&w.icon))
                .unwrap_or_default();

            observations.push(Observation {
                timestamp,
                wind_speed: period.wind.speed,
                wind_bearing: period.wind.deg,
                wind_gust: period.wind.gust,
                sunrise: sun.sunrise,
                sunset: sun.sunset,
                temperature: period.main.temp,
                icon: icon.to_string(),
            });
        }

        Ok(observations)
    }
}

/// Display glyph for an OpenWeather icon code; unknown codes map to ""
pub fn icon_glyph(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌑",
        "02d" => "🌤️",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "🌩️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "",
    }
}

// OpenWeather response structures

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Deserialize)]
struct ForecastPeriod {
    dt: i64,
    main: ForecastMain,
    wind: ForecastWind,
    #[serde(default)]
    weather: Vec<ForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastWind {
    speed: f64,
    deg: f64,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastWeather {
    icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SunTimes;
    use chrono::{NaiveDate, Timelike};

    fn sun_table() -> SunTable {
        let tz = chrono_tz::America::New_York;
        let mut table = SunTable::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        table.insert(
            date,
            SunTimes {
                sunrise: tz.with_ymd_and_hms(2024, 6, 3, 6, 0, 41).unwrap().fixed_offset(),
                sunset: tz.with_ymd_and_hms(2024, 6, 3, 21, 12, 5).unwrap().fixed_offset(),
            },
        );
        table
    }

    // 2024-06-03 16:00 UTC (12:00 EDT) and 2024-06-04 16:00 UTC
    const SAMPLE: &str = r#"{
        "cod": "200",
        "cnt": 2,
        "list": [
            {
                "dt": 1717430400,
                "main": {"temp": 71.6, "humidity": 40},
                "weather": [{"id": 800, "main": "Clear", "icon": "01d"}],
                "wind": {"speed": 16.2, "deg": 92, "gust": 24.1}
            },
            {
                "dt": 1717516800,
                "main": {"temp": 68.0},
                "weather": [{"icon": "10d"}],
                "wind": {"speed": 9.1, "deg": 270}
            }
        ]
    }"#;

    #[test]
    fn test_parse_forecast() {
        let observations = OpenWeatherAdapter
            .parse(SAMPLE, &sun_table(), chrono_tz::America::New_York)
            .unwrap();

        // Second period has no sun times for its date
        assert_eq!(observations.len(), 1);
        let obs = &observations[0];
        assert_eq!(obs.timestamp.hour(), 12);
        assert_eq!(obs.wind_speed, 16.2);
        assert_eq!(obs.wind_bearing, 92.0);
        assert_eq!(obs.wind_gust, Some(24.1));
        assert_eq!(obs.temperature, 71.6);
        assert_eq!(obs.icon, "☀️");
        assert_eq!(obs.sunrise.hour(), 6);
        assert_eq!(obs.wind_cardinal(), "E");
    }

    #[test]
    fn test_missing_wind_field_is_error() {
        let json = r#"{"list": [{"dt": 1717430400, "main": {"temp": 70.0}, "wind": {"deg": 90}}]}"#;
        assert!(OpenWeatherAdapter
            .parse(json, &sun_table(), chrono_tz::America::New_York)
            .is_err());
    }

    #[test]
    fn test_icon_glyphs() {
        assert_eq!(icon_glyph("01n"), "🌑");
        assert_eq!(icon_glyph("04d"), "☁️");
        assert_eq!(icon_glyph("99x"), "");
    }
}
