//! HTTP-backed forecast source
//!
//! Fetches sun times and the 5-day forecast for the configured location with
//! a blocking client and hands the payloads to the parsing adapters.

use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use reqwest::blocking::Client;

use super::openweather::{OpenWeatherAdapter, FORECAST_API_URL, FORECAST_PERIODS};
use super::sunrise::{SunTable, SunriseSunsetAdapter, SUNRISE_API_URL};
use super::ObservationSource;
use crate::config::Location;
use crate::error::WindError;
use crate::types::Observation;

/// Environment variable holding the OpenWeather API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Days of sun times fetched, starting tomorrow
const HORIZON_DAYS: u64 = 5;

/// Forecast observations fetched live from OpenWeather and sunrisesunset.io
pub struct HttpForecastSource {
    client: Client,
    api_key: Option<String>,
    location: Location,
}

impl HttpForecastSource {
    pub fn new(api_key: Option<String>, location: Location) -> Result<Self, WindError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            location,
        })
    }

    /// Build a source using the API key from the environment.
    ///
    /// A missing key is only reported when a fetch is attempted.
    pub fn from_env(location: Location) -> Result<Self, WindError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::new(api_key, location)
    }

    fn fetch_sun_times(&self, start: NaiveDate, tz: Tz) -> Result<SunTable, WindError> {
        let end = start
            .checked_add_days(Days::new(HORIZON_DAYS - 1))
            .ok_or_else(|| WindError::DateParseError(format!("horizon overflows {}", start)))?;

        info!("Fetching sun times {} to {}", start, end);
        let response = self
            .client
            .get(SUNRISE_API_URL)
            .query(&[
                ("lat", self.location.latitude.to_string()),
                ("lng", self.location.longitude.to_string()),
                ("timezone", tz.name().to_string()),
                ("date_start", start.format("%Y-%m-%d").to_string()),
                ("date_end", end.format("%Y-%m-%d").to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WindError::Upstream {
                service: "sunrise/sunset API",
                status: status.to_string(),
            });
        }

        SunriseSunsetAdapter.parse(&response.text()?, tz)
    }

    fn fetch_forecast(&self, api_key: &str) -> Result<String, WindError> {
        info!(
            "Fetching forecast for {}, {}",
            self.location.latitude, self.location.longitude
        );
        let response = self
            .client
            .get(FORECAST_API_URL)
            .query(&[
                ("lat", self.location.latitude.to_string()),
                ("lon", self.location.longitude.to_string()),
                ("cnt", FORECAST_PERIODS.to_string()),
                ("appid", api_key.to_string()),
                ("units", "imperial".to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(WindError::Upstream {
                service: "forecast API",
                status: status.to_string(),
            });
        }

        Ok(response.text()?)
    }
}

impl ObservationSource for HttpForecastSource {
    fn observations(&self) -> Result<Vec<Observation>, WindError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WindError::MissingApiKey(API_KEY_ENV))?;
        let tz = self.location.tz()?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        let start = today
            .succ_opt()
            .ok_or_else(|| WindError::DateParseError(format!("no day after {}", today)))?;

        let sun_times = self.fetch_sun_times(start, tz)?;
        let forecast = self.fetch_forecast(api_key)?;
        let observations = OpenWeatherAdapter.parse(&forecast, &sun_times, tz)?;

        debug!("Parsed {} forecast periods", observations.len());
        Ok(observations)
    }
}
