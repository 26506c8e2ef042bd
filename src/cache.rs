//! Forecast cache
//!
//! Keeps the last fetched observation list on disk so repeated runs within a
//! few hours do not hit the forecast APIs again.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::adapters::ObservationSource;
use crate::config::Location;
use crate::error::WindError;
use crate::types::Observation;

/// Default cache lifetime in hours
pub const DEFAULT_CACHE_TTL_HOURS: i64 = 3;

/// Cache lifetime from a user-supplied hour count
pub fn ttl_from_hours(hours: i64) -> Result<Duration, WindError> {
    if hours < 0 {
        return Err(WindError::InvalidConfig(format!(
            "cache TTL must be non-negative, got {} hours",
            hours
        )));
    }
    Duration::try_hours(hours).ok_or_else(|| {
        WindError::InvalidConfig(format!("cache TTL of {} hours is out of range", hours))
    })
}

/// Serialized forecast with its retrieval time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedForecast {
    pub retrieved_at: DateTime<Utc>,
    pub location: Location,
    pub observations: Vec<Observation>,
}

impl CachedForecast {
    pub fn new(location: Location, observations: Vec<Observation>) -> Self {
        Self {
            retrieved_at: Utc::now(),
            location,
            observations,
        }
    }

    /// Whether this entry can still be used at `now` for `location`
    pub fn is_fresh(&self, location: &Location, ttl: Duration, now: DateTime<Utc>) -> bool {
        &self.location == location && now - self.retrieved_at < ttl
    }

    pub fn to_json(&self) -> Result<String, WindError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, WindError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Observation source that serves from a cache file when it is fresh
pub struct CachedSource<S> {
    inner: S,
    path: PathBuf,
    location: Location,
    ttl: Duration,
    refresh: bool,
}

impl<S: ObservationSource> CachedSource<S> {
    pub fn new(inner: S, path: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            inner,
            path: path.into(),
            location,
            ttl: Duration::hours(DEFAULT_CACHE_TTL_HOURS),
            refresh: false,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Ignore any existing cache entry and fetch again
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    fn load(&self) -> Option<CachedForecast> {
        let json = fs::read_to_string(&self.path).ok()?;
        match CachedForecast::from_json(&json) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!("Ignoring unreadable cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn store(&self, observations: &[Observation]) -> Result<(), WindError> {
        let cached = CachedForecast::new(self.location.clone(), observations.to_vec());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, cached.to_json()?)?;
        Ok(())
    }
}

impl<S: ObservationSource> ObservationSource for CachedSource<S> {
    fn observations(&self) -> Result<Vec<Observation>, WindError> {
        if !self.refresh {
            if let Some(cached) = self.load() {
                if cached.is_fresh(&self.location, self.ttl, Utc::now()) {
                    info!(
                        "Using cached forecast from {} ({})",
                        cached.retrieved_at,
                        self.path.display()
                    );
                    return Ok(cached.observations);
                }
                info!("Cached forecast is stale");
            }
        }

        let observations = self.inner.observations()?;
        match self.store(&observations) {
            Ok(()) => info!(
                "Cached {} observations to {}",
                observations.len(),
                self.path.display()
            ),
            Err(e) => warn!("Could not write cache {}: {}", self.path.display(), e),
        }
        Ok(observations)
    }
}
