//! Weather fetching
//!
//! One fetch cycle issues the current-conditions and forecast requests
//! concurrently for the same coordinate, runs both payloads through the
//! aggregator, and yields an immutable [`WeatherSnapshot`]. A fresh cache
//! hit skips the network entirely.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::SkycastError;
use crate::api::ApiClient;
use crate::cache::SnapshotCache;
use crate::error::FetchStage;
use crate::models::{Location, WeatherSnapshot};

/// Fetches and normalizes weather data for a location
pub struct WeatherService {
    api: Arc<ApiClient>,
    cache: SnapshotCache,
}

impl WeatherService {
    /// Create a weather service over the shared API client and an owned
    /// snapshot cache
    #[must_use]
    pub fn new(api: Arc<ApiClient>, cache: SnapshotCache) -> Self {
        Self { api, cache }
    }

    /// Fetch the weather snapshot for a location.
    ///
    /// The two requests are logically independent and run concurrently,
    /// but the result is only usable once both succeed: either failure
    /// fails the whole fetch with the stage that broke, and the aggregator
    /// never runs on a partial pair. Repeated calls with the same location
    /// are safe to retry; results within the freshness window are served
    /// from the cache.
    #[instrument(skip_all, fields(location = %location.name))]
    pub async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, SkycastError> {
        if let Some(snapshot) = self.cache.get(location) {
            debug!("Serving snapshot from cache");
            return Ok(snapshot);
        }

        info!(
            "Fetching weather for {:.4}, {:.4}",
            location.lat, location.lon
        );

        let (current, forecast) = tokio::try_join!(
            async {
                self.api
                    .current_weather(location.lat, location.lon)
                    .await
                    .map_err(|e| {
                        error!(
                            stage = %FetchStage::Current,
                            lat = location.lat,
                            lon = location.lon,
                            "Weather request failed: {}",
                            e.message
                        );
                        SkycastError::fetch(FetchStage::Current, e.message)
                    })
            },
            async {
                self.api
                    .forecast(location.lat, location.lon)
                    .await
                    .map_err(|e| {
                        error!(
                            stage = %FetchStage::Forecast,
                            lat = location.lat,
                            lon = location.lon,
                            "Weather request failed: {}",
                            e.message
                        );
                        SkycastError::fetch(FetchStage::Forecast, e.message)
                    })
            },
        )?;

        let snapshot = WeatherSnapshot::assemble(current, forecast)?;

        info!(
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            "Weather snapshot ready"
        );

        self.cache.put(location, &snapshot);
        Ok(snapshot)
    }

    /// The owned snapshot cache, for explicit invalidation by the caller
    #[must_use]
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }
}
