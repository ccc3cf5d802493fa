//! HTTP client for the OpenWeatherMap API
//!
//! Thin typed wrapper over the four provider endpoints with request
//! timeout, transient-failure retries, and upstream error-message
//! extraction. The API key is appended to every request and elided from
//! logs.

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::SkycastError;
use crate::config::ApiConfig;
use crate::models::owm;

/// Low-level request failure, not yet mapped into the error taxonomy.
///
/// Carries the upstream error body's `message` when the provider sent one,
/// else a generic description. Callers tag it as `Lookup` or
/// `Fetch { stage }` depending on which contract the request served.
#[derive(Debug)]
pub(crate) struct RequestError {
    pub message: String,
}

/// Typed client for the weather and geocoding endpoints
pub struct ApiClient {
    http: ClientWithMiddleware,
    config: ApiConfig,
    key: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// Fails when the API key is missing: the key must be supplied through
    /// configuration or environment, never compiled in.
    pub fn new(config: ApiConfig) -> Result<Self, SkycastError> {
        let key = config
            .key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SkycastError::config("Weather API key is required. Set SKYCAST_API__KEY.")
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkycastError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { http, config, key })
    }

    /// Fetch current conditions for a coordinate pair
    #[instrument(skip(self))]
    pub(crate) async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<owm::CurrentResponse, RequestError> {
        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&appid={}&units=metric",
            self.config.base_url, self.key
        );
        self.get_json(&url, "weather").await
    }

    /// Fetch the 5-day/3-hour forecast for a coordinate pair
    #[instrument(skip(self))]
    pub(crate) async fn forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<owm::ForecastResponse, RequestError> {
        let url = format!(
            "{}/forecast?lat={lat}&lon={lon}&appid={}&units=metric",
            self.config.base_url, self.key
        );
        self.get_json(&url, "forecast").await
    }

    /// Resolve a free-text query to candidate places
    #[instrument(skip(self))]
    pub(crate) async fn search_places(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<owm::GeoPlace>, RequestError> {
        let url = format!(
            "{}/direct?q={}&limit={limit}&appid={}",
            self.config.geo_url,
            urlencoding::encode(query),
            self.key
        );
        self.get_json(&url, "geo/direct").await
    }

    /// Resolve a coordinate pair to named places
    #[instrument(skip(self))]
    pub(crate) async fn reverse_places(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<owm::GeoPlace>, RequestError> {
        let url = format!(
            "{}/reverse?lat={lat}&lon={lon}&limit=1&appid={}",
            self.config.geo_url, self.key
        );
        self.get_json(&url, "geo/reverse").await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
    ) -> Result<T, RequestError> {
        debug!(endpoint, "Issuing API request");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(endpoint, error = %e, "API request failed");
            RequestError {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's own message when the body carries one
            let message = serde_json::from_str::<owm::ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("API request failed with status {status}"));
            warn!(endpoint, %status, "API request rejected: {message}");
            return Err(RequestError { message });
        }

        response.json::<T>().await.map_err(|e| {
            warn!(endpoint, error = %e, "Failed to parse API response");
            RequestError {
                message: format!("Failed to parse response: {e}"),
            }
        })
    }
}
