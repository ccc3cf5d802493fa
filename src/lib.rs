//! Skycast — weather dashboard core
//!
//! This library provides the data layer of a weather dashboard: city
//! search and geolocation, weather retrieval from OpenWeatherMap,
//! normalization of raw forecasts into hourly and daily series, and
//! selection of a themed background scene from the current condition and
//! solar time. Rendering is left to the embedding presentation layer.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geocode;
pub mod locate;
pub mod models;
pub mod provider;
pub mod scene;
pub mod search;
pub mod telemetry;

// Re-export core types for public API
pub use api::ApiClient;
pub use cache::SnapshotCache;
pub use config::SkycastConfig;
pub use error::{FetchStage, SkycastError};
pub use geocode::Geocoder;
pub use locate::{PositionSource, locate};
pub use models::{Location, WeatherSnapshot};
pub use provider::WeatherService;
pub use scene::{Condition, SceneKey, TimeOfDay};
pub use search::{CitySearch, SearchController, SearchOutcome, SearchPhase};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
