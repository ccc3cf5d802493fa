//! City search and reverse geocoding

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::SkycastError;
use crate::api::ApiClient;
use crate::models::Location;

/// Resolves free-text queries and coordinate pairs into named locations.
///
/// Result ordering is provider-defined and not re-sorted here; the result
/// count is bounded by the configured limit to keep the picker usable.
pub struct Geocoder {
    api: Arc<ApiClient>,
    limit: u32,
}

impl Geocoder {
    /// Create a geocoder over the shared API client
    #[must_use]
    pub fn new(api: Arc<ApiClient>, limit: u32) -> Self {
        Self { api, limit }
    }

    /// Search for locations matching a free-text query.
    ///
    /// A blank or whitespace-only query resolves to an empty list without
    /// issuing a network call, as does a transport success with no results.
    /// Transport failures surface as [`SkycastError::Lookup`] carrying the
    /// upstream message when present.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Location>, SkycastError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Blank query, skipping lookup");
            return Ok(Vec::new());
        }

        let places = self
            .api
            .search_places(query, self.limit)
            .await
            .map_err(|e| SkycastError::lookup(e.message))?;

        if places.is_empty() {
            warn!("No results found for '{query}'");
        } else {
            info!("Found {} locations for '{query}'", places.len());
        }

        Ok(places.into_iter().map(Location::from).collect())
    }

    /// Resolve a coordinate pair to the nearest named location
    #[instrument(skip(self))]
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Location, SkycastError> {
        let mut places = self
            .api
            .reverse_places(lat, lon)
            .await
            .map_err(|e| SkycastError::lookup(e.message))?;

        if places.is_empty() {
            return Err(SkycastError::lookup(format!(
                "No place found at {lat:.4}, {lon:.4}"
            )));
        }

        Ok(places.remove(0).into())
    }
}
