//! One-shot geolocation
//!
//! The platform position source (browser geolocation, CoreLocation, ...)
//! sits behind a trait; this module owns the bounded wait and the
//! resolution of a raw fix into a named [`Location`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::SkycastError;
use crate::geocode::Geocoder;
use crate::models::Location;

/// Platform seam for acquiring the device position
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// One-shot position fix as `(lat, lon)`.
    ///
    /// Implementations return [`SkycastError::Permission`] when access is
    /// denied or the platform has no geolocation support.
    async fn current_position(&self) -> Result<(f64, f64), SkycastError>;
}

/// Acquire the device position once and resolve it to a named location.
///
/// The acquisition is bounded by `timeout` with no retry; exceeding it
/// surfaces [`SkycastError::Timeout`]. A failed reverse lookup degrades to
/// a coordinate-string name rather than failing the whole operation.
pub async fn locate<S>(
    source: &S,
    geocoder: &Geocoder,
    timeout: Duration,
) -> Result<Location, SkycastError>
where
    S: PositionSource + ?Sized,
{
    let (lat, lon) = tokio::time::timeout(timeout, source.current_position())
        .await
        .map_err(|_| SkycastError::timeout(timeout.as_secs()))??;

    debug!("Position acquired: {lat:.4}, {lon:.4}");

    match geocoder.reverse(lat, lon).await {
        Ok(location) => Ok(location),
        Err(e) => {
            warn!("Reverse geocoding failed ({e}), using coordinates as name");
            Ok(Location::new(format!("{lat:.4}, {lon:.4}"), lat, lon))
        }
    }
}
