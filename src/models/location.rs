//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A named coordinate pair
///
/// Immutable once created; produced by geocoding, consumed by the weather
/// fetcher. Uniqueness by (lat, lon) is not enforced and search results may
/// contain duplicates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Display name (e.g. "Interlaken, BE, CH")
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Format location as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }

    /// Round coordinates for cache key generation
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.lat * multiplier).round() / multiplier;
        let lon = (self.lon * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// Generate the snapshot cache key for this location
    #[must_use]
    pub fn cache_key(&self) -> String {
        let (lat, lon) = self.rounded_coordinates(2);
        format!("weather:{lat:.2}:{lon:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_cache_key() {
        let location = Location::new("Interlaken", 46.8182, 8.2275);
        assert_eq!(location.cache_key(), "weather:46.82:8.23");
    }

    #[test]
    fn test_location_rounded_coordinates() {
        let location = Location::new("Test", 46.818_234, 8.227_456);
        let (lat, lon) = location.rounded_coordinates(2);
        assert_eq!(lat, 46.82);
        assert_eq!(lon, 8.23);
    }

    #[test]
    fn test_nearby_locations_share_cache_key() {
        let a = Location::new("A", 46.8182, 8.2275);
        let b = Location::new("B", 46.8201, 8.2290);
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new("Test", 46.8182, 8.2275);
        assert_eq!(location.format_coordinates(), "46.8182, 8.2275");
    }
}
