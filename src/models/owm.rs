//! OpenWeatherMap API response structures and conversions
//!
//! Wire shapes for the two weather endpoints (`/data/2.5/weather`,
//! `/data/2.5/forecast`) and the geocoding endpoints (`/geo/1.0/direct`,
//! `/geo/1.0/reverse`). Optional fields the provider sometimes omits
//! (humidity, wind direction, visibility, pop) deserialize leniently.

use super::{ConditionSummary, Location};
use serde::Deserialize;

/// Current-conditions response from `/data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub main: CurrentMain,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<ConditionSummary>,
    #[serde(default)]
    pub visibility: Option<f64>,
    pub sys: Sys,
}

#[derive(Debug, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    pub pressure: f64,
}

#[derive(Debug, Deserialize, Default)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    pub sunrise: i64,
    pub sunset: i64,
}

/// Forecast response from `/data/2.5/forecast` (3-hour step, up to 5 days)
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastPoint>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPoint {
    /// Forecast timestamp (epoch seconds, UTC)
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionSummary>,
    /// Probability of precipitation, 0.0 to 1.0; absent means zero
    #[serde(default)]
    pub pop: f64,
}

impl ForecastPoint {
    /// First condition entry, or a neutral summary when the provider sent none
    #[must_use]
    pub fn primary_summary(&self) -> ConditionSummary {
        self.weather.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCity {
    /// UTC offset of the forecast location, in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// One place from the geocoding endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct GeoPlace {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<GeoPlace> for Location {
    /// Display name composition: `cityName[, state][, country]`
    fn from(place: GeoPlace) -> Self {
        let mut name = place.name;
        if let Some(state) = place.state.filter(|s| !s.is_empty()) {
            name = format!("{name}, {state}");
        }
        if let Some(country) = place.country.filter(|c| !c.is_empty()) {
            name = format!("{name}, {country}");
        }
        Location::new(name, place.lat, place.lon)
    }
}

/// Error body the provider returns on non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
