//! Normalized weather model
//!
//! Everything here is provider-independent output of the forecast
//! aggregation: the presentation layer renders these types directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provider weather entry (condition id, group, description, icon code)
///
/// Reports carry an ordered list of these; the first element is
/// authoritative for classification and display.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConditionSummary {
    /// Provider condition id
    #[serde(default)]
    pub id: i64,
    /// Condition group (e.g. "Rain")
    #[serde(default)]
    pub main: String,
    /// Free-text description (e.g. "light intensity shower rain")
    #[serde(default)]
    pub description: String,
    /// Provider icon code (e.g. "10d")
    #[serde(default)]
    pub icon: String,
}

/// Current weather conditions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temp: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage, when reported
    pub humidity: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees, when reported
    pub wind_deg: Option<f64>,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Visibility in meters, when reported
    pub visibility: Option<f64>,
    /// Sunrise time (epoch seconds)
    pub sunrise: i64,
    /// Sunset time (epoch seconds)
    pub sunset: i64,
    /// Ordered condition list; never empty, first element authoritative
    pub weather: Vec<ConditionSummary>,
}

/// Entry in the hourly forecast series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyEntry {
    /// Forecast timestamp (epoch seconds)
    pub dt: i64,
    /// Temperature in Celsius
    pub temp: f64,
    /// Condition for this point
    pub summary: ConditionSummary,
    /// Precipitation probability, 0.0 to 1.0
    pub pop: f64,
}

/// Temperature range for a day; only ever widened during aggregation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

/// Entry in the daily forecast series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyEntry {
    /// Timestamp of the first forecast point seen for this day (epoch seconds)
    pub dt: i64,
    /// Temperature range over the day's points
    pub temp: TempRange,
    /// Condition of the first point seen for this day; not updated later
    pub summary: ConditionSummary,
    /// Maximum precipitation probability over the day's points
    pub pop: f64,
}

/// Complete normalized weather bundle for one fetch cycle
///
/// Constructed once per fetch and replaced wholesale on the next; never
/// mutated in place.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly series, provider order preserved
    pub hourly: Vec<HourlyEntry>,
    /// Daily series, first-seen order
    pub daily: Vec<DailyEntry>,
    /// When this snapshot was retrieved
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Check if this snapshot is still within the freshness window
    #[must_use]
    pub fn is_fresh(&self, freshness_minutes: u64) -> bool {
        let age = Utc::now() - self.fetched_at;
        age.num_minutes() < i64::try_from(freshness_minutes).unwrap_or(i64::MAX)
    }
}

impl CurrentConditions {
    /// The authoritative condition entry
    #[must_use]
    pub fn primary(&self) -> &ConditionSummary {
        &self.weather[0]
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temp)
    }

    /// Format wind information; direction degrades to speed-only when absent
    #[must_use]
    pub fn format_wind(&self) -> String {
        match self.wind_deg {
            Some(deg) => format!(
                "{:.1} m/s {}",
                self.wind_speed,
                wind_direction_to_cardinal(deg)
            ),
            None => format!("{:.1} m/s", self.wind_speed),
        }
    }

    /// Format relative humidity, or a placeholder when unreported
    #[must_use]
    pub fn format_humidity(&self) -> String {
        match self.humidity {
            Some(h) => format!("{h:.0}%"),
            None => "--".to_string(),
        }
    }

    /// Format visibility in kilometers, or a placeholder when unreported
    #[must_use]
    pub fn format_visibility(&self) -> String {
        match self.visibility {
            Some(v) => format!("{:.1} km", v / 1000.0),
            None => "--".to_string(),
        }
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{:.0} hPa", self.pressure)
    }
}

/// Convert wind direction degrees to a cardinal compass name
#[must_use]
pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
    let deg = degrees.rem_euclid(360.0);
    match deg as u16 {
        0..=11 | 349..=360 => "N",
        12..=33 => "NNE",
        34..=56 => "NE",
        57..=78 => "ENE",
        79..=101 => "E",
        102..=123 => "ESE",
        124..=146 => "SE",
        147..=168 => "SSE",
        169..=191 => "S",
        192..=213 => "SSW",
        214..=236 => "SW",
        237..=258 => "WSW",
        259..=281 => "W",
        282..=303 => "WNW",
        304..=326 => "NW",
        327..=348 => "NNW",
        _ => "N",
    }
}
