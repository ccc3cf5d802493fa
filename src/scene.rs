//! Condition classification and background scene selection

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::CurrentConditions;

/// Semantic weather condition derived from a provider description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Clear,
    Rain,
    Snow,
    Clouds,
    Thunderstorm,
    Drizzle,
}

impl Condition {
    /// Classify a free-text weather description.
    ///
    /// Case-insensitive substring matching with fixed priority:
    /// thunderstorm > rain/shower > drizzle > snow > cloud. An earlier
    /// keyword wins regardless of position in the text, and unmatched
    /// text defaults to `Clear`.
    #[must_use]
    pub fn classify(description: &str) -> Self {
        let description = description.to_lowercase();

        if description.contains("thunderstorm") {
            Self::Thunderstorm
        } else if description.contains("rain") || description.contains("shower") {
            Self::Rain
        } else if description.contains("drizzle") {
            Self::Drizzle
        } else if description.contains("snow") {
            Self::Snow
        } else if description.contains("cloud") {
            Self::Clouds
        } else {
            Self::Clear
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Clouds => "clouds",
            Self::Thunderstorm => "thunderstorm",
            Self::Drizzle => "drizzle",
        }
    }
}

/// Day/night bucket for scene selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Night iff `now < sunrise || now > sunset`.
    ///
    /// Assumes sunrise and sunset are both "today's" relative to `now`;
    /// right after midnight, before a sunrise stamped for the previous
    /// day, the comparison is an approximation and is kept as-is.
    #[must_use]
    pub fn from_solar(sunrise: i64, sunset: i64, now: i64) -> Self {
        if now < sunrise || now > sunset {
            Self::Night
        } else {
            Self::Day
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

/// Key identifying a background scene: time-of-day crossed with condition
///
/// Pure data; resolving a key to an asset URL or file path is owned by the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneKey {
    pub time_of_day: TimeOfDay,
    pub condition: Condition,
}

impl SceneKey {
    /// Select the scene for a condition and solar window. Deterministic,
    /// no I/O.
    #[must_use]
    pub fn select(condition: Condition, sunrise: i64, sunset: i64, now: i64) -> Self {
        Self {
            time_of_day: TimeOfDay::from_solar(sunrise, sunset, now),
            condition,
        }
    }

    /// Classify and select in one step from a provider description
    #[must_use]
    pub fn for_description(description: &str, sunrise: i64, sunset: i64, now: i64) -> Self {
        Self::select(Condition::classify(description), sunrise, sunset, now)
    }

    /// Scene for a current-conditions report, classified from its
    /// authoritative (first) condition entry
    #[must_use]
    pub fn for_conditions(current: &CurrentConditions, now: i64) -> Self {
        Self::for_description(
            &current.primary().description,
            current.sunrise,
            current.sunset,
            now,
        )
    }

    /// Asset lookup key. Drizzle shares the rain asset per time-of-day;
    /// every other condition maps 1:1.
    #[must_use]
    pub fn asset_key(&self) -> String {
        let condition = match self.condition {
            Condition::Drizzle => Condition::Rain,
            other => other,
        };
        format!("{}-{}", self.time_of_day.as_str(), condition.as_str())
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.time_of_day.as_str(),
            self.condition.as_str()
        )
    }
}
