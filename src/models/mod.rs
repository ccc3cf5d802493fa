//! Data models for the Skycast core

pub mod location;
pub mod owm;
pub mod weather;

pub use location::Location;
pub use weather::{
    ConditionSummary, CurrentConditions, DailyEntry, HourlyEntry, TempRange, WeatherSnapshot,
};
