//! Forecast aggregation
//!
//! Turns the provider's flat, time-ordered forecast list into the hourly
//! and daily series of a [`WeatherSnapshot`]. Daily grouping is by calendar
//! date in the forecast location's own UTC offset, not by fixed time
//! windows: two points one second apart can share a group, two points
//! crossing local midnight never do.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use tracing::debug;

use crate::error::{FetchStage, SkycastError};
use crate::models::owm::{CurrentResponse, ForecastPoint, ForecastResponse};
use crate::models::{CurrentConditions, DailyEntry, HourlyEntry, TempRange, WeatherSnapshot};

/// Map each raw forecast point to an [`HourlyEntry`], one-to-one.
///
/// No filtering: output length equals input length and order is preserved.
/// Truncating to a display window is the presentation layer's concern.
#[must_use]
pub fn to_hourly(points: &[ForecastPoint]) -> Vec<HourlyEntry> {
    points
        .iter()
        .map(|point| HourlyEntry {
            dt: point.dt,
            temp: point.main.temp,
            summary: point.primary_summary(),
            pop: point.pop.clamp(0.0, 1.0),
        })
        .collect()
}

/// Fold raw forecast points into daily entries, grouped by local calendar
/// date, in first-seen order.
///
/// The first point of a day seeds `min = max = temp` and fixes the day's
/// condition; later points only widen the range and raise the
/// precipitation probability. The condition is never revisited, so a day
/// whose first 3-hour slot is drizzly stays drizzly even if the afternoon
/// clears up.
#[must_use]
pub fn to_daily(points: &[ForecastPoint], offset: FixedOffset) -> Vec<DailyEntry> {
    let mut days: Vec<NaiveDate> = Vec::new();
    let mut entries: Vec<DailyEntry> = Vec::new();

    for point in points {
        let day = local_day(point.dt, offset);
        let pop = point.pop.clamp(0.0, 1.0);

        match days.iter().position(|d| *d == day) {
            Some(i) => {
                let entry = &mut entries[i];
                entry.temp.min = entry.temp.min.min(point.main.temp);
                entry.temp.max = entry.temp.max.max(point.main.temp);
                entry.pop = entry.pop.max(pop);
            }
            None => {
                days.push(day);
                entries.push(DailyEntry {
                    dt: point.dt,
                    temp: TempRange {
                        min: point.main.temp,
                        max: point.main.temp,
                    },
                    summary: point.primary_summary(),
                    pop,
                });
            }
        }
    }

    entries
}

/// Calendar date of an epoch timestamp in the given UTC offset
fn local_day(dt: i64, offset: FixedOffset) -> NaiveDate {
    DateTime::from_timestamp(dt, 0)
        .unwrap_or_default()
        .with_timezone(&offset)
        .date_naive()
}

impl WeatherSnapshot {
    /// Build a snapshot from the two raw payloads of one fetch cycle.
    ///
    /// Runs only after both requests succeeded. The current report must
    /// carry at least one condition entry; the forecast list may be
    /// arbitrarily short (a single point yields a single daily entry).
    pub fn assemble(
        current: CurrentResponse,
        forecast: ForecastResponse,
    ) -> Result<Self, SkycastError> {
        if current.weather.is_empty() {
            return Err(SkycastError::fetch(
                FetchStage::Current,
                "weather report contained no condition entries",
            ));
        }

        let offset = forecast
            .city
            .as_ref()
            .and_then(|city| city.timezone)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());

        debug!(
            points = forecast.list.len(),
            offset_seconds = offset.local_minus_utc(),
            "Aggregating forecast"
        );

        let hourly = to_hourly(&forecast.list);
        let daily = to_daily(&forecast.list, offset);

        Ok(Self {
            current: CurrentConditions {
                temp: current.main.temp,
                feels_like: current.main.feels_like,
                humidity: current.main.humidity,
                wind_speed: current.wind.speed,
                wind_deg: current.wind.deg,
                pressure: current.main.pressure,
                visibility: current.visibility,
                sunrise: current.sys.sunrise,
                sunset: current.sys.sunset,
                weather: current.weather,
            },
            hourly,
            daily,
            fetched_at: Utc::now(),
        })
    }
}
