//! # ShoreSquad Weather Core Library
//!
//! This library provides the weather widget behind the ShoreSquad beach-cleanup
//! site: a forecast fetch with a single-station fallback, and a presenter that
//! turns whichever payload arrived into a fixed grid of weather cards.
//!
//! ## Data Flow
//! 1. **Primary**: Fetch the 4-day forecast → validate → render up to 4 cards
//! 2. **Fallback**: Fetch current station temperatures → pick one station → render 4 cards
//! 3. **Exhausted**: Render a single full-width error card and raise an error toast
//!
//! Payloads are validated once at the network boundary. Everything downstream of
//! [`weather_data`] and [`fallback`] works with the typed values defined here.
//!
//! ## Core Types
//! - [`ForecastDay`]: One validated day from the multi-day forecast
//! - [`PointReading`]: The selected station temperature from the fallback source
//! - [`DisplayCard`] / [`ErrorCard`]: What ends up in the weather grid

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod fallback;
pub mod pipeline;
pub mod presenter;
pub mod pulse;
pub mod ui;
pub mod weather_data;

/// Relative humidity as reported by the forecast source.
///
/// The live feed reports a `{ low, high }` range per day, older snapshots
/// carry a single percentage. Both shapes deserialize into this enum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Humidity {
    Percent(f64),
    Range { low: f64, high: f64 },
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Humidity::Percent(value) => write!(f, "{:.0}%", value),
            Humidity::Range { low, high } => write!(f, "{:.0}-{:.0}%", low, high),
        }
    }
}

/// A single validated forecast day.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use shoresquad::{ForecastDay, Humidity};
///
/// let day = ForecastDay {
///     date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
///     condition: "Thundery showers".to_string(),
///     humidity: Some(Humidity::Percent(80.0)),
/// };
/// assert_eq!(day.humidity.unwrap().to_string(), "80%");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date the forecast applies to
    pub date: NaiveDate,
    /// Free-text condition, e.g. "Partly cloudy"
    pub condition: String,
    /// Relative humidity, absent when the source omits it
    pub humidity: Option<Humidity>,
}

/// The one station reading chosen from the fallback source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointReading {
    /// Station identifier, e.g. "S109"
    pub station_id: String,
    /// Air temperature in degrees Celsius
    pub value_celsius: f64,
}

/// One weather tile in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCard {
    pub day_label: String,
    pub icon: String,
    pub primary_text: String,
    pub secondary_text: String,
}

/// Full-width card shown when no source could be reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCard {
    pub message: String,
}

/// Anything the presenter can place into a display region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Card {
    Weather(DisplayCard),
    Error(ErrorCard),
}
