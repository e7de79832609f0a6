//! # Fallback Temperature Source
//!
//! When the multi-day forecast cannot be used, the widget falls back to the
//! current air temperature readings from the station network and shows one
//! station's value across all four cards.
//!
//! ## Data Source
//! - **URL**: `https://api.data.gov.sg/v1/environment/air-temperature`
//! - **Format**: JSON, `{ items: [ { readings: [ { station_id, value } ] } ] }`
//!
//! ## Station Selection
//! Stations are tried in the configured preference order (`S109`, then `S81`
//! by default). If none of them reported, the first reading wins. An empty
//! reading list is rejected here as a parse failure so the presenter never
//! sees a missing reading.

use crate::{
    weather_data::{FetchError, WeatherClient},
    PointReading,
};
use serde::Deserialize;
use tracing::{debug, instrument};

impl WeatherClient {
    /// Fetch current station readings and select one.
    ///
    /// # Errors
    /// Same failure modes as [`WeatherClient::fetch_forecast`], validated
    /// against `items[0].readings`. An empty reading list is [`FetchError::Parse`].
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current_reading(&self) -> Result<PointReading, FetchError> {
        let body: ReadingResponse = self.get_json(self.reading_url()).await?;
        let reading = validate_readings(body, self.preferred_stations())?;
        debug!(station = %reading.station_id, value = reading.value_celsius, "reading selected");
        Ok(reading)
    }
}

#[derive(Deserialize, Debug)]
struct ReadingResponse {
    items: Vec<ReadingItem>,
}

#[derive(Deserialize, Debug)]
struct ReadingItem {
    readings: Vec<RawReading>,
}

#[derive(Deserialize, Debug, Clone)]
struct RawReading {
    station_id: String,
    value: f64,
}

fn validate_readings(
    body: ReadingResponse,
    preferred: &[String],
) -> Result<PointReading, FetchError> {
    let item = body
        .items
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("reading items empty".to_string()))?;

    let chosen = select_reading(&item.readings, preferred)
        .ok_or_else(|| FetchError::Parse("reading list empty".to_string()))?;

    Ok(PointReading {
        station_id: chosen.station_id.clone(),
        value_celsius: chosen.value,
    })
}

/// Pick the first preferred station present, else the first reading.
fn select_reading<'a>(
    readings: &'a [RawReading],
    preferred: &[String],
) -> Option<&'a RawReading> {
    preferred
        .iter()
        .find_map(|id| readings.iter().find(|r| &r.station_id == id))
        .or_else(|| readings.first())
}
