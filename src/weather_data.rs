//! # Forecast Fetching
//!
//! This module handles the network side of the weather widget: a small
//! [`WeatherClient`] shared by both sources, the error taxonomy for a fetch
//! attempt, and the primary multi-day forecast request.
//!
//! ## Data Source
//! - **URL**: `https://api.data.gov.sg/v1/environment/4-day-weather-forecast`
//! - **Format**: JSON, `{ items: [ { forecasts: [ { date, forecast, relative_humidity } ] } ] }`
//!
//! ## Validation
//! Responses are deserialized into private schema structs and converted into
//! [`ForecastDay`] values in one step. Anything that does not fit the shape
//! comes back as [`FetchError::Parse`]; nothing downstream re-checks fields.
//!
//! The fallback source lives in [`crate::fallback`] and reuses [`WeatherClient::get_json`].

use crate::{config::WeatherConfig, ForecastDay, Humidity};
use chrono::NaiveDate;
use reqwest::{header::ACCEPT, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during a single fetch attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Body did not have the expected shape
    #[error("unexpected payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Http { status } => format!("Weather service returned {}", status),
            Self::Parse(_) => "Weather service sent unexpected data".to_string(),
        }
    }
}

/// HTTP client for both weather endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_url: String,
    reading_url: String,
    preferred_stations: Vec<String>,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            forecast_url: config.forecast_url.clone(),
            reading_url: config.reading_url.clone(),
            preferred_stations: config.preferred_stations.clone(),
        })
    }

    pub(crate) fn reading_url(&self) -> &str {
        &self.reading_url
    }

    pub(crate) fn preferred_stations(&self) -> &[String] {
        &self.preferred_stations
    }

    /// Fetch the multi-day forecast.
    ///
    /// Returns every forecast day the source offers; callers truncate.
    ///
    /// # Errors
    /// - [`FetchError::Network`] when the request or body read fails
    /// - [`FetchError::Http`] on a non-2xx status
    /// - [`FetchError::Parse`] when `items[0].forecasts` is missing or empty,
    ///   or a date does not parse
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self) -> Result<Vec<ForecastDay>, FetchError> {
        let body: ForecastResponse = self.get_json(&self.forecast_url).await?;
        let days = validate_forecast(body)?;
        debug!(days = days.len(), "forecast validated");
        Ok(days)
    }

    /// GET a JSON document and deserialize it into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

// -- Wire schema --

#[derive(Deserialize, Debug)]
struct ForecastResponse {
    items: Vec<ForecastItem>,
}

#[derive(Deserialize, Debug)]
struct ForecastItem {
    forecasts: Vec<RawForecast>,
}

#[derive(Deserialize, Debug)]
struct RawForecast {
    date: String,
    forecast: String,
    #[serde(default)]
    relative_humidity: Option<Humidity>,
}

fn validate_forecast(body: ForecastResponse) -> Result<Vec<ForecastDay>, FetchError> {
    let item = body
        .items
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("forecast items empty".to_string()))?;

    if item.forecasts.is_empty() {
        return Err(FetchError::Parse("forecast list empty".to_string()));
    }

    item.forecasts
        .into_iter()
        .map(|raw| {
            let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d")
                .map_err(|e| FetchError::Parse(format!("bad date {:?}: {}", raw.date, e)))?;
            Ok(ForecastDay {
                date,
                condition: raw.forecast,
                humidity: raw.relative_humidity,
            })
        })
        .collect()
}
