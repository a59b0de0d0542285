// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marine forecast API client.
//!
//! Handles:
//! - Hourly wave/wind/water forecasts for the current UTC day
//! - Tide extremes for today and tomorrow
//! - Failure absorption: upstream errors become [`Fetched::Unavailable`]
//!
//! The upstream is not on the critical path. A failed call is logged and
//! degrades the response to empty forecast arrays instead of failing it.

use crate::config::Config;
use crate::models::{ForecastHour, GeoPoint, TideEvent};
use crate::time_utils::{format_day, today_utc, two_day_window};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Quantities requested from the weather endpoint.
pub const FORECAST_PARAMS: [&str; 13] = [
    "windWaveDirection",
    "windWaveHeight",
    "windWavePeriod",
    "swellDirection",
    "swellHeight",
    "swellPeriod",
    "waveDirection",
    "waveHeight",
    "wavePeriod",
    "windDirection",
    "windSpeed",
    "gust",
    "waterTemperature",
];

const WEATHER_PATH: &str = "/weather/point";
const TIDE_EXTREMES_PATH: &str = "/tide/extremes/point";

/// Outcome of one upstream call. This call never fails outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// Upstream answered; the list may legitimately be empty.
    Data(Vec<T>),
    /// Upstream could not be used. Treated as an empty list.
    Unavailable { reason: String },
}

impl<T> Fetched<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Fetched::Data(items) => items,
            Fetched::Unavailable { .. } => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Fetched::Data(items) => items,
            Fetched::Unavailable { .. } => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetched::Unavailable { .. })
    }
}

#[derive(Deserialize)]
struct HoursResponse {
    hours: Vec<ForecastHour>,
}

#[derive(Deserialize)]
struct TideResponse {
    data: Vec<TideEvent>,
}

/// Forecast API client.
#[derive(Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    tide_datum: String,
}

impl ForecastClient {
    /// Create a client from configuration. The API key is attached to every call.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.forecast_timeout_secs))
            .build()
            .context("Failed to build forecast HTTP client")?;

        Ok(Self {
            http,
            base_url: config.forecast_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.forecast_api_key.clone(),
            tide_datum: config.tide_datum.clone(),
        })
    }

    /// Hourly forecast samples for today (UTC).
    pub async fn fetch_forecast_samples(&self, coords: GeoPoint) -> Fetched<ForecastHour> {
        self.fetch_forecast_samples_on(coords, today_utc()).await
    }

    /// Hourly forecast samples for a single UTC day.
    pub async fn fetch_forecast_samples_on(
        &self,
        coords: GeoPoint,
        day: NaiveDate,
    ) -> Fetched<ForecastHour> {
        let day = format_day(day);
        let query = [
            ("lat", coords.latitude.to_string()),
            ("lng", coords.longitude.to_string()),
            ("start", day.clone()),
            ("end", day),
            ("params", FORECAST_PARAMS.join(",")),
        ];

        let result = self
            .get_json::<HoursResponse>(WEATHER_PATH, &query)
            .await
            .map(|r| r.hours);
        absorb(result, "forecast", coords)
    }

    /// Tide extremes for today and tomorrow (UTC).
    pub async fn fetch_tide_events(&self, coords: GeoPoint) -> Fetched<TideEvent> {
        self.fetch_tide_events_on(coords, today_utc()).await
    }

    /// Tide extremes for the two-day window starting at `day`.
    pub async fn fetch_tide_events_on(&self, coords: GeoPoint, day: NaiveDate) -> Fetched<TideEvent> {
        let (start, end) = two_day_window(day);
        let query = [
            ("lat", coords.latitude.to_string()),
            ("lng", coords.longitude.to_string()),
            ("start", format_day(start)),
            ("end", format_day(end)),
            ("datum", self.tide_datum.clone()),
        ];

        let result = self
            .get_json::<TideResponse>(TIDE_EXTREMES_PATH, &query)
            .await
            .map(|r| r.data);
        absorb(result, "tide", coords)
    }

    /// GET `path` with the API key and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("HTTP {}: {}", status, truncate_body(&body)));
        }

        response
            .json()
            .await
            .with_context(|| format!("Unexpected JSON from {}", path))
    }
}

fn absorb<T>(result: anyhow::Result<Vec<T>>, kind: &str, coords: GeoPoint) -> Fetched<T> {
    match result {
        Ok(items) => {
            tracing::debug!(
                kind,
                lat = coords.latitude,
                lng = coords.longitude,
                count = items.len(),
                "Fetched upstream data"
            );
            Fetched::Data(items)
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::warn!(
                kind,
                lat = coords.latitude,
                lng = coords.longitude,
                error = %reason,
                "Upstream call failed, returning empty result"
            );
            Fetched::Unavailable { reason }
        }
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
