// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Surfspot API: surf spot metadata merged with marine forecasts.
//!
//! This crate serves spots, favorites and users from a document store and
//! attaches hourly wave/wind forecasts and tide extremes fetched from a
//! third-party marine weather API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SpotStore;
use services::SpotForecaster;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SpotStore>,
    pub forecaster: SpotForecaster,
}
