// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregate;
pub mod forecast;
pub mod geo;

pub use aggregate::{build_records, partition_tides, ForecastSubject, SpotForecaster};
pub use forecast::{Fetched, ForecastClient};
