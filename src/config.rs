// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The forecast API key and the store selection are read once at startup
//! and handed to the services that need them.

use std::env;

/// Which record store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", value.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Forecast upstream ---
    /// Static key sent verbatim in the `Authorization` header
    pub forecast_api_key: String,
    /// Base URL of the marine forecast API (no trailing slash)
    pub forecast_api_base_url: String,
    /// Per-call timeout for upstream requests, in seconds
    pub forecast_timeout_secs: u64,
    /// Tidal datum used for tide extremes
    pub tide_datum: String,
    /// Max spots whose forecasts are fetched at the same time
    pub max_concurrent_spots: usize,

    // --- Storage ---
    /// GCP project ID
    pub gcp_project_id: String,
    pub store_backend: StoreBackend,

    // --- Server ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Config for tests. The forecast base URL is unroutable until overridden.
    pub fn test_default() -> Self {
        Self {
            forecast_api_key: "test_forecast_key".to_string(),
            forecast_api_base_url: "http://127.0.0.1:9".to_string(),
            forecast_timeout_secs: 5,
            tide_datum: "MLLW".to_string(),
            max_concurrent_spots: 4,
            gcp_project_id: "test-project".to_string(),
            store_backend: StoreBackend::Memory,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            forecast_api_key: env::var("FORECAST_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FORECAST_API_KEY"))?,
            forecast_api_base_url: env::var("FORECAST_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.stormglass.io/v2".to_string()),
            forecast_timeout_secs: parse_or("FORECAST_TIMEOUT_SECS", 10)?,
            tide_datum: env::var("TIDE_DATUM").unwrap_or_else(|_| "MLLW".to_string()),
            max_concurrent_spots: parse_or("MAX_CONCURRENT_SPOTS", 8)?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            store_backend: env::var("STORE_BACKEND")
                .unwrap_or_else(|_| "firestore".to_string())
                .parse()?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FORECAST_API_KEY", " test_key ");
        env::set_var("FORECAST_API_BASE_URL", "https://forecast.example.com/v2/");
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("MAX_CONCURRENT_SPOTS", "3");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.forecast_api_key, "test_key");
        assert_eq!(config.forecast_api_base_url, "https://forecast.example.com/v2");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.max_concurrent_spots, 3);
        assert_eq!(config.tide_datum, "MLLW");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("Firestore".parse::<StoreBackend>().unwrap(), StoreBackend::Firestore);
        assert!(matches!(
            "postgres".parse::<StoreBackend>(),
            Err(ConfigError::Invalid("STORE_BACKEND", _))
        ));
    }
}
