// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use surfspot_api::config::Config;
use surfspot_api::db::{FirestoreDb, MemoryStore};
use surfspot_api::models::{GeoPoint, Spot};
use surfspot_api::routes::create_router;
use surfspot_api::services::{ForecastClient, SpotForecaster};
use surfspot_api::AppState;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Config pointing the forecast client at a mock upstream.
#[allow(dead_code)]
pub fn test_config(upstream: &MockServer) -> Config {
    Config {
        forecast_api_base_url: upstream.uri(),
        ..Config::test_default()
    }
}

/// Create a test app backed by `store`, with forecasts served by `upstream`.
#[allow(dead_code)]
pub fn create_test_app(store: MemoryStore, upstream: &MockServer) -> (axum::Router, Arc<AppState>) {
    let config = test_config(upstream);
    let client = ForecastClient::new(&config).expect("forecast client");
    let forecaster = SpotForecaster::new(client, config.max_concurrent_spots);

    let state = Arc::new(AppState {
        config,
        store: Arc::new(store),
        forecaster,
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn test_spot(id: &str, name: &str, city: &str, lat: f64, lon: f64) -> Spot {
    Spot {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{} beach road", name),
        city: city.to_string(),
        state: "CA".to_string(),
        country: "US".to_string(),
        coords: GeoPoint::new(lat, lon),
        geohash: None,
    }
}

/// One upstream `hours` entry.
#[allow(dead_code)]
pub fn forecast_hour(time: &str, wave_height: f64) -> serde_json::Value {
    serde_json::json!({
        "time": time,
        "waveHeight": {"sg": wave_height, "noaa": wave_height + 0.1, "icon": wave_height - 0.1},
        "waveDirection": {"sg": 270.0, "noaa": 265.0},
        "wavePeriod": {"sg": 12.0},
        "swellDirection": {"sg": 280.0},
        "waterTemperature": {"sg": 18.5, "meteo": 18.1},
        "windSpeed": {"sg": 4.2, "dwd": 4.0},
        "windDirection": {"sg": 90.0},
        "gust": {"sg": 6.0}
    })
}

#[allow(dead_code)]
pub fn tide_event(time: &str, kind: &str, height: f64) -> serde_json::Value {
    serde_json::json!({"height": height, "time": time, "type": kind})
}

/// Serve `hours` for forecasts requested at `lat`.
#[allow(dead_code)]
pub async fn mount_forecast(upstream: &MockServer, lat: &str, hours: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/weather/point"))
        .and(query_param("lat", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hours": hours,
            "meta": {"cost": 1, "dailyQuota": 10}
        })))
        .mount(upstream)
        .await;
}

/// Serve `events` for tide extremes requested at `lat`.
#[allow(dead_code)]
pub async fn mount_tides(upstream: &MockServer, lat: &str, events: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/tide/extremes/point"))
        .and(query_param("lat", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": events,
            "meta": {"datum": "MLLW"}
        })))
        .mount(upstream)
        .await;
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}
