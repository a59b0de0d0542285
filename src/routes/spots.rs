// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spot routes: forecasts per spot, listings and searches.

use crate::db::SpotSearchField;
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, Spot, SpotForecastRecord};
use crate::services::geo::km_to_meters;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spot/{spot_id}", get(get_spot))
        .route("/spots", get(get_all_spots))
        .route("/spots/", get(get_all_spots))
        .route(
            "/spots/{center_lat}/{center_long}/{radius}",
            get(search_spots_by_geo_location),
        )
        .route("/citySpots/{city}", get(get_city_spots))
        .route("/spotSearch/{search_text}", get(spot_search))
        .route("/spotSearch/city/{search_text}", get(spot_city_search))
}

/// Forecast records for one spot.
async fn get_spot(
    State(state): State<Arc<AppState>>,
    Path(spot_id): Path<String>,
) -> Result<Json<Vec<SpotForecastRecord>>> {
    let spot = state
        .store
        .get_spot(&spot_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Spot {} not found", spot_id)))?;

    Ok(Json(state.forecaster.records_for(&spot).await))
}

/// Forecast records for every spot.
async fn get_all_spots(State(state): State<Arc<AppState>>) -> Result<Json<Vec<SpotForecastRecord>>> {
    let spots = state.store.list_spots().await?;
    tracing::debug!(count = spots.len(), "Building forecasts for all spots");

    Ok(Json(state.forecaster.records_for_all(spots).await))
}

/// Parsed `/spots/{lat}/{long}/{radius}` parameters. Radius is in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSearch {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl GeoSearch {
    pub fn parse(center_lat: &str, center_long: &str, radius: &str) -> Result<Self> {
        let lat = parse_number("centerLat", center_lat)?;
        let long = parse_number("centerLong", center_long)?;
        let radius_km = parse_number("radius", radius)?;
        if radius_km < 0.0 {
            return Err(AppError::BadRequest(
                "Invalid 'radius' parameter: must not be negative".to_string(),
            ));
        }

        Ok(Self {
            center: GeoPoint::new(lat, long),
            radius_km,
        })
    }

    pub fn radius_m(&self) -> f64 {
        km_to_meters(self.radius_km)
    }
}

fn parse_number(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid '{}' parameter: {:?}", name, raw)))
}

/// First forecast record of each spot within the radius.
async fn search_spots_by_geo_location(
    State(state): State<Arc<AppState>>,
    Path((center_lat, center_long, radius)): Path<(String, String, String)>,
) -> Result<Json<Vec<SpotForecastRecord>>> {
    let search = GeoSearch::parse(&center_lat, &center_long, &radius)?;

    let spots = state
        .store
        .spots_within_radius(search.center, search.radius_m())
        .await?;

    tracing::debug!(
        lat = search.center.latitude,
        long = search.center.longitude,
        radius_km = search.radius_km,
        matches = spots.len(),
        "Geo search"
    );

    Ok(Json(state.forecaster.first_record_for_each(spots).await))
}

/// Spots in a city (exact match). No forecast attached.
async fn get_city_spots(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Spot>>> {
    Ok(Json(state.store.spots_by_city(&city).await?))
}

/// Spots whose name starts with the search text.
async fn spot_search(
    State(state): State<Arc<AppState>>,
    Path(search_text): Path<String>,
) -> Result<Json<Vec<Spot>>> {
    Ok(Json(
        state
            .store
            .search_spots(SpotSearchField::Name, &search_text)
            .await?,
    ))
}

/// Spots whose city starts with the search text.
async fn spot_city_search(
    State(state): State<Arc<AppState>>,
    Path(search_text): Path<String>,
) -> Result<Json<Vec<Spot>>> {
    Ok(Json(
        state
            .store
            .search_spots(SpotSearchField::City, &search_text)
            .await?,
    ))
}
