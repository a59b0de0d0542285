// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite spot routes.

use crate::db::new_document_id;
use crate::error::{AppError, Result};
use crate::models::{FavoriteForecastRecord, FavoriteSpot, NewFavoriteSpot};
use crate::routes::{json_body, StatusResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Path parameters under `/favoriteSpot` share names across routes, so
/// handlers read them positionally: `{id}` is a favorite id on its own and
/// the user id when followed by `{sub_id}`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favoriteSpots/{fire_user_id}", get(get_user_favorite_spots))
        .route("/favoriteSpot", post(add_favorite_spot))
        .route("/favoriteSpot/{id}", get(get_favorite_spot))
        .route(
            "/favoriteSpot/{id}/{sub_id}",
            get(get_favorite_spot_by_spot_id).delete(delete_favorite_spot),
        )
}

/// All of a user's favorites, each merged with its forecast.
async fn get_user_favorite_spots(
    State(state): State<Arc<AppState>>,
    Path(fire_user_id): Path<String>,
) -> Result<Json<Vec<FavoriteForecastRecord>>> {
    let favorites = state.store.list_favorites(&fire_user_id).await?;
    tracing::debug!(
        fire_user_id = %fire_user_id,
        count = favorites.len(),
        "Building forecasts for favorites"
    );

    Ok(Json(state.forecaster.records_for_all(favorites).await))
}

/// One favorite by its own id.
async fn get_favorite_spot(
    State(state): State<Arc<AppState>>,
    Path(fav_spot_id): Path<String>,
) -> Result<Json<FavoriteSpot>> {
    state
        .store
        .get_favorite(&fav_spot_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Favorite spot {} not found", fav_spot_id)))
}

/// A user's favorites of one spot (usually zero or one).
async fn get_favorite_spot_by_spot_id(
    State(state): State<Arc<AppState>>,
    Path((fire_user_id, spot_id)): Path<(String, String)>,
) -> Result<Json<Vec<FavoriteSpot>>> {
    Ok(Json(
        state
            .store
            .favorites_for_spot(&fire_user_id, &spot_id)
            .await?,
    ))
}

async fn add_favorite_spot(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<NewFavoriteSpot>, JsonRejection>,
) -> Result<Json<StatusResponse<FavoriteSpot>>> {
    let favorite = json_body(body)?.into_favorite(new_document_id());

    state.store.insert_favorite(&favorite).await?;
    tracing::info!(
        fire_user_id = %favorite.fire_user_id,
        spot_id = %favorite.spot_id,
        favorite_id = %favorite.id,
        "Favorite spot added"
    );

    Ok(Json(StatusResponse::success(
        "Spot added successfully",
        Some(favorite),
    )))
}

async fn delete_favorite_spot(
    State(state): State<Arc<AppState>>,
    Path((fire_user_id, fav_spot_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse<()>>> {
    if state
        .store
        .get_user_favorite(&fire_user_id, &fav_spot_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Favorite spot {} not found for user {}",
            fav_spot_id, fire_user_id
        )));
    }

    state
        .store
        .delete_favorite(&fire_user_id, &fav_spot_id)
        .await?;
    tracing::info!(
        fire_user_id = %fire_user_id,
        favorite_id = %fav_spot_id,
        "Favorite spot removed"
    );

    Ok(Json(StatusResponse::success(
        "Spot removed from Favorites.",
        None,
    )))
}
