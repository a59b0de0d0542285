// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::db::new_document_id;
use crate::error::Result;
use crate::models::{NewUser, User};
use crate::routes::{json_body, StatusResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/{auth_user_id}", get(get_user))
        .route("/user", post(add_user))
}

/// Users linked to an external auth identity. Empty when none.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(auth_user_id): Path<String>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.store.users_by_auth_id(&auth_user_id).await?))
}

async fn add_user(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<StatusResponse<User>>> {
    let user = json_body(body)?.into_user(new_document_id());

    state.store.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, "User added");

    Ok(Json(StatusResponse::success(
        "User added successfully",
        Some(user),
    )))
}
