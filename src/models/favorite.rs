// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Favorite spot bookmarks (stored under `Users/{id}/FavoriteSpots`).

use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// A user's bookmark of a spot, with a copy of the spot's descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSpot {
    pub id: String,
    pub fire_user_id: String,
    pub spot_id: String,
    pub spot_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub coords: GeoPoint,
}

/// Request body for creating a favorite. Any client-supplied `id` is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavoriteSpot {
    pub fire_user_id: String,
    pub spot_id: String,
    pub spot_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub coords: GeoPoint,
}

impl NewFavoriteSpot {
    pub fn into_favorite(self, id: String) -> FavoriteSpot {
        FavoriteSpot {
            id,
            fire_user_id: self.fire_user_id,
            spot_id: self.spot_id,
            spot_name: self.spot_name,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            coords: GeoPoint::new(self.coords.latitude, self.coords.longitude),
        }
    }
}
