// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store.
//!
//! Mirrors the Firestore query semantics the API depends on (ordering by
//! document id, inclusive range filters) so routes can run without a
//! database.

use crate::db::{SpotSearchField, SpotStore, PREFIX_END};
use crate::error::AppError;
use crate::models::{FavoriteSpot, Spot, User};
use crate::services::geo::{encode_geohash, GeohashRange, DEFAULT_GEOHASH_PRECISION};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryStore {
    spots: Arc<DashMap<String, Spot>>,
    /// Keyed by favorite id
    favorites: Arc<DashMap<String, FavoriteSpot>>,
    users: Arc<DashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a spot. A missing geohash is computed from the coords.
    pub fn put_spot(&self, mut spot: Spot) {
        if spot.geohash.is_none() {
            spot.geohash = Some(encode_geohash(spot.coords, DEFAULT_GEOHASH_PRECISION));
        }
        self.spots.insert(spot.id.clone(), spot);
    }

    fn spots_where(&self, pred: impl Fn(&Spot) -> bool) -> Vec<Spot> {
        let mut spots: Vec<Spot> = self
            .spots
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        spots.sort_by(|a, b| a.id.cmp(&b.id));
        spots
    }

    fn favorites_where(&self, pred: impl Fn(&FavoriteSpot) -> bool) -> Vec<FavoriteSpot> {
        let mut favorites: Vec<FavoriteSpot> = self
            .favorites
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        favorites.sort_by(|a, b| a.id.cmp(&b.id));
        favorites
    }
}

#[async_trait]
impl SpotStore for MemoryStore {
    async fn get_spot(&self, spot_id: &str) -> Result<Option<Spot>, AppError> {
        Ok(self.spots.get(spot_id).map(|entry| entry.value().clone()))
    }

    async fn list_spots(&self) -> Result<Vec<Spot>, AppError> {
        Ok(self.spots_where(|_| true))
    }

    async fn spots_by_city(&self, city: &str) -> Result<Vec<Spot>, AppError> {
        Ok(self.spots_where(|spot| spot.city == city))
    }

    async fn search_spots(
        &self,
        field: SpotSearchField,
        prefix: &str,
    ) -> Result<Vec<Spot>, AppError> {
        let upper = format!("{}{}", prefix, PREFIX_END);
        let mut spots = self.spots_where(|spot| {
            let value = field.value(spot);
            value >= prefix && value <= upper.as_str()
        });
        spots.sort_by(|a, b| field.value(a).cmp(field.value(b)));
        Ok(spots)
    }

    async fn spots_in_geohash_range(&self, range: &GeohashRange) -> Result<Vec<Spot>, AppError> {
        let mut spots = self.spots_where(|spot| {
            spot.geohash
                .as_deref()
                .is_some_and(|hash| range.contains(hash))
        });
        spots.sort_by(|a, b| a.geohash.cmp(&b.geohash));
        Ok(spots)
    }

    async fn list_favorites(&self, fire_user_id: &str) -> Result<Vec<FavoriteSpot>, AppError> {
        Ok(self.favorites_where(|fav| fav.fire_user_id == fire_user_id))
    }

    async fn get_favorite(&self, fav_spot_id: &str) -> Result<Option<FavoriteSpot>, AppError> {
        Ok(self
            .favorites
            .get(fav_spot_id)
            .map(|entry| entry.value().clone()))
    }

    async fn get_user_favorite(
        &self,
        fire_user_id: &str,
        fav_spot_id: &str,
    ) -> Result<Option<FavoriteSpot>, AppError> {
        Ok(self
            .favorites
            .get(fav_spot_id)
            .filter(|entry| entry.fire_user_id == fire_user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn favorites_for_spot(
        &self,
        fire_user_id: &str,
        spot_id: &str,
    ) -> Result<Vec<FavoriteSpot>, AppError> {
        Ok(self.favorites_where(|fav| fav.fire_user_id == fire_user_id && fav.spot_id == spot_id))
    }

    async fn insert_favorite(&self, favorite: &FavoriteSpot) -> Result<(), AppError> {
        self.favorites
            .insert(favorite.id.clone(), favorite.clone());
        Ok(())
    }

    async fn delete_favorite(
        &self,
        fire_user_id: &str,
        fav_spot_id: &str,
    ) -> Result<(), AppError> {
        self.favorites
            .remove_if(fav_spot_id, |_, fav| fav.fire_user_id == fire_user_id);
        Ok(())
    }

    async fn users_by_auth_id(&self, auth_user_id: &str) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.auth_user_id == auth_user_id)
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
