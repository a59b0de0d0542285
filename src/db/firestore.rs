// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Spots (flat `Spots` collection with a `geohash` field)
//! - Favorite spots (`Users/{id}/FavoriteSpots` subcollection)
//! - Users (`Users` collection)
//!
//! `get_favorite` queries the `FavoriteSpots` collection group by its `id`
//! field. Firestore does not index collection groups by default, so the
//! project needs a single-field index exemption enabling collection-group
//! scope for `FavoriteSpots.id`:
//!
//! ```text
//! gcloud firestore indexes fields update id \
//!     --collection-group=FavoriteSpots \
//!     --index=order=ascending,query-scope=collection-group
//! ```

use crate::db::{collections, SpotSearchField, SpotStore, PREFIX_END};
use crate::error::AppError;
use crate::models::{FavoriteSpot, Spot, User};
use crate::services::geo::GeohashRange;
use async_trait::async_trait;
use firestore::{FirestoreGeoPoint, FirestoreLatLng, FirestoreQueryDirection};
use serde::{Deserialize, Serialize};

/// Stored form of a favorite. `coords` is written as a native Firestore
/// GeoPoint, the same type the `Spots` collection holds.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteSpotDocument {
    id: String,
    fire_user_id: String,
    spot_id: String,
    spot_name: String,
    address: String,
    city: String,
    state: String,
    country: String,
    coords: FirestoreLatLng,
}

impl From<&FavoriteSpot> for FavoriteSpotDocument {
    fn from(fav: &FavoriteSpot) -> Self {
        Self {
            id: fav.id.clone(),
            fire_user_id: fav.fire_user_id.clone(),
            spot_id: fav.spot_id.clone(),
            spot_name: fav.spot_name.clone(),
            address: fav.address.clone(),
            city: fav.city.clone(),
            state: fav.state.clone(),
            country: fav.country.clone(),
            coords: FirestoreLatLng(FirestoreGeoPoint {
                latitude: fav.coords.latitude,
                longitude: fav.coords.longitude,
            }),
        }
    }
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client. Every operation returns a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Path of `Users/{fire_user_id}`, parent of that user's favorites.
    fn user_path(&self, fire_user_id: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, fire_user_id)
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl SpotStore for FirestoreDb {
    // ─── Spot Operations ─────────────────────────────────────────

    async fn get_spot(&self, spot_id: &str) -> Result<Option<Spot>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SPOTS)
            .obj()
            .one(spot_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_spots(&self) -> Result<Vec<Spot>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SPOTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn spots_by_city(&self, city: &str) -> Result<Vec<Spot>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SPOTS)
            .filter(|q| q.field("city").eq(city))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn search_spots(
        &self,
        field: SpotSearchField,
        prefix: &str,
    ) -> Result<Vec<Spot>, AppError> {
        let name = field.as_str();
        let upper = format!("{}{}", prefix, PREFIX_END);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::SPOTS)
            .filter(|q| {
                q.for_all([
                    q.field(name).greater_than_or_equal(prefix),
                    q.field(name).less_than_or_equal(upper.as_str()),
                ])
            })
            .order_by([(name, FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn spots_in_geohash_range(&self, range: &GeohashRange) -> Result<Vec<Spot>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SPOTS)
            .filter(|q| {
                q.for_all([
                    q.field("geohash").greater_than_or_equal(range.start.as_str()),
                    q.field("geohash").less_than_or_equal(range.end.as_str()),
                ])
            })
            .order_by([("geohash", FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Favorite Operations ─────────────────────────────────────

    async fn list_favorites(&self, fire_user_id: &str) -> Result<Vec<FavoriteSpot>, AppError> {
        let parent = self.user_path(fire_user_id)?;

        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITE_SPOTS)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn get_favorite(&self, fav_spot_id: &str) -> Result<Option<FavoriteSpot>, AppError> {
        // Collection-group lookup: the owning user is not known here.
        let found: Vec<FavoriteSpot> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITE_SPOTS)
            .all_descendants()
            .filter(|q| q.field("id").eq(fav_spot_id))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(found.into_iter().next())
    }

    async fn get_user_favorite(
        &self,
        fire_user_id: &str,
        fav_spot_id: &str,
    ) -> Result<Option<FavoriteSpot>, AppError> {
        let parent = self.user_path(fire_user_id)?;

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FAVORITE_SPOTS)
            .parent(&parent)
            .obj()
            .one(fav_spot_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn favorites_for_spot(
        &self,
        fire_user_id: &str,
        spot_id: &str,
    ) -> Result<Vec<FavoriteSpot>, AppError> {
        let parent = self.user_path(fire_user_id)?;

        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITE_SPOTS)
            .parent(&parent)
            .filter(|q| q.field("spotId").eq(spot_id))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_favorite(&self, favorite: &FavoriteSpot) -> Result<(), AppError> {
        let parent = self.user_path(&favorite.fire_user_id)?;
        let document = FavoriteSpotDocument::from(favorite);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FAVORITE_SPOTS)
            .document_id(&favorite.id)
            .parent(&parent)
            .object(&document)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_favorite(
        &self,
        fire_user_id: &str,
        fav_spot_id: &str,
    ) -> Result<(), AppError> {
        let parent = self.user_path(fire_user_id)?;

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FAVORITE_SPOTS)
            .document_id(fav_spot_id)
            .parent(&parent)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    async fn users_by_auth_id(&self, auth_user_id: &str) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.field("authUserId").eq(auth_user_id))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
