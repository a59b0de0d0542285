//! Record store gateway (Firestore, or in-memory for tests and local runs).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{FavoriteSpot, GeoPoint, Spot, User};
use crate::services::geo::{bounds_for_radius, is_within_radius, GeohashRange};
use async_trait::async_trait;
use std::collections::HashSet;

/// Collection names as constants.
pub mod collections {
    pub const SPOTS: &str = "Spots";
    pub const USERS: &str = "Users";
    /// Subcollection of each `Users/{id}` document
    pub const FAVORITE_SPOTS: &str = "FavoriteSpots";
}

/// Upper bound appended to a prefix for "starts with" range queries.
pub const PREFIX_END: char = '\u{f8ff}';

/// Spot field usable for prefix search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotSearchField {
    Name,
    City,
}

impl SpotSearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotSearchField::Name => "name",
            SpotSearchField::City => "city",
        }
    }

    pub fn value<'a>(&self, spot: &'a Spot) -> &'a str {
        match self {
            SpotSearchField::Name => &spot.name,
            SpotSearchField::City => &spot.city,
        }
    }
}

/// Document store operations the API relies on.
#[async_trait]
pub trait SpotStore: Send + Sync {
    // ─── Spots ───────────────────────────────────────────────────

    async fn get_spot(&self, spot_id: &str) -> Result<Option<Spot>, AppError>;

    async fn list_spots(&self) -> Result<Vec<Spot>, AppError>;

    /// Spots whose `city` equals `city` exactly.
    async fn spots_by_city(&self, city: &str) -> Result<Vec<Spot>, AppError>;

    /// Spots whose `field` starts with `prefix`, ordered by that field.
    async fn search_spots(
        &self,
        field: SpotSearchField,
        prefix: &str,
    ) -> Result<Vec<Spot>, AppError>;

    /// Spots whose stored geohash lies in `range`, ordered by geohash.
    async fn spots_in_geohash_range(&self, range: &GeohashRange) -> Result<Vec<Spot>, AppError>;

    /// Spots within `radius_m` metres of `center`.
    ///
    /// Range queries run concurrently; candidates are de-duplicated and
    /// filtered by exact distance.
    async fn spots_within_radius(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<Spot>, AppError> {
        let ranges = bounds_for_radius(center, radius_m);
        let batches = futures_util::future::try_join_all(
            ranges.iter().map(|range| self.spots_in_geohash_range(range)),
        )
        .await?;

        let candidates: usize = batches.iter().map(Vec::len).sum();
        let mut seen = HashSet::new();
        let matches: Vec<Spot> = batches
            .into_iter()
            .flatten()
            .filter(|spot| is_within_radius(spot.coords, center, radius_m))
            .filter(|spot| seen.insert(spot.id.clone()))
            .collect();

        tracing::debug!(
            ranges = ranges.len(),
            candidates,
            matches = matches.len(),
            "Geo radius query"
        );
        Ok(matches)
    }

    // ─── Favorites ───────────────────────────────────────────────

    async fn list_favorites(&self, fire_user_id: &str) -> Result<Vec<FavoriteSpot>, AppError>;

    /// Look a favorite up by its own id, whichever user owns it.
    async fn get_favorite(&self, fav_spot_id: &str) -> Result<Option<FavoriteSpot>, AppError>;

    async fn get_user_favorite(
        &self,
        fire_user_id: &str,
        fav_spot_id: &str,
    ) -> Result<Option<FavoriteSpot>, AppError>;

    async fn favorites_for_spot(
        &self,
        fire_user_id: &str,
        spot_id: &str,
    ) -> Result<Vec<FavoriteSpot>, AppError>;

    async fn insert_favorite(&self, favorite: &FavoriteSpot) -> Result<(), AppError>;

    async fn delete_favorite(&self, fire_user_id: &str, fav_spot_id: &str)
        -> Result<(), AppError>;

    // ─── Users ───────────────────────────────────────────────────

    async fn users_by_auth_id(&self, auth_user_id: &str) -> Result<Vec<User>, AppError>;

    async fn insert_user(&self, user: &User) -> Result<(), AppError>;
}

/// New random document id.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
