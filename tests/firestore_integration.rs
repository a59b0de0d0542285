// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore store tests. Require FIRESTORE_EMULATOR_HOST; skipped otherwise.

mod common;

use surfspot_api::db::{new_document_id, SpotSearchField, SpotStore};
use surfspot_api::models::{FavoriteSpot, GeoPoint, User};

fn favorite(user: &str, spot_id: &str) -> FavoriteSpot {
    FavoriteSpot {
        id: new_document_id(),
        fire_user_id: user.to_string(),
        spot_id: spot_id.to_string(),
        spot_name: "Rincon".to_string(),
        address: String::new(),
        city: "Carpinteria".to_string(),
        state: "CA".to_string(),
        country: "US".to_string(),
        coords: GeoPoint::new(34.37, -119.47),
    }
}

#[tokio::test]
async fn test_user_insert_and_lookup() {
    require_emulator!();
    let db = common::test_db().await;
    let auth_id = format!("auth-{}", new_document_id());

    let user = User {
        id: new_document_id(),
        name: "Kai".to_string(),
        email: "kai@example.com".to_string(),
        city: "Ventura".to_string(),
        auth_user_id: auth_id.clone(),
    };
    db.insert_user(&user).await.unwrap();

    let found = db.users_by_auth_id(&auth_id).await.unwrap();
    assert_eq!(found, vec![user]);
}

#[tokio::test]
async fn test_favorite_lifecycle() {
    require_emulator!();
    let db = common::test_db().await;
    let user = format!("user-{}", new_document_id());
    let fav = favorite(&user, "spot-1");

    db.insert_favorite(&fav).await.unwrap();

    assert_eq!(db.list_favorites(&user).await.unwrap(), vec![fav.clone()]);
    assert_eq!(
        db.get_user_favorite(&user, &fav.id).await.unwrap(),
        Some(fav.clone())
    );
    assert_eq!(db.get_favorite(&fav.id).await.unwrap(), Some(fav.clone()));
    assert_eq!(
        db.favorites_for_spot(&user, "spot-1").await.unwrap().len(),
        1
    );
    assert!(db
        .favorites_for_spot(&user, "spot-2")
        .await
        .unwrap()
        .is_empty());

    db.delete_favorite(&user, &fav.id).await.unwrap();
    assert!(db.get_user_favorite(&user, &fav.id).await.unwrap().is_none());
    assert!(db.list_favorites(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_spot_is_none() {
    require_emulator!();
    let db = common::test_db().await;

    assert!(db.get_spot(&new_document_id()).await.unwrap().is_none());
    // A prefix nothing starts with
    assert!(db
        .search_spots(SpotSearchField::Name, "zz-no-such-spot")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_offline_client_reports_database_error() {
    let db = surfspot_api::db::FirestoreDb::new_mock();

    let err = db.list_spots().await.unwrap_err();
    assert_eq!(err.code(), "database_error");
}
