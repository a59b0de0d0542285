// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod favorite;
pub mod forecast;
pub mod spot;
pub mod user;

pub use favorite::{FavoriteSpot, NewFavoriteSpot};
pub use forecast::{
    FavoriteForecastRecord, ForecastHour, ForecastRecord, SourceValues, SpotForecastRecord,
    TideEvent, TideType,
};
pub use spot::{GeoPoint, Spot};
pub use user::{NewUser, User};
