// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Surf spot model and coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// Accepts both the plain `{latitude, longitude}` form and the
/// `{_latitude, _longitude}` form Firebase clients emit for GeoPoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "_latitude")]
    pub latitude: f64,
    #[serde(alias = "_longitude")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// A surf spot document from the `Spots` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    pub coords: GeoPoint,
    /// Geohash of `coords`, indexed for radius queries. Never sent to clients.
    #[serde(default, skip_serializing)]
    pub geohash: Option<String>,
}
