// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geohash radius queries.
//!
//! A circle is covered by up to nine geohash prefix ranges (the cells under
//! the center and the eight corners/edges of its bounding box). Each range
//! is queried on the stored `geohash` field; the union is a superset of the
//! circle, so candidates must be post-filtered with [`is_within_radius`].

use crate::models::GeoPoint;
use geo::{Distance, Haversine};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";
const BITS_PER_CHAR: u32 = 5;
const MAXIMUM_BITS_PRECISION: u32 = 22 * BITS_PER_CHAR;
const EARTH_MERIDIONAL_CIRCUMFERENCE_M: f64 = 40_007_860.0;
const METERS_PER_DEGREE_LATITUDE: f64 = 110_574.0;
const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;
const EARTH_ECCENTRICITY_SQUARED: f64 = 0.006_694_478_197_99;
const EPSILON: f64 = 1e-12;

/// Default precision for stored spot geohashes.
pub const DEFAULT_GEOHASH_PRECISION: usize = 10;

/// Inclusive `[start, end]` bounds for a range query on the `geohash` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeohashRange {
    pub start: String,
    pub end: String,
}

impl GeohashRange {
    /// Whether a stored geohash falls inside this range.
    pub fn contains(&self, geohash: &str) -> bool {
        geohash >= self.start.as_str() && geohash <= self.end.as_str()
    }
}

/// Radius in kilometres (as clients send it) to metres.
pub fn km_to_meters(km: f64) -> f64 {
    km * 1000.0
}

/// Encode a location as a base-32 geohash of `precision` characters.
pub fn encode_geohash(location: GeoPoint, precision: usize) -> String {
    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut value = 0usize;
    let mut bits = 0;
    let mut even = true;

    while hash.len() < precision {
        let (coord, range) = if even {
            (location.longitude, &mut lon_range)
        } else {
            (location.latitude, &mut lat_range)
        };
        let mid = (range.0 + range.1) / 2.0;
        if coord > mid {
            value = (value << 1) + 1;
            range.0 = mid;
        } else {
            value <<= 1;
            range.1 = mid;
        }
        even = !even;

        if bits < 4 {
            bits += 1;
        } else {
            hash.push(BASE32[value] as char);
            bits = 0;
            value = 0;
        }
    }

    hash
}

/// Great-circle distance in metres.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Exact distance check that removes bounding-box false positives.
pub fn is_within_radius(point: GeoPoint, center: GeoPoint, radius_m: f64) -> bool {
    distance_meters(point, center) <= radius_m
}

/// Geohash ranges that together cover the circle around `center`.
///
/// Duplicate ranges are removed; order follows the bounding-box points
/// (center first).
pub fn bounds_for_radius(center: GeoPoint, radius_m: f64) -> Vec<GeohashRange> {
    let query_bits = bounding_box_bits(center, radius_m).max(1);
    let precision = query_bits.div_ceil(BITS_PER_CHAR) as usize;

    let mut ranges: Vec<GeohashRange> = Vec::with_capacity(9);
    for corner in bounding_box_points(center, radius_m) {
        let range = range_for_geohash(&encode_geohash(corner, precision), query_bits);
        if !ranges.contains(&range) {
            ranges.push(range);
        }
    }
    ranges
}

fn meters_to_longitude_degrees(distance: f64, latitude: f64) -> f64 {
    let radians = latitude.to_radians();
    let num = radians.cos() * EARTH_EQUATORIAL_RADIUS_M * std::f64::consts::PI / 180.0;
    let denom = 1.0 / (1.0 - EARTH_ECCENTRICITY_SQUARED * radians.sin() * radians.sin()).sqrt();
    let delta_deg = num * denom;
    if delta_deg < EPSILON {
        if distance > 0.0 {
            360.0
        } else {
            0.0
        }
    } else {
        (distance / delta_deg).min(360.0)
    }
}

fn longitude_bits_for_resolution(resolution: f64, latitude: f64) -> f64 {
    let degs = meters_to_longitude_degrees(resolution, latitude);
    if degs.abs() > 0.000_001 {
        (360.0 / degs).log2().max(1.0)
    } else {
        1.0
    }
}

fn latitude_bits_for_resolution(resolution: f64) -> f64 {
    (EARTH_MERIDIONAL_CIRCUMFERENCE_M / 2.0 / resolution)
        .log2()
        .min(MAXIMUM_BITS_PRECISION as f64)
}

fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let adjusted = longitude + 180.0;
    if adjusted > 0.0 {
        (adjusted % 360.0) - 180.0
    } else {
        180.0 - (-adjusted % 360.0)
    }
}

fn bounding_box_bits(center: GeoPoint, size: f64) -> u32 {
    let lat_delta = size / METERS_PER_DEGREE_LATITUDE;
    let north = (center.latitude + lat_delta).min(90.0);
    let south = (center.latitude - lat_delta).max(-90.0);
    let bits_lat = latitude_bits_for_resolution(size).floor() * 2.0;
    let bits_long_north = longitude_bits_for_resolution(size, north).floor() * 2.0 - 1.0;
    let bits_long_south = longitude_bits_for_resolution(size, south).floor() * 2.0 - 1.0;
    let bits = bits_lat
        .min(bits_long_north)
        .min(bits_long_south)
        .min(MAXIMUM_BITS_PRECISION as f64);
    if bits.is_finite() && bits > 0.0 {
        bits as u32
    } else {
        0
    }
}

fn bounding_box_points(center: GeoPoint, radius_m: f64) -> [GeoPoint; 9] {
    let lat_degrees = radius_m / METERS_PER_DEGREE_LATITUDE;
    let north = (center.latitude + lat_degrees).min(90.0);
    let south = (center.latitude - lat_degrees).max(-90.0);
    let long_degs = meters_to_longitude_degrees(radius_m, north)
        .max(meters_to_longitude_degrees(radius_m, south));
    let west = wrap_longitude(center.longitude - long_degs);
    let east = wrap_longitude(center.longitude + long_degs);

    [
        GeoPoint::new(center.latitude, center.longitude),
        GeoPoint::new(center.latitude, west),
        GeoPoint::new(center.latitude, east),
        GeoPoint::new(north, center.longitude),
        GeoPoint::new(north, west),
        GeoPoint::new(north, east),
        GeoPoint::new(south, center.longitude),
        GeoPoint::new(south, west),
        GeoPoint::new(south, east),
    ]
}

/// Range of geohashes sharing the first `bits` bits with `geohash`.
fn range_for_geohash(geohash: &str, bits: u32) -> GeohashRange {
    let precision = bits.div_ceil(BITS_PER_CHAR) as usize;
    if geohash.len() < precision {
        return GeohashRange {
            start: geohash.to_string(),
            end: format!("{}~", geohash),
        };
    }

    let hash = &geohash[..precision];
    let base = &hash[..hash.len() - 1];
    let last_char = hash.as_bytes()[hash.len() - 1];
    let last_value = BASE32.iter().position(|&c| c == last_char).unwrap_or(0);
    let significant_bits = bits - (base.len() as u32 * BITS_PER_CHAR);
    let unused_bits = BITS_PER_CHAR - significant_bits;

    let start_value = (last_value >> unused_bits) << unused_bits;
    let end_value = start_value + (1 << unused_bits);
    let start = format!("{}{}", base, BASE32[start_value] as char);
    let end = if end_value > 31 {
        format!("{}~", base)
    } else {
        format!("{}{}", base, BASE32[end_value] as char)
    };

    GeohashRange { start, end }
}
