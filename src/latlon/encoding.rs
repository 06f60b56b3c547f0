// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-precision encoding of latitude and longitude.
//!
//! Each axis is mapped onto the full range of an `i32`. Shapes are encoded by
//! taking the grid cell that contains the coordinate (floor). Query minimums
//! use the ceil variants so a quantized query never grows past its raw bounds.
//! Quantizing means encoding and decoding again, which is idempotent: a
//! decoded value is already a grid point.

use crate::consts::{
    LAT_DECODE, LON_DECODE, MAX_LAT_INCL, MAX_LON_INCL, MIN_LAT_INCL, MIN_LON_INCL,
};

/// Reports whether lat is a valid latitude in degrees.
pub fn is_valid_latitude(lat: f64) -> bool {
    // NaN fails both comparisons.
    lat >= MIN_LAT_INCL && lat <= MAX_LAT_INCL
}

/// Reports whether lon is a valid longitude in degrees.
pub fn is_valid_longitude(lon: f64) -> bool {
    lon >= MIN_LON_INCL && lon <= MAX_LON_INCL
}

fn check_latitude(lat: f64) {
    assert!(
        is_valid_latitude(lat),
        "invalid latitude {}; must be between -90.0 and 90.0",
        lat
    );
}

fn check_longitude(lon: f64) {
    assert!(
        is_valid_longitude(lon),
        "invalid longitude {}; must be between -180.0 and 180.0",
        lon
    );
}

// The upper bound of each axis cannot be encoded without overflowing the
// grid, so it is moved one ulp toward zero first.
fn clip_max(coord: f64, max: f64) -> f64 {
    if coord == max {
        float_extras::f64::nextafter(coord, 0.0)
    } else {
        coord
    }
}

fn to_grid(cell: f64) -> i32 {
    // `as` saturates, which is exactly the clamp wanted at the top of the grid.
    cell as i32
}

/// Encodes a latitude onto the grid cell containing it.
///
/// # Panics
///
/// Panics if lat is outside [-90, 90].
pub fn encode_latitude(lat: f64) -> i32 {
    check_latitude(lat);
    to_grid(libm::floor(clip_max(lat, MAX_LAT_INCL) / LAT_DECODE))
}

/// Encodes a latitude onto the first grid point at or above it.
///
/// # Panics
///
/// Panics if lat is outside [-90, 90].
pub fn encode_latitude_ceil(lat: f64) -> i32 {
    check_latitude(lat);
    to_grid(libm::ceil(clip_max(lat, MAX_LAT_INCL) / LAT_DECODE))
}

/// Encodes a longitude onto the grid cell containing it.
///
/// # Panics
///
/// Panics if lon is outside [-180, 180].
pub fn encode_longitude(lon: f64) -> i32 {
    check_longitude(lon);
    to_grid(libm::floor(clip_max(lon, MAX_LON_INCL) / LON_DECODE))
}

/// Encodes a longitude onto the first grid point at or above it.
///
/// # Panics
///
/// Panics if lon is outside [-180, 180].
pub fn encode_longitude_ceil(lon: f64) -> i32 {
    check_longitude(lon);
    to_grid(libm::ceil(clip_max(lon, MAX_LON_INCL) / LON_DECODE))
}

pub fn decode_latitude(encoded: i32) -> f64 {
    encoded as f64 * LAT_DECODE
}

pub fn decode_longitude(encoded: i32) -> f64 {
    encoded as f64 * LON_DECODE
}

/// Returns the grid value used for lat in an indexed shape.
pub fn quantize_lat(lat: f64) -> f64 {
    decode_latitude(encode_latitude(lat))
}

pub fn quantize_lat_ceil(lat: f64) -> f64 {
    decode_latitude(encode_latitude_ceil(lat))
}

/// Returns the grid value used for lon in an indexed shape.
pub fn quantize_lon(lon: f64) -> f64 {
    decode_longitude(encode_longitude(lon))
}

pub fn quantize_lon_ceil(lon: f64) -> f64 {
    decode_longitude(encode_longitude_ceil(lon))
}
