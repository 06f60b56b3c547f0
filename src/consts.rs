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

/// Minimum latitude, inclusive.
pub const MIN_LAT_INCL: f64 = -90.0;
/// Maximum latitude, inclusive.
pub const MAX_LAT_INCL: f64 = 90.0;
/// Minimum longitude, inclusive.
pub const MIN_LON_INCL: f64 = -180.0;
/// Maximum longitude, inclusive.
pub const MAX_LON_INCL: f64 = 180.0;

// Both axes are spread over the full range of a 32-bit signed integer.
const GRID_CELLS: f64 = (1u64 << 32) as f64;

/// Width of one latitude grid cell, in degrees.
pub const LAT_DECODE: f64 = 180.0 / GRID_CELLS;
/// Width of one longitude grid cell, in degrees.
pub const LON_DECODE: f64 = 360.0 / GRID_CELLS;

/// Encoded value of MIN_LAT_INCL.
pub const MIN_LAT_ENCODED: i32 = i32::MIN;
/// Largest encodable latitude cell. +90 itself lands here.
pub const MAX_LAT_ENCODED: i32 = i32::MAX;
/// Encoded value of MIN_LON_INCL.
pub const MIN_LON_ENCODED: i32 = i32::MIN;
/// Largest encodable longitude cell. +180 itself lands here.
pub const MAX_LON_ENCODED: i32 = i32::MAX;
