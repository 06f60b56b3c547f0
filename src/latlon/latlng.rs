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

use crate::consts::{MAX_LAT_INCL, MAX_LON_INCL, MIN_LAT_INCL, MIN_LON_INCL};
use crate::latlon::encoding::{
    decode_latitude, decode_longitude, encode_latitude, encode_longitude, is_valid_latitude,
    is_valid_longitude,
};
use crate::latlon::error::{OracleError, Result};
use std::fmt;

/// GeoPoint is a latitude/longitude pair in degrees.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a GeoPoint, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lon: f64) -> Result<GeoPoint> {
        if !is_valid_latitude(lat) {
            return Err(OracleError::InvalidLatitude(lat));
        }
        if !is_valid_longitude(lon) {
            return Err(OracleError::InvalidLongitude(lon));
        }
        Ok(GeoPoint { lat, lon })
    }

    /// Creates a GeoPoint, pulling out-of-range coordinates onto the
    /// nearest valid value.
    pub(crate) fn clamped(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint {
            lat: lat.clamp(MIN_LAT_INCL, MAX_LAT_INCL),
            lon: lon.clamp(MIN_LON_INCL, MAX_LON_INCL),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns the grid point this GeoPoint is indexed at.
    pub fn quantize(&self) -> QuantizedPoint {
        QuantizedPoint {
            lat: encode_latitude(self.lat),
            lon: encode_longitude(self.lon),
        }
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lon)
    }
}

/// QuantizedPoint is a GeoPoint snapped to the encoding grid.
///
/// The derived ordering compares latitude first and longitude second, which
/// is the canonical order used for segment endpoints.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantizedPoint {
    lat: i32,
    lon: i32,
}

impl QuantizedPoint {
    pub fn from_encoded(lat: i32, lon: i32) -> QuantizedPoint {
        QuantizedPoint { lat, lon }
    }

    pub fn encoded_lat(&self) -> i32 {
        self.lat
    }

    pub fn encoded_lon(&self) -> i32 {
        self.lon
    }

    /// Decoded latitude of the grid point.
    pub fn lat(&self) -> f64 {
        decode_latitude(self.lat)
    }

    /// Decoded longitude of the grid point.
    pub fn lon(&self) -> f64 {
        decode_longitude(self.lon)
    }

    /// Returns the grid point as a GeoPoint. Re-quantizing it gives back self.
    pub fn to_geo_point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat(),
            lon: self.lon(),
        }
    }
}

impl From<GeoPoint> for QuantizedPoint {
    fn from(p: GeoPoint) -> Self {
        p.quantize()
    }
}

impl fmt::Debug for QuantizedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat(), self.lon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(OracleError::InvalidLatitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(OracleError::InvalidLongitude(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_clamped() {
        let p = GeoPoint::clamped(90.5, -181.0);
        assert_eq!(p.lat(), 90.0);
        assert_eq!(p.lon(), -180.0);
        assert_eq!(GeoPoint::clamped(1.5, 2.5), GeoPoint::new(1.5, 2.5).unwrap());
    }

    #[test]
    fn test_quantize_round_trip() {
        let p = GeoPoint::new(37.774_929, -122.419_416).unwrap();
        let q = p.quantize();
        assert!(q.lat() <= p.lat());
        assert!(q.lon() <= p.lon());
        assert_eq!(q.to_geo_point().quantize(), q);
    }

    #[test]
    fn test_quantized_order_is_lat_then_lon() {
        let a = QuantizedPoint::from_encoded(1, 50);
        let b = QuantizedPoint::from_encoded(2, -50);
        let c = QuantizedPoint::from_encoded(2, 10);
        assert!(a < b);
        assert!(b < c);
    }
}
