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

use crate::latlon::error::{OracleError, Result};
use crate::latlon::latlng::GeoPoint;
use crate::latlon::predicates::{on_segment, xy, XY};
use crate::latlon::rect::Rect;
use crate::latlon::shape::{Edge, Shape};

/// Ring represents a closed loop of edges surrounding an interior region.
/// The closing edge from the last vertex back to the first is implicit.
///
/// Like a lax loop, a ring allows duplicate vertices and self-touching edges;
/// containment is decided by crossing parity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring {
    vertices: Vec<GeoPoint>,
    bound: Rect,
}

impl Ring {
    /// Creates a Ring from the given points. A trailing copy of the first
    /// vertex (an explicitly closed ring) is dropped.
    pub fn new(mut vertices: Vec<GeoPoint>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(OracleError::TooFewVertices {
                kind: "ring",
                required: 3,
                actual: vertices.len(),
            });
        }
        let bound = Rect::from_points(&vertices);
        Ok(Ring { vertices, bound })
    }

    /// Creates a Ring from parallel latitude and longitude arrays.
    pub fn from_lat_lons(lats: &[f64], lons: &[f64]) -> Result<Self> {
        if lats.len() != lons.len() {
            return Err(OracleError::InvalidArgument(format!(
                "{} latitudes but {} longitudes",
                lats.len(),
                lons.len()
            )));
        }
        let vertices = lats
            .iter()
            .zip(lons)
            .map(|(&lat, &lon)| GeoPoint::new(lat, lon))
            .collect::<Result<Vec<_>>>()?;
        Ring::new(vertices)
    }

    /// Returns the vertex at the specified index.
    pub fn vertex(&self, i: usize) -> GeoPoint {
        self.vertices[i % self.vertices.len()]
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    pub(crate) fn points(&self) -> impl Iterator<Item = XY> + '_ {
        self.vertices.iter().map(|v| xy(v.lon(), v.lat()))
    }

    /// Iterates over the vertices followed by the first vertex again, so
    /// consecutive pairs walk every edge including the closing one.
    pub(crate) fn closed_points(&self) -> impl Iterator<Item = XY> + '_ {
        self.points().chain(self.points().take(1))
    }

    /// Reports whether p lies on the ring boundary.
    pub fn on_boundary(&self, lat: f64, lon: f64) -> bool {
        let p = xy(lon, lat);
        let n = self.vertices.len();
        (0..n).any(|i| {
            let e = self.edge(i);
            on_segment(p, xy(e.v0.lon(), e.v0.lat()), xy(e.v1.lon(), e.v1.lat()))
        })
    }

    /// Reports whether the point is inside the ring or on its boundary.
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        if !self.bound.contains_point(lat, lon) {
            return false;
        }
        self.on_boundary(lat, lon) || self.crossing_parity(lat, lon)
    }

    /// Reports whether the point is strictly inside the ring.
    pub fn contains_interior(&self, lat: f64, lon: f64) -> bool {
        if !self.bound.contains_point(lat, lon) {
            return false;
        }
        !self.on_boundary(lat, lon) && self.crossing_parity(lat, lon)
    }

    // Counts crossings of a ray cast from the point toward +longitude. Edges
    // are half-open in latitude so a ray through a vertex counts it once.
    fn crossing_parity(&self, lat: f64, lon: f64) -> bool {
        let mut inside = false;
        for e in self.edges() {
            let (y0, x0) = (e.v0.lat(), e.v0.lon());
            let (y1, x1) = (e.v1.lat(), e.v1.lon());
            if (y0 > lat) != (y1 > lat) {
                let x = x0 + (lat - y0) * (x1 - x0) / (y1 - y0);
                if lon < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

impl Shape for Ring {
    fn num_edges(&self) -> usize {
        self.vertices.len()
    }

    fn edge(&self, e: usize) -> Edge {
        Edge {
            v0: self.vertex(e),
            v1: self.vertex(e + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::from_lat_lons(&[0.0, 0.0, 10.0, 10.0], &[0.0, 10.0, 10.0, 0.0]).unwrap()
    }

    #[test]
    fn test_ring_new() {
        let ring = square();
        assert_eq!(ring.vertices().len(), 4);
        assert_eq!(ring.num_edges(), 4);
    }

    #[test]
    fn test_explicitly_closed_ring() {
        let lats = [0.0, 0.0, 10.0, 10.0, 0.0];
        let lons = [0.0, 10.0, 10.0, 0.0, 0.0];
        let ring = Ring::from_lat_lons(&lats, &lons).unwrap();
        assert_eq!(ring, square());
    }

    #[test]
    fn test_ring_edges() {
        let ring = square();
        // The last edge closes the ring.
        let e = ring.edge(3);
        assert_eq!(e.v0, ring.vertex(3));
        assert_eq!(e.v1, ring.vertex(0));
        assert_eq!(ring.closed_points().count(), 5);
    }

    #[test]
    fn test_too_few_vertices() {
        assert!(matches!(
            Ring::from_lat_lons(&[0.0, 1.0], &[0.0, 1.0]),
            Err(OracleError::TooFewVertices { required: 3, .. })
        ));
        assert!(Ring::from_lat_lons(&[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]).is_err());
    }

    #[test]
    fn test_contains_point() {
        let ring = square();
        assert!(ring.contains_point(5.0, 5.0));
        assert!(ring.contains_point(0.0, 5.0));
        assert!(ring.contains_point(10.0, 10.0));
        assert!(!ring.contains_point(5.0, 15.0));
        assert!(!ring.contains_point(-1.0, 5.0));

        assert!(ring.contains_interior(5.0, 5.0));
        assert!(!ring.contains_interior(0.0, 5.0));
    }

    #[test]
    fn test_contains_point_concave() {
        // A "U" shape open to the north.
        let ring = Ring::from_lat_lons(
            &[0.0, 0.0, 10.0, 10.0, 2.0, 2.0, 10.0, 10.0],
            &[0.0, 10.0, 10.0, 8.0, 8.0, 2.0, 2.0, 0.0],
        )
        .unwrap();
        assert!(ring.contains_point(1.0, 5.0));
        assert!(ring.contains_point(5.0, 1.0));
        assert!(!ring.contains_point(5.0, 5.0));
        // Ray passes exactly through vertices.
        assert!(ring.contains_point(2.0, 9.0));
        assert!(!ring.contains_point(2.0, 11.0));
    }
}
