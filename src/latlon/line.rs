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

use crate::latlon::encoding::{quantize_lat, quantize_lon};
use crate::latlon::error::{OracleError, Result};
use crate::latlon::latlng::GeoPoint;
use crate::latlon::rect::Rect;
use crate::latlon::segment::Segments;
use crate::latlon::shape::{Edge, Shape};

/// LineShape is an ordered chain of at least two vertices.
///
/// The bound is computed over the raw coordinates. Since quantization is
/// monotonic, quantizing the bound's extremes gives the bound of the
/// quantized vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineShape {
    vertices: Vec<GeoPoint>,
    bound: Rect,
}

impl LineShape {
    /// Creates a line from its vertices.
    pub fn new(vertices: Vec<GeoPoint>) -> Result<LineShape> {
        if vertices.len() < 2 {
            return Err(OracleError::TooFewVertices {
                kind: "line",
                required: 2,
                actual: vertices.len(),
            });
        }
        let bound = Rect::from_points(&vertices);
        Ok(LineShape { vertices, bound })
    }

    /// Creates a line from parallel latitude and longitude arrays.
    pub fn from_lat_lons(lats: &[f64], lons: &[f64]) -> Result<LineShape> {
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
        LineShape::new(vertices)
    }

    pub fn num_points(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, i: usize) -> GeoPoint {
        self.vertices[i]
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Bounding box of the raw vertices.
    pub fn bound(&self) -> Rect {
        self.bound
    }

    /// Bounding box of the vertices as they are indexed.
    pub fn quantized_bound(&self) -> Rect {
        Rect::from_bounds(
            quantize_lat(self.bound.min_lat),
            quantize_lat(self.bound.max_lat),
            quantize_lon(self.bound.min_lon),
            quantize_lon(self.bound.max_lon),
        )
    }

    /// Returns the same line snapped to the encoding grid.
    pub fn quantize(&self) -> LineShape {
        let vertices: Vec<GeoPoint> = self
            .vertices
            .iter()
            .map(|v| v.quantize().to_geo_point())
            .collect();
        let bound = Rect::from_points(&vertices);
        LineShape { vertices, bound }
    }

    /// Returns the same line traversed in the opposite direction.
    pub fn reversed(&self) -> LineShape {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        LineShape {
            vertices,
            bound: self.bound,
        }
    }

    /// Iterates over the canonical quantized segments of this line.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self)
    }
}

impl Shape for LineShape {
    fn num_edges(&self) -> usize {
        self.vertices.len() - 1
    }

    fn edge(&self, i: usize) -> Edge {
        Edge {
            v0: self.vertices[i],
            v1: self.vertices[i + 1],
        }
    }
}
