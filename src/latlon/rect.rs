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

use crate::consts::{MAX_LON_INCL, MIN_LON_INCL};
use crate::latlon::edge_crossings::segments_intersect;
use crate::latlon::encoding::{
    is_valid_latitude, is_valid_longitude, quantize_lat, quantize_lat_ceil, quantize_lon,
    quantize_lon_ceil,
};
use crate::latlon::error::{OracleError, Result};
use crate::latlon::latlng::GeoPoint;
use crate::latlon::predicates::{point_in_triangle, xy, XY};
use crate::latlon::query::Component2D;
use crate::latlon::relation::Relation;

/// Rect is a latitude/longitude bounding box.
///
/// A Rect whose min_lon is greater than its max_lon crosses the antimeridian:
/// it covers [min_lon, 180] and [-180, max_lon].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Split holds the one or two non-wrapping pieces of a Rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Split {
    Single(Rect),
    Wrapped([Rect; 2]),
}

impl Split {
    /// Returns the pieces; for a wrapped rect the western piece
    /// [-180, max_lon] comes first.
    pub fn pieces(&self) -> &[Rect] {
        match self {
            Split::Single(r) => std::slice::from_ref(r),
            Split::Wrapped(rs) => &rs[..],
        }
    }
}

impl Rect {
    /// Creates a Rect. min_lon may exceed max_lon (antimeridian crossing) but
    /// min_lat may not exceed max_lat.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Rect> {
        for &lat in &[min_lat, max_lat] {
            if !is_valid_latitude(lat) {
                return Err(OracleError::InvalidLatitude(lat));
            }
        }
        for &lon in &[min_lon, max_lon] {
            if !is_valid_longitude(lon) {
                return Err(OracleError::InvalidLongitude(lon));
            }
        }
        if min_lat > max_lat {
            return Err(OracleError::InvalidArgument(format!(
                "min latitude {} is above max latitude {}",
                min_lat, max_lat
            )));
        }
        Ok(Rect::from_bounds(min_lat, max_lat, min_lon, max_lon))
    }

    pub(crate) fn from_bounds(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Rect {
        Rect {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Returns the smallest non-wrapping Rect containing all points.
    ///
    /// points must not be empty.
    pub(crate) fn from_points(points: &[GeoPoint]) -> Rect {
        let mut r = Rect::from_bounds(f64::MAX, f64::MIN, f64::MAX, f64::MIN);
        for p in points {
            r.min_lat = r.min_lat.min(p.lat());
            r.max_lat = r.max_lat.max(p.lat());
            r.min_lon = r.min_lon.min(p.lon());
            r.max_lon = r.max_lon.max(p.lon());
        }
        r
    }

    /// Reports whether this rect crosses the antimeridian.
    pub fn is_wrapping(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Decomposes the rect into non-wrapping pieces.
    pub fn split(&self) -> Split {
        self.split_as(self.is_wrapping())
    }

    fn split_as(&self, wrapping: bool) -> Split {
        if !wrapping {
            return Split::Single(*self);
        }
        Split::Wrapped([
            Rect::from_bounds(self.min_lat, self.max_lat, MIN_LON_INCL, self.max_lon),
            Rect::from_bounds(self.min_lat, self.max_lat, self.min_lon, MAX_LON_INCL),
        ])
    }

    /// Snaps a query rect to the encoding grid without letting it grow:
    /// minimums round up and maximums round down. A range thinner than one
    /// grid cell collapses onto its maximum, unless the rect wraps.
    pub fn quantize(&self) -> QuantizedRect {
        let max_lat = quantize_lat(self.max_lat);
        let min_lat = quantize_lat_ceil(self.min_lat).min(max_lat);
        let max_lon = quantize_lon(self.max_lon);
        let mut min_lon = quantize_lon_ceil(self.min_lon);
        let wrapping = self.is_wrapping();
        if !wrapping && min_lon > max_lon {
            min_lon = max_lon;
        }
        QuantizedRect {
            bounds: Rect::from_bounds(min_lat, max_lat, min_lon, max_lon),
            wrapping,
        }
    }

    /// Reports whether the point is inside the rect, boundary included.
    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }
        if self.is_wrapping() {
            lon >= self.min_lon || lon <= self.max_lon
        } else {
            lon >= self.min_lon && lon <= self.max_lon
        }
    }

    /// Reports whether the non-wrapping rect other fits inside this rect.
    /// For a wrapping rect, other has to fit inside one of the two pieces.
    pub fn contains(&self, other: &Rect) -> bool {
        self.min_lat <= other.min_lat
            && self.max_lat >= other.max_lat
            && self
                .split()
                .pieces()
                .iter()
                .any(|p| p.min_lon <= other.min_lon && p.max_lon >= other.max_lon)
    }

    /// Reports whether the non-wrapping rect other shares a point with this rect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.split().pieces().iter().any(|p| {
            !(other.max_lat < p.min_lat
                || other.min_lat > p.max_lat
                || other.max_lon < p.min_lon
                || other.min_lon > p.max_lon)
        })
    }

    fn corners(&self) -> [XY; 4] {
        [
            xy(self.min_lon, self.min_lat),
            xy(self.max_lon, self.min_lat),
            xy(self.max_lon, self.max_lat),
            xy(self.min_lon, self.max_lat),
        ]
    }

    // Reports whether the segment AB touches this non-wrapping rect.
    fn intersects_edge(&self, a: XY, b: XY) -> bool {
        let c = self.corners();
        (0..4).any(|i| segments_intersect(a, b, c[i], c[(i + 1) % 4]))
    }

    /// Reports whether triangle ABC shares a point with this non-wrapping
    /// rect. Coordinates are x = longitude, y = latitude.
    pub(crate) fn intersects_triangle(
        &self,
        ax: f64,
        ay: f64,
        bx: f64,
        by: f64,
        cx: f64,
        cy: f64,
    ) -> bool {
        let tri = Rect::from_bounds(
            ay.min(by).min(cy),
            ay.max(by).max(cy),
            ax.min(bx).min(cx),
            ax.max(bx).max(cx),
        );
        if !self.intersects(&tri) {
            return false;
        }
        if self.contains_point(ay, ax) || self.contains_point(by, bx) || self.contains_point(cy, cx)
        {
            return true;
        }
        let (a, b, c) = (xy(ax, ay), xy(bx, by), xy(cx, cy));
        if self.intersects_edge(a, b) || self.intersects_edge(b, c) || self.intersects_edge(c, a) {
            return true;
        }
        // The rect can only be left now if it is inside the triangle.
        self.corners()
            .iter()
            .any(|&corner| point_in_triangle(corner, a, b, c))
    }

    fn relate_piece_box(&self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Relation {
        let cell = Rect::from_bounds(min_lat, max_lat, min_lon, max_lon);
        if !self.intersects(&cell) {
            Relation::Disjoint
        } else if self.contains(&cell) {
            Relation::Within
        } else {
            Relation::Intersects
        }
    }

    fn relate_piece_triangle(
        &self,
        ax: f64,
        ay: f64,
        bx: f64,
        by: f64,
        cx: f64,
        cy: f64,
    ) -> Relation {
        if !self.intersects_triangle(ax, ay, bx, by, cx, cy) {
            Relation::Disjoint
        } else if self.contains_point(ay, ax)
            && self.contains_point(by, bx)
            && self.contains_point(cy, cx)
        {
            Relation::Within
        } else {
            Relation::Intersects
        }
    }
}

/// QuantizedRect is a query Rect snapped onto the encoding grid.
///
/// Wrapping is taken from the raw rect. Both longitude ends saturate at the
/// top of the grid when they lie within one cell of 180, so a wrapping rect
/// such as [180, 179.99999999999997] snaps to equal bounds and still covers
/// every longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizedRect {
    bounds: Rect,
    wrapping: bool,
}

impl QuantizedRect {
    /// Returns the snapped bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrapping
    }

    /// Decomposes the snapped rect into non-wrapping pieces; for a wrapping
    /// rect the western piece comes first.
    pub fn split(&self) -> Split {
        self.bounds.split_as(self.wrapping)
    }

    /// Reports whether the non-wrapping rect other fits inside one piece.
    pub fn contains(&self, other: &Rect) -> bool {
        self.split().pieces().iter().any(|p| p.contains(other))
    }
}

// A cell that touches both pieces of a wrapping rect is split by the gap
// between them, so it can only be Within a single piece.
fn merge_pieces(first: Relation, second: Relation) -> Relation {
    match (first, second) {
        (Relation::Disjoint, r) | (r, Relation::Disjoint) => r,
        _ => Relation::Intersects,
    }
}

impl Component2D for Rect {
    fn bound(&self) -> Rect {
        *self
    }

    fn contains(&self, lat: f64, lon: f64) -> bool {
        self.contains_point(lat, lon)
    }

    fn relate_box(&self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Relation {
        match self.split() {
            Split::Single(r) => r.relate_piece_box(min_lat, max_lat, min_lon, max_lon),
            Split::Wrapped([west, east]) => merge_pieces(
                west.relate_piece_box(min_lat, max_lat, min_lon, max_lon),
                east.relate_piece_box(min_lat, max_lat, min_lon, max_lon),
            ),
        }
    }

    fn relate_triangle(&self, ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> Relation {
        match self.split() {
            Split::Single(r) => r.relate_piece_triangle(ax, ay, bx, by, cx, cy),
            Split::Wrapped([west, east]) => merge_pieces(
                west.relate_piece_triangle(ax, ay, bx, by, cx, cy),
                east.relate_piece_triangle(ax, ay, bx, by, cx, cy),
            ),
        }
    }
}
