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

use crate::latlon::line2d::Line2D;
use crate::latlon::polygon::Polygon2D;
use crate::latlon::rect::Rect;
use crate::latlon::relation::Relation;
use std::fmt;

/// Component2D is the relation primitive of a query region.
///
/// Coordinates passed to relate_triangle are x = longitude, y = latitude.
/// Results describe the box or triangle relative to the query:
/// Disjoint (outside), Intersects (crosses) or Within (inside).
#[enum_delegate::register]
pub trait Component2D {
    /// Returns a bounding box of the query region.
    fn bound(&self) -> Rect;

    /// Reports whether the point is in the query region.
    fn contains(&self, lat: f64, lon: f64) -> bool;

    /// Relates a non-wrapping box to the query region.
    fn relate_box(&self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Relation;

    /// Relates the triangle ABC to the query region. A triangle with c == a
    /// stands for the segment AB.
    fn relate_triangle(&self, ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> Relation;
}

/// QueryShape is the region a search is run against.
#[enum_delegate::implement(Component2D)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryShape {
    BoundingBox(Rect),
    Line(Line2D),
    Polygon(Polygon2D),
}

impl QueryShape {
    /// Short name of the query kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryShape::BoundingBox(_) => "box",
            QueryShape::Line(_) => "line",
            QueryShape::Polygon(_) => "polygon",
        }
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryShape::BoundingBox(r) => write!(
                f,
                "box(minLat={}, maxLat={}, minLon={}, maxLon={})",
                r.min_lat, r.max_lat, r.min_lon, r.max_lon
            ),
            QueryShape::Line(l) => write!(f, "line{:?}", l.line().vertices()),
            QueryShape::Polygon(p) => {
                write!(f, "polygon(shell={:?}", p.shell().vertices())?;
                for hole in p.holes() {
                    write!(f, ", hole={:?}", hole.vertices())?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::line::LineShape;
    use crate::latlon::ring::Ring;

    #[test]
    fn test_delegation() {
        let r = Rect::new(0.0, 10.0, 0.0, 10.0).unwrap();
        let q = QueryShape::BoundingBox(r);
        assert_eq!(q.kind(), "box");
        assert_eq!(q.bound(), r);
        assert!(q.contains(5.0, 5.0));
        assert_eq!(
            q.relate_triangle(1.0, 1.0, 2.0, 2.0, 1.0, 1.0),
            r.relate_triangle(1.0, 1.0, 2.0, 2.0, 1.0, 1.0)
        );

        let line = LineShape::from_lat_lons(&[0.0, 10.0], &[0.0, 10.0]).unwrap();
        let q = QueryShape::Line(Line2D::new(line));
        assert_eq!(q.kind(), "line");
        assert!(q.contains(5.0, 5.0));
        assert_eq!(q.relate_box(-1.0, 1.0, -1.0, 1.0), Relation::Intersects);

        let shell = Ring::from_lat_lons(&[0.0, 0.0, 10.0, 10.0], &[0.0, 10.0, 10.0, 0.0]).unwrap();
        let q = QueryShape::Polygon(Polygon2D::new(shell, vec![]).unwrap());
        assert_eq!(q.kind(), "polygon");
        assert_eq!(q.relate_box(1.0, 2.0, 1.0, 2.0), Relation::Within);
    }

    #[test]
    fn test_display() {
        let q = QueryShape::BoundingBox(Rect::new(0.0, 20.0, 170.0, -170.0).unwrap());
        assert_eq!(
            q.to_string(),
            "box(minLat=0, maxLat=20, minLon=170, maxLon=-170)"
        );
    }
}
