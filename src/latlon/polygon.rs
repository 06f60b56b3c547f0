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

use crate::latlon::edge_crosser::EdgeCrosser;
use crate::latlon::edge_crossings::Crossing;
use crate::latlon::error::{OracleError, Result};
use crate::latlon::predicates::{point_in_triangle, xy, XY};
use crate::latlon::query::Component2D;
use crate::latlon::rect::Rect;
use crate::latlon::relation::Relation;
use crate::latlon::ring::Ring;

/// Polygon2D represents a shell with zero or more holes.
///
/// The interior of the polygon is the interior of the shell minus the
/// interiors of the holes. The boundary is closed: points on the shell, or
/// on a hole, are contained.
///
/// Polygons have the following restrictions:
///
///   - Every hole must lie inside the shell's bounding box.
///
///   - Holes may not cross the shell or each other. This is not checked;
///     relations against a polygon violating it are unspecified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon2D {
    shell: Ring,
    holes: Vec<Ring>,
}

impl Polygon2D {
    /// Creates a polygon from a shell and its holes.
    pub fn new(shell: Ring, holes: Vec<Ring>) -> Result<Polygon2D> {
        let bound = shell.bound();
        for (i, hole) in holes.iter().enumerate() {
            if !bound.contains(&hole.bound()) {
                return Err(OracleError::InvalidPolygon(format!(
                    "hole {} extends outside the shell",
                    i
                )));
            }
        }
        Ok(Polygon2D { shell, holes })
    }

    pub fn shell(&self) -> &Ring {
        &self.shell
    }

    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// Returns the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    // Reports whether the edge AB touches any ring edge.
    fn crosses_edge(&self, a: XY, b: XY) -> bool {
        self.rings().any(|ring| {
            let mut points = ring.closed_points();
            let first = match points.next() {
                Some(p) => p,
                None => return false,
            };
            let mut crosser = EdgeCrosser::new_chain_edge_crosser(a, b, first);
            points.any(|d| crosser.chain_crossing_sign(d) != Crossing::DoNotCross)
        })
    }

    // Reports whether any edge of the closed chain touches the polygon
    // boundary.
    fn crosses_chain(&self, chain: &[XY]) -> bool {
        (0..chain.len()).any(|i| self.crosses_edge(chain[i], chain[(i + 1) % chain.len()]))
    }

    // Reports whether any ring vertex lies in the triangle ABC.
    fn has_vertex_in_triangle(&self, a: XY, b: XY, c: XY) -> bool {
        self.rings()
            .any(|ring| ring.points().any(|p| point_in_triangle(p, a, b, c)))
    }

    // Classifies a region from how many of its corners the polygon
    // contains, whether its edges touch the boundary, and whether the
    // region holds a ring vertex.
    fn relate_corners(
        &self,
        inside: usize,
        total: usize,
        crosses: bool,
        holds_vertex: bool,
    ) -> Relation {
        if inside == total {
            if crosses || holds_vertex {
                Relation::Intersects
            } else {
                Relation::Within
            }
        } else if inside > 0 || crosses || holds_vertex {
            Relation::Intersects
        } else {
            Relation::Disjoint
        }
    }
}

impl Component2D for Polygon2D {
    fn bound(&self) -> Rect {
        self.shell.bound()
    }

    fn contains(&self, lat: f64, lon: f64) -> bool {
        if !self.shell.contains_point(lat, lon) {
            return false;
        }
        !self.holes.iter().any(|h| h.contains_interior(lat, lon))
    }

    fn relate_box(&self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Relation {
        let cell = Rect::from_bounds(min_lat, max_lat, min_lon, max_lon);
        if !self.bound().intersects(&cell) {
            return Relation::Disjoint;
        }
        let corners = [
            xy(min_lon, min_lat),
            xy(max_lon, min_lat),
            xy(max_lon, max_lat),
            xy(min_lon, max_lat),
        ];
        let inside = corners
            .iter()
            .filter(|c| self.contains(c.y, c.x))
            .count();
        let crosses = self.crosses_chain(&corners);
        let holds_vertex = self.rings().any(|ring| {
            ring.vertices()
                .iter()
                .any(|v| cell.contains_point(v.lat(), v.lon()))
        });
        self.relate_corners(inside, corners.len(), crosses, holds_vertex)
    }

    fn relate_triangle(&self, ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> Relation {
        let tri = Rect::from_bounds(
            ay.min(by).min(cy),
            ay.max(by).max(cy),
            ax.min(bx).min(cx),
            ax.max(bx).max(cx),
        );
        if !self.bound().intersects(&tri) {
            return Relation::Disjoint;
        }
        let (a, b, c) = (xy(ax, ay), xy(bx, by), xy(cx, cy));
        let inside = [a, b, c]
            .iter()
            .filter(|p| self.contains(p.y, p.x))
            .count();
        let crosses = self.crosses_chain(&[a, b, c]);
        let holds_vertex = self.has_vertex_in_triangle(a, b, c);
        self.relate_corners(inside, 3, crosses, holds_vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::line::LineShape;
    use crate::latlon::relation::{combine, QueryRelation};

    fn ring(coords: &[(f64, f64)]) -> Ring {
        let (lats, lons): (Vec<f64>, Vec<f64>) = coords.iter().cloned().unzip();
        Ring::from_lat_lons(&lats, &lons).unwrap()
    }

    fn square_with_hole() -> Polygon2D {
        let shell = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let hole = ring(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)]);
        Polygon2D::new(shell, vec![hole]).unwrap()
    }

    #[test]
    fn test_hole_outside_shell() {
        let shell = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let hole = ring(&[(4.0, 4.0), (4.0, 16.0), (6.0, 16.0)]);
        assert!(matches!(
            Polygon2D::new(shell, vec![hole]),
            Err(OracleError::InvalidPolygon(_))
        ));
    }

    #[test]
    fn test_contains() {
        let p = square_with_hole();
        assert!(p.contains(1.0, 1.0));
        assert!(p.contains(0.0, 5.0));
        assert!(!p.contains(5.0, 5.0));
        // The hole boundary belongs to the polygon.
        assert!(p.contains(4.0, 5.0));
        assert!(!p.contains(11.0, 5.0));
    }

    #[test]
    fn test_relate_segment() {
        let p = square_with_hole();
        assert_eq!(p.relate_triangle(1.0, 1.0, 3.0, 2.0, 1.0, 1.0), Relation::Within);
        // Passes through the hole.
        assert_eq!(p.relate_triangle(1.0, 5.0, 9.0, 5.0, 1.0, 5.0), Relation::Intersects);
        // Leaves the shell.
        assert_eq!(p.relate_triangle(5.0, 1.0, 15.0, 1.0, 5.0, 1.0), Relation::Intersects);
        // Inside the hole.
        assert_eq!(p.relate_triangle(4.5, 4.5, 5.5, 5.5, 4.5, 4.5), Relation::Disjoint);
        assert_eq!(p.relate_triangle(20.0, 20.0, 30.0, 30.0, 20.0, 20.0), Relation::Disjoint);
    }

    #[test]
    fn test_relate_triangle_around_polygon() {
        let p = square_with_hole();
        assert_eq!(
            p.relate_triangle(-100.0, -50.0, 100.0, -50.0, 0.0, 80.0),
            Relation::Intersects
        );
    }

    #[test]
    fn test_relate_box() {
        let p = square_with_hole();
        assert_eq!(p.relate_box(1.0, 2.0, 1.0, 2.0), Relation::Within);
        // Covers the hole without touching its edges.
        assert_eq!(p.relate_box(3.0, 7.0, 3.0, 7.0), Relation::Intersects);
        assert_eq!(p.relate_box(4.5, 5.5, 4.5, 5.5), Relation::Disjoint);
        assert_eq!(p.relate_box(-5.0, 15.0, -5.0, 15.0), Relation::Intersects);
        assert_eq!(p.relate_box(20.0, 30.0, 20.0, 30.0), Relation::Disjoint);
    }

    #[test]
    fn test_line_against_southern_polygon() {
        let p = Polygon2D::new(
            ring(&[(-60.0, -20.0), (-60.0, 40.0), (-10.0, 40.0), (-10.0, -20.0)]),
            vec![],
        )
        .unwrap();
        let line = LineShape::from_lat_lons(&[0.0, 10.0], &[0.0, 10.0]).unwrap();
        let relations: Vec<Relation> = line.segments().map(|s| s.relate(&p)).collect();
        assert_eq!(relations, vec![Relation::Disjoint]);
        assert!(combine(QueryRelation::Disjoint, relations.iter().cloned()));
        assert!(!combine(QueryRelation::Intersects, relations.iter().cloned()));
    }
}
