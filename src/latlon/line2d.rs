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
use crate::latlon::line::LineShape;
use crate::latlon::predicates::{canonical, on_segment, point_in_triangle, xy, XY};
use crate::latlon::query::Component2D;
use crate::latlon::rect::Rect;
use crate::latlon::relation::Relation;

/// Line2D is a polyline used as a query region. A line has no interior, so
/// nothing is ever Within it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line2D {
    line: LineShape,
}

impl Line2D {
    pub fn new(line: LineShape) -> Line2D {
        Line2D { line }
    }

    pub fn line(&self) -> &LineShape {
        &self.line
    }

    fn points(&self) -> impl Iterator<Item = XY> + '_ {
        self.line.vertices().iter().map(|v| xy(v.lon(), v.lat()))
    }

    // Reports whether the edge AB touches any edge of the line.
    fn crosses_edge(&self, a: XY, b: XY) -> bool {
        let mut points = self.points();
        let first = match points.next() {
            Some(p) => p,
            None => return false,
        };
        let mut crosser = EdgeCrosser::new_chain_edge_crosser(a, b, first);
        points.any(|d| crosser.chain_crossing_sign(d) != Crossing::DoNotCross)
    }
}

impl Component2D for Line2D {
    fn bound(&self) -> Rect {
        self.line.bound()
    }

    fn contains(&self, lat: f64, lon: f64) -> bool {
        let p = xy(lon, lat);
        let vs = self.line.vertices();
        vs.windows(2)
            .any(|w| on_segment(p, xy(w[0].lon(), w[0].lat()), xy(w[1].lon(), w[1].lat())))
    }

    fn relate_box(&self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Relation {
        let cell = Rect::from_bounds(min_lat, max_lat, min_lon, max_lon);
        if !self.bound().intersects(&cell) {
            return Relation::Disjoint;
        }
        // Each edge is tested as the canonical degenerate triangle, the same
        // way an indexed segment is tested against a box query.
        let vs = self.line.vertices();
        let touches = vs.windows(2).any(|w| {
            let (a, b) = canonical(xy(w[0].lon(), w[0].lat()), xy(w[1].lon(), w[1].lat()));
            cell.intersects_triangle(a.x, a.y, b.x, b.y, a.x, a.y)
        });
        if touches {
            Relation::Intersects
        } else {
            Relation::Disjoint
        }
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
        if self.crosses_edge(a, b) || self.crosses_edge(b, c) || self.crosses_edge(c, a) {
            return Relation::Intersects;
        }
        // The whole line may sit inside the triangle.
        if self.points().any(|p| point_in_triangle(p, a, b, c)) {
            return Relation::Intersects;
        }
        Relation::Disjoint
    }
}
