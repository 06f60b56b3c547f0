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

//! Planar predicates over (x, y) = (longitude, latitude) points.

use cgmath::Vector2;
use std::cmp::Ordering;
use std::ops::Neg;

/// XY is a planar point with x = longitude and y = latitude.
pub type XY = Vector2<f64>;

#[inline]
pub fn xy(x: f64, y: f64) -> XY {
    Vector2::new(x, y)
}

/// Direction is the orientation of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    Indeterminate,
    CounterClockwise,
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::Indeterminate => Direction::Indeterminate,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Returns the orientation of the triangle ABC. Collinear (or coincident)
/// points are Indeterminate.
pub fn orient(a: XY, b: XY, c: XY) -> Direction {
    let det = (b - a).perp_dot(c - a);
    if det > 0.0 {
        Direction::CounterClockwise
    } else if det < 0.0 {
        Direction::Clockwise
    } else {
        Direction::Indeterminate
    }
}

/// Orders points by y, then x. This is the latitude-first order used for
/// segment canonicalization.
pub fn cmp_yx(a: &XY, b: &XY) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Returns (a, b) ordered so that the smaller point under cmp_yx is first.
pub fn canonical(a: XY, b: XY) -> (XY, XY) {
    if cmp_yx(&a, &b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Reports whether p lies inside the axis-aligned box spanned by a and b.
#[inline]
pub fn in_span(p: XY, a: XY, b: XY) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Reports whether p lies on the closed segment AB.
pub fn on_segment(p: XY, a: XY, b: XY) -> bool {
    let (a, b) = canonical(a, b);
    in_span(p, a, b) && orient(a, b, p) == Direction::Indeterminate
}

/// Reports whether p lies inside or on the boundary of triangle ABC.
///
/// A degenerate triangle (zero area) contains exactly the points on its
/// edges, so a triangle (a, b, a) behaves like the segment AB.
pub fn point_in_triangle(p: XY, a: XY, b: XY, c: XY) -> bool {
    if orient(a, b, c) == Direction::Indeterminate {
        return on_segment(p, a, b) || on_segment(p, b, c) || on_segment(p, c, a);
    }
    let d1 = orient(a, b, p);
    let d2 = orient(b, c, p);
    let d3 = orient(c, a, p);
    let has_cw =
        d1 == Direction::Clockwise || d2 == Direction::Clockwise || d3 == Direction::Clockwise;
    let has_ccw = d1 == Direction::CounterClockwise
        || d2 == Direction::CounterClockwise
        || d3 == Direction::CounterClockwise;
    !(has_cw && has_ccw)
}
