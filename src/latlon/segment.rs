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

use crate::latlon::latlng::QuantizedPoint;
use crate::latlon::line::LineShape;
use crate::latlon::query::Component2D;
use crate::latlon::relation::Relation;

/// Segment is a pair of quantized consecutive line vertices in canonical
/// order: a is below b, or level with b and west of it.
///
/// The relation primitive sees a segment as the degenerate triangle
/// (a, b, a), so equal segments always relate identically whatever the
/// direction of the line they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    pub a: QuantizedPoint,
    pub b: QuantizedPoint,
}

impl Segment {
    /// Creates the canonical segment between two grid points.
    pub fn new(p: QuantizedPoint, q: QuantizedPoint) -> Segment {
        if p <= q {
            Segment { a: p, b: q }
        } else {
            Segment { a: q, b: p }
        }
    }

    /// Relates this segment to a query region through the triangle primitive.
    pub fn relate<C: Component2D + ?Sized>(&self, query: &C) -> Relation {
        let (ax, ay) = (self.a.lon(), self.a.lat());
        let (bx, by) = (self.b.lon(), self.b.lat());
        query.relate_triangle(ax, ay, bx, by, ax, ay)
    }
}

/// Segments iterates over the canonical segments of a line, one per pair of
/// consecutive vertices.
#[derive(Clone)]
pub struct Segments<'a> {
    line: &'a LineShape,
    next: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(line: &'a LineShape) -> Segments<'a> {
        Segments { line, next: 1 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.next >= self.line.num_points() {
            return None;
        }
        let p = self.line.vertex(self.next - 1).quantize();
        let q = self.line.vertex(self.next).quantize();
        self.next += 1;
        Some(Segment::new(p, q))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.line.num_points().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for Segments<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::latlng::GeoPoint;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn line(coords: &[(f64, f64)]) -> LineShape {
        let (lats, lons): (Vec<f64>, Vec<f64>) = coords.iter().cloned().unzip();
        LineShape::from_lat_lons(&lats, &lons).unwrap()
    }

    #[test]
    fn test_segment_count() {
        let l = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 3.0)]);
        assert_eq!(l.segments().len(), 3);
        assert_eq!(l.segments().count(), 3);
        // Regenerable from the same line.
        assert_eq!(l.segments().collect::<Vec<_>>(), l.segments().collect::<Vec<_>>());
    }

    #[test]
    fn test_canonical_order() {
        // Descending latitude is flipped.
        let l = line(&[(10.0, 5.0), (0.0, 7.0)]);
        let s = l.segments().next().unwrap();
        assert_eq!(s.a, l.vertex(1).quantize());
        assert_eq!(s.b, l.vertex(0).quantize());
        assert_eq!(s.a.lat(), 0.0);
        assert!(s.b.lat() <= 10.0 && s.b.lat() > 9.999_999);

        // Equal latitude sorts by longitude.
        let l = line(&[(10.0, 20.0), (10.0, 10.0)]);
        let s = l.segments().next().unwrap();
        assert!(s.a.lon() < s.b.lon());
    }

    #[test]
    fn test_endpoints_are_quantized() {
        let l = line(&[(1.234_567_89, 2.345_678_91), (3.456_789_12, 4.567_891_23)]);
        let s = l.segments().next().unwrap();
        assert_eq!(s.a, l.vertex(0).quantize());
        assert_eq!(s.b, l.vertex(1).quantize());
    }

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn prop_reversal_yields_same_segments(points in prop::collection::vec(point(), 2..12)) {
            let l = LineShape::new(points).unwrap();
            let forward: BTreeSet<Segment> = l.segments().collect();
            let backward: BTreeSet<Segment> = l.reversed().segments().collect();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_segments_are_canonical(points in prop::collection::vec(point(), 2..12)) {
            let l = LineShape::new(points).unwrap();
            for s in l.segments() {
                prop_assert!(s.a <= s.b);
                prop_assert_eq!(Segment::new(s.b, s.a), s);
            }
        }
    }
}
