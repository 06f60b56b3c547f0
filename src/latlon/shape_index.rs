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

use crate::consts::{MAX_LON_ENCODED, MAX_LON_INCL, MIN_LON_ENCODED, MIN_LON_INCL};
use crate::latlon::encoding::{
    decode_latitude, decode_longitude, encode_latitude, encode_latitude_ceil, encode_longitude,
    encode_longitude_ceil,
};
use crate::latlon::latlng::QuantizedPoint;
use crate::latlon::line::LineShape;
use crate::latlon::line2d::Line2D;
use crate::latlon::query::{Component2D, QueryShape};
use crate::latlon::rect::Rect;
use crate::latlon::relation::{classify, QueryRelation, Relation};
use crate::latlon::segment::Segment;

/// ShapeIndex is the system under test: a searchable collection of line
/// documents, addressed by position.
pub trait ShapeIndex {
    /// Returns the number of document slots, including missing ones.
    fn num_docs(&self) -> usize;

    /// Classifies document doc against the query. Returns None when the
    /// document is missing (or out of range).
    fn relate(&self, doc: usize, query: &QueryShape) -> Option<Relation>;

    /// Returns the ids of every document satisfying the predicate, in
    /// increasing order. Missing documents never match.
    fn search(&self, query: &QueryShape, relation: QueryRelation) -> Vec<usize> {
        (0..self.num_docs())
            .filter(|&doc| {
                self.relate(doc, query)
                    .map_or(false, |r| relation.accepts(r))
            })
            .collect()
    }
}

/// EncodedBox is a query box snapped onto the integer grid: minimums round
/// up, maximums round down, so it never covers more than the raw box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EncodedBox {
    min_lat: i32,
    max_lat: i32,
    min_lon: i32,
    max_lon: i32,
    wrapping: bool,
}

impl EncodedBox {
    fn new(r: &Rect) -> EncodedBox {
        let max_lat = encode_latitude(r.max_lat);
        let min_lat = encode_latitude_ceil(r.min_lat).min(max_lat);
        let max_lon = encode_longitude(r.max_lon);
        let mut min_lon = encode_longitude_ceil(r.min_lon);
        let wrapping = r.is_wrapping();
        if !wrapping && min_lon > max_lon {
            min_lon = max_lon;
        }
        EncodedBox {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
            wrapping,
        }
    }

    // Longitude ranges covered by the box; the western one first.
    fn lon_ranges(&self) -> Vec<(i32, i32)> {
        if self.wrapping {
            vec![(MIN_LON_ENCODED, self.max_lon), (self.min_lon, MAX_LON_ENCODED)]
        } else {
            vec![(self.min_lon, self.max_lon)]
        }
    }

    // The same ranges as decoded rects. Wrapped pieces end on the axis
    // extremes rather than on the last grid point.
    fn pieces(&self) -> Vec<Rect> {
        let (min_lat, max_lat) = (decode_latitude(self.min_lat), decode_latitude(self.max_lat));
        if self.wrapping {
            vec![
                Rect::from_bounds(min_lat, max_lat, MIN_LON_INCL, decode_longitude(self.max_lon)),
                Rect::from_bounds(min_lat, max_lat, decode_longitude(self.min_lon), MAX_LON_INCL),
            ]
        } else {
            vec![Rect::from_bounds(
                min_lat,
                max_lat,
                decode_longitude(self.min_lon),
                decode_longitude(self.max_lon),
            )]
        }
    }

    fn contains_lat(&self, p: &QuantizedPoint) -> bool {
        self.min_lat <= p.encoded_lat() && p.encoded_lat() <= self.max_lat
    }
}

/// IndexedLine is a document as the index stores it.
#[derive(Debug, Clone)]
struct IndexedLine {
    segments: Vec<Segment>,
    // Encoded bounding box.
    min_lat: i32,
    max_lat: i32,
    min_lon: i32,
    max_lon: i32,
    // Decoded geometry, for relating against decoded queries.
    line: Line2D,
}

impl IndexedLine {
    fn new(shape: &LineShape) -> IndexedLine {
        let vertices: Vec<QuantizedPoint> =
            shape.vertices().iter().map(|v| v.quantize()).collect();
        let segments = vertices
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect();
        IndexedLine {
            segments,
            min_lat: vertices.iter().map(|v| v.encoded_lat()).min().unwrap_or(0),
            max_lat: vertices.iter().map(|v| v.encoded_lat()).max().unwrap_or(0),
            min_lon: vertices.iter().map(|v| v.encoded_lon()).min().unwrap_or(0),
            max_lon: vertices.iter().map(|v| v.encoded_lon()).max().unwrap_or(0),
            line: Line2D::new(shape.quantize()),
        }
    }

    // Reports whether every segment fits inside one longitude range of the box.
    fn within(&self, query: &EncodedBox) -> bool {
        query.lon_ranges().iter().any(|&(lo, hi)| {
            self.segments.iter().all(|s| {
                [s.a, s.b].iter().all(|p| {
                    query.contains_lat(p) && lo <= p.encoded_lon() && p.encoded_lon() <= hi
                })
            })
        })
    }

    // Reports whether the encoded bounding boxes overlap at all.
    fn may_intersect(&self, query: &EncodedBox) -> bool {
        if self.max_lat < query.min_lat || self.min_lat > query.max_lat {
            return false;
        }
        query
            .lon_ranges()
            .iter()
            .any(|&(lo, hi)| self.max_lon >= lo && self.min_lon <= hi)
    }

    fn relate_box(&self, r: &Rect) -> Relation {
        let query = EncodedBox::new(r);
        if !self.may_intersect(&query) {
            return Relation::Disjoint;
        }
        if self.within(&query) {
            return Relation::Within;
        }
        let touches = query.pieces().iter().any(|p| {
            self.line.relate_box(p.min_lat, p.max_lat, p.min_lon, p.max_lon) != Relation::Disjoint
        });
        if touches {
            Relation::Intersects
        } else {
            Relation::Disjoint
        }
    }

    fn relate_shape<C: Component2D>(&self, query: &C) -> Relation {
        if !query.bound().intersects(&self.line.bound()) {
            return Relation::Disjoint;
        }
        classify(self.segments.iter().map(|s| s.relate(query)))
    }
}

/// SegmentIndex is a reference ShapeIndex. It keeps every line as canonical
/// segments between encoded vertices and answers queries by brute force.
#[derive(Debug, Clone, Default)]
pub struct SegmentIndex {
    docs: Vec<Option<IndexedLine>>,
}

impl SegmentIndex {
    /// Indexes the given documents; None slots are missing documents.
    pub fn new(shapes: &[Option<LineShape>]) -> SegmentIndex {
        let docs = shapes
            .iter()
            .map(|shape| shape.as_ref().map(IndexedLine::new))
            .collect();
        SegmentIndex { docs }
    }

    /// Returns the canonical segments stored for doc.
    pub fn segments(&self, doc: usize) -> Option<&[Segment]> {
        self.docs
            .get(doc)
            .and_then(|d| d.as_ref())
            .map(|d| d.segments.as_slice())
    }
}

impl ShapeIndex for SegmentIndex {
    fn num_docs(&self) -> usize {
        self.docs.len()
    }

    fn relate(&self, doc: usize, query: &QueryShape) -> Option<Relation> {
        let line = self.docs.get(doc)?.as_ref()?;
        Some(match query {
            QueryShape::BoundingBox(r) => line.relate_box(r),
            QueryShape::Line(l) => line.relate_shape(l),
            QueryShape::Polygon(p) => line.relate_shape(p),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::polygon::Polygon2D;
    use crate::latlon::ring::Ring;

    fn line(coords: &[(f64, f64)]) -> LineShape {
        let (lats, lons): (Vec<f64>, Vec<f64>) = coords.iter().cloned().unzip();
        LineShape::from_lat_lons(&lats, &lons).unwrap()
    }

    fn bbox(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> QueryShape {
        QueryShape::BoundingBox(Rect::new(min_lat, max_lat, min_lon, max_lon).unwrap())
    }

    fn index() -> SegmentIndex {
        SegmentIndex::new(&[
            Some(line(&[(0.0, 0.0), (0.0, 10.0)])),
            None,
            Some(line(&[(10.0, 10.0), (10.0, 20.0)])),
            Some(line(&[(0.0, 175.0), (5.0, 179.0)])),
        ])
    }

    #[test]
    fn test_missing_documents() {
        let idx = index();
        let q = bbox(-90.0, 90.0, -180.0, 180.0);
        assert_eq!(idx.num_docs(), 4);
        assert_eq!(idx.relate(1, &q), None);
        assert_eq!(idx.relate(7, &q), None);
        assert!(idx.segments(1).is_none());
        assert_eq!(idx.search(&q, QueryRelation::Within), vec![0, 2, 3]);
        assert_eq!(idx.search(&q, QueryRelation::Disjoint), Vec::<usize>::new());
    }

    #[test]
    fn test_segments_are_canonical() {
        let idx = SegmentIndex::new(&[Some(line(&[(10.0, 5.0), (0.0, 5.0), (0.0, 1.0)]))]);
        let segs = idx.segments(0).unwrap();
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| s.a <= s.b));
    }

    #[test]
    fn test_box_queries() {
        let idx = index();
        let q = bbox(-5.0, 5.0, -5.0, 15.0);
        assert_eq!(idx.relate(0, &q), Some(Relation::Within));
        assert_eq!(idx.relate(2, &q), Some(Relation::Disjoint));
        assert_eq!(idx.search(&q, QueryRelation::Intersects), vec![0]);
        assert_eq!(idx.search(&q, QueryRelation::Disjoint), vec![2, 3]);
    }

    #[test]
    fn test_wrapping_box_queries() {
        let idx = index();
        let q = bbox(0.0, 20.0, 170.0, -170.0);
        assert_eq!(idx.relate(2, &q), Some(Relation::Disjoint));
        assert_eq!(idx.relate(3, &q), Some(Relation::Within));
        assert_eq!(idx.search(&q, QueryRelation::Within), vec![3]);
    }

    #[test]
    fn test_polygon_queries() {
        let idx = index();
        let shell = Ring::from_lat_lons(&[-60.0, -60.0, -10.0, -10.0], &[-20.0, 40.0, 40.0, -20.0])
            .unwrap();
        let q = QueryShape::Polygon(Polygon2D::new(shell, vec![]).unwrap());
        assert_eq!(idx.search(&q, QueryRelation::Intersects), Vec::<usize>::new());
        assert_eq!(idx.search(&q, QueryRelation::Disjoint), vec![0, 2, 3]);
    }

    #[test]
    fn test_encoded_box_collapses() {
        let r = Rect::new(1.0e-9, 1.0e-9, 2.0e-9, 2.0e-9).unwrap();
        let b = EncodedBox::new(&r);
        assert_eq!(b.min_lat, b.max_lat);
        assert_eq!(b.min_lon, b.max_lon);
        assert!(!b.wrapping);
        assert_eq!(b.lon_ranges().len(), 1);

        let wrap = EncodedBox::new(&Rect::new(0.0, 1.0, 179.0, -179.0).unwrap());
        assert_eq!(wrap.lon_ranges().len(), 2);
        assert_eq!(wrap.pieces()[0].min_lon, -180.0);
        assert_eq!(wrap.pieces()[1].max_lon, 180.0);
    }
}
