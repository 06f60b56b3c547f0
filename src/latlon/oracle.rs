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

//! Ground-truth relations between an indexed line and a query.
//!
//! Box queries are answered from the line's quantized bounding box (WITHIN)
//! or from its segments against each antimeridian piece. The query is
//! quantized first and keeps the raw box's wrapping. Line and polygon
//! queries relate every canonical segment through the query's triangle
//! primitive and fold the results with [`combine`].

use crate::latlon::line::LineShape;
use crate::latlon::query::QueryShape;
use crate::latlon::rect::{Rect, Split};
use crate::latlon::relation::{classify, combine, QueryRelation, Relation};

/// Reports whether the line satisfies the predicate against the query, as
/// the index is expected to see it.
pub fn matches(line: &LineShape, query: &QueryShape, relation: QueryRelation) -> bool {
    match query {
        QueryShape::BoundingBox(rect) => matches_box(line, rect, relation),
        _ => combine(relation, line.segments().map(|s| s.relate(query))),
    }
}

fn matches_box(line: &LineShape, rect: &Rect, relation: QueryRelation) -> bool {
    let query = rect.quantize();
    if relation == QueryRelation::Within {
        return query.contains(&line.quantized_bound());
    }
    let relate_piece = |piece: &Rect| classify(line.segments().map(|s| s.relate(piece)));
    let r = match query.split() {
        Split::Single(piece) => relate_piece(&piece),
        Split::Wrapped([west, east]) => match relate_piece(&west) {
            Relation::Disjoint => relate_piece(&east),
            r => r,
        },
    };
    relation.accepts(r)
}

/// Classifies the line against the query: Within if WITHIN holds, else
/// Intersects if INTERSECTS holds, else Disjoint.
pub fn relate(line: &LineShape, query: &QueryShape) -> Relation {
    if matches(line, query, QueryRelation::Within) {
        Relation::Within
    } else if matches(line, query, QueryRelation::Intersects) {
        Relation::Intersects
    } else {
        Relation::Disjoint
    }
}
