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

use std::fmt;

/// Relation classifies an indexed shape (or one of its segments) against a
/// query region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// No point in common with the query.
    Disjoint,
    /// At least one point in common, not entirely inside.
    Intersects,
    /// Entirely inside the query.
    Within,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Disjoint => write!(f, "DISJOINT"),
            Relation::Intersects => write!(f, "INTERSECTS"),
            Relation::Within => write!(f, "WITHIN"),
        }
    }
}

/// QueryRelation is the predicate a search asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryRelation {
    Intersects,
    Within,
    Disjoint,
}

impl QueryRelation {
    pub const ALL: [QueryRelation; 3] = [
        QueryRelation::Intersects,
        QueryRelation::Within,
        QueryRelation::Disjoint,
    ];

    /// Reports whether a shape classified as r satisfies this predicate.
    /// A shape within the query also intersects it.
    pub fn accepts(self, r: Relation) -> bool {
        match self {
            QueryRelation::Intersects => r != Relation::Disjoint,
            QueryRelation::Within => r == Relation::Within,
            QueryRelation::Disjoint => r == Relation::Disjoint,
        }
    }

    fn index(self) -> usize {
        match self {
            QueryRelation::Intersects => 0,
            QueryRelation::Within => 1,
            QueryRelation::Disjoint => 2,
        }
    }
}

impl fmt::Display for QueryRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryRelation::Intersects => write!(f, "INTERSECTS"),
            QueryRelation::Within => write!(f, "WITHIN"),
            QueryRelation::Disjoint => write!(f, "DISJOINT"),
        }
    }
}

/// Per-predicate counters, indexable by QueryRelation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationCounts([usize; 3]);

impl RelationCounts {
    pub fn get(&self, relation: QueryRelation) -> usize {
        self.0[relation.index()]
    }

    pub fn add(&mut self, relation: QueryRelation, n: usize) {
        self.0[relation.index()] += n;
    }
}

/// Folds per-segment relations into the answer for one predicate.
///
/// DISJOINT needs every segment disjoint, WITHIN needs every segment within,
/// INTERSECTS needs one segment that is not disjoint. Evaluation stops at the
/// first segment that decides the answer, so a lazy iterator only computes
/// the relations it needs.
pub fn combine<I>(query: QueryRelation, segments: I) -> bool
where
    I: IntoIterator<Item = Relation>,
{
    let mut segments = segments.into_iter();
    match query {
        QueryRelation::Disjoint => segments.all(|r| r == Relation::Disjoint),
        QueryRelation::Within => segments.all(|r| r == Relation::Within),
        QueryRelation::Intersects => segments.any(|r| r != Relation::Disjoint),
    }
}

/// Classifies a whole shape from its per-segment relations: Within if every
/// segment is within, Disjoint if every segment is disjoint, Intersects
/// otherwise.
pub fn classify<I>(segments: I) -> Relation
where
    I: IntoIterator<Item = Relation>,
{
    let mut all_within = true;
    let mut all_disjoint = true;
    for r in segments {
        all_within &= r == Relation::Within;
        all_disjoint &= r == Relation::Disjoint;
        if !all_within && !all_disjoint {
            return Relation::Intersects;
        }
    }
    if all_within {
        Relation::Within
    } else {
        Relation::Disjoint
    }
}
