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

//! Differential comparison of a [`ShapeIndex`] against the oracle.
//!
//! A run is a sequence of independent trials. Each trial draws a set of
//! documents and queries from its own seeded random source, builds the index
//! under test, and checks every (document, query, predicate) triple both
//! through [`ShapeIndex::relate`] and through [`ShapeIndex::search`]. The
//! first disagreement stops the run and is returned as a [`Counterexample`].

use crate::latlon::config::HarnessConfig;
use crate::latlon::error::{OracleError, Result};
use crate::latlon::line::LineShape;
use crate::latlon::oracle;
use crate::latlon::query::QueryShape;
use crate::latlon::random::{next_query, next_shapes};
use crate::latlon::relation::{QueryRelation, RelationCounts};
use crate::latlon::shape_index::ShapeIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use tracing::{debug, trace, warn};

/// Check names the index entry point that was compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Check {
    Relate,
    Search,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Relate => write!(f, "relate"),
            Check::Search => write!(f, "search"),
        }
    }
}

/// Counterexample holds everything needed to reproduce a disagreement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counterexample {
    /// Seed of the trial's random source, when found by [`run`].
    pub seed: Option<u64>,
    /// Trial number, when found by [`run`].
    pub trial: Option<usize>,
    pub doc: usize,
    /// The indexed line; None for a missing document.
    pub shape: Option<LineShape>,
    pub query: QueryShape,
    pub relation: QueryRelation,
    pub check: Check,
    pub expected: bool,
    pub actual: bool,
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(seed), Some(trial)) = (self.seed, self.trial) {
            writeln!(f, "trial {} (seed {:#x})", trial, seed)?;
        }
        writeln!(
            f,
            "doc {}: {} {} expected {} got {}",
            self.doc, self.check, self.relation, self.expected, self.actual
        )?;
        match &self.shape {
            Some(line) => writeln!(f, "  shape: line{:?}", line.vertices())?,
            None => writeln!(f, "  shape: missing")?,
        }
        write!(f, "  query: {}", self.query)
    }
}

/// Report summarizes a run with no disagreement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub trials: usize,
    pub queries: usize,
    /// Number of (document, query, predicate) triples checked.
    pub comparisons: usize,
    /// Number of documents the oracle accepted, per predicate.
    pub hits: RelationCounts,
}

/// Derives the seed of one trial from the master seed, so a single trial
/// can be replayed without running the ones before it.
pub fn trial_seed(seed: u64, trial: usize) -> u64 {
    // splitmix64 finalizer over the golden-ratio sequence.
    let mut z = seed.wrapping_add((trial as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Runs config.trials randomized trials against indexes built by
/// build_index, stopping at the first disagreement with the oracle.
pub fn run<I, F>(config: &HarnessConfig, mut build_index: F) -> Result<Report>
where
    I: ShapeIndex,
    F: FnMut(&[Option<LineShape>]) -> Result<I>,
{
    config.validate()?;
    let mut report = Report::default();
    for trial in 0..config.trials {
        let seed = trial_seed(config.seed, trial);
        run_trial(config, seed, &mut build_index, &mut report).map_err(|err| match err {
            OracleError::Mismatch(mut cx) => {
                cx.seed = Some(seed);
                cx.trial = Some(trial);
                warn!(trial, seed, doc = cx.doc, "oracle mismatch\n{}", cx);
                OracleError::Mismatch(cx)
            }
            err => err,
        })?;
        report.trials += 1;
    }
    debug!(
        trials = report.trials,
        queries = report.queries,
        comparisons = report.comparisons,
        "run complete"
    );
    Ok(report)
}

fn run_trial<I, F>(
    config: &HarnessConfig,
    seed: u64,
    build_index: &mut F,
    report: &mut Report,
) -> Result<()>
where
    I: ShapeIndex,
    F: FnMut(&[Option<LineShape>]) -> Result<I>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let shapes = next_shapes(&mut rng, config)?;
    let index = build_index(&shapes)?;
    if index.num_docs() != shapes.len() {
        return Err(OracleError::InvalidArgument(format!(
            "index holds {} documents, {} were indexed",
            index.num_docs(),
            shapes.len()
        )));
    }
    debug!(seed, docs = shapes.len(), "trial");

    for _ in 0..config.queries_per_trial {
        let query = next_query(&mut rng, &shapes, config)?;
        trace!(kind = query.kind(), %query, "query");
        for (doc, shape) in shapes.iter().enumerate() {
            if let Some(line) = shape {
                compare_pair(&index, doc, line, &query)?;
            }
        }
        for &relation in &QueryRelation::ALL {
            let hits = compare_search(&index, &shapes, &query, relation)?;
            report.hits.add(relation, hits);
            report.comparisons += shapes.len();
        }
        report.queries += 1;
    }
    Ok(())
}

/// Checks the index classifies one document against one query the way the
/// oracle does, for every predicate.
pub fn compare_pair<I: ShapeIndex + ?Sized>(
    index: &I,
    doc: usize,
    line: &LineShape,
    query: &QueryShape,
) -> Result<()> {
    let actual = index.relate(doc, query);
    for &relation in &QueryRelation::ALL {
        let expected = oracle::matches(line, query, relation);
        let got = actual.map_or(false, |r| relation.accepts(r));
        if expected != got {
            return Err(mismatch(doc, Some(line), query, relation, Check::Relate, expected, got));
        }
    }
    Ok(())
}

// Checks the search hit set against the oracle and returns its size.
fn compare_search<I: ShapeIndex + ?Sized>(
    index: &I,
    shapes: &[Option<LineShape>],
    query: &QueryShape,
    relation: QueryRelation,
) -> Result<usize> {
    let mut hit = vec![false; shapes.len()];
    for doc in index.search(query, relation) {
        match hit.get_mut(doc) {
            Some(h) => *h = true,
            None => {
                return Err(OracleError::InvalidArgument(format!(
                    "search returned unknown document {}",
                    doc
                )))
            }
        }
    }
    let mut hits = 0;
    for (doc, shape) in shapes.iter().enumerate() {
        let expected = shape
            .as_ref()
            .map_or(false, |line| oracle::matches(line, query, relation));
        if expected != hit[doc] {
            return Err(mismatch(
                doc,
                shape.as_ref(),
                query,
                relation,
                Check::Search,
                expected,
                hit[doc],
            ));
        }
        hits += expected as usize;
    }
    Ok(hits)
}

fn mismatch(
    doc: usize,
    shape: Option<&LineShape>,
    query: &QueryShape,
    relation: QueryRelation,
    check: Check,
    expected: bool,
    actual: bool,
) -> OracleError {
    OracleError::Mismatch(Box::new(Counterexample {
        seed: None,
        trial: None,
        doc,
        shape: shape.cloned(),
        query: query.clone(),
        relation,
        check,
        expected,
        actual,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::rect::Rect;
    use crate::latlon::relation::Relation;
    use crate::latlon::shape_index::SegmentIndex;
    use crate::latlon::test_util::{init_tracing, TEST_SEED};

    // NoWrapIndex forgets that a box can cross the antimeridian and reads
    // min_lon > max_lon as the box between them.
    struct NoWrapIndex(SegmentIndex);

    impl ShapeIndex for NoWrapIndex {
        fn num_docs(&self) -> usize {
            self.0.num_docs()
        }

        fn relate(&self, doc: usize, query: &QueryShape) -> Option<Relation> {
            match query {
                QueryShape::BoundingBox(r) if r.is_wrapping() => {
                    let swapped = Rect::new(r.min_lat, r.max_lat, r.max_lon, r.min_lon).ok()?;
                    self.0.relate(doc, &QueryShape::BoundingBox(swapped))
                }
                _ => self.0.relate(doc, query),
            }
        }
    }

    // PhantomIndex reports missing documents as hits.
    struct PhantomIndex(SegmentIndex);

    impl ShapeIndex for PhantomIndex {
        fn num_docs(&self) -> usize {
            self.0.num_docs()
        }

        fn relate(&self, doc: usize, query: &QueryShape) -> Option<Relation> {
            self.0.relate(doc, query)
        }

        fn search(&self, _query: &QueryShape, _relation: QueryRelation) -> Vec<usize> {
            (0..self.num_docs()).collect()
        }
    }

    fn small_config() -> HarnessConfig {
        HarnessConfig {
            seed: TEST_SEED,
            trials: 3,
            shapes_per_trial: 40,
            queries_per_trial: 20,
            ..Default::default()
        }
    }

    fn line(coords: &[(f64, f64)]) -> LineShape {
        let (lats, lons): (Vec<f64>, Vec<f64>) = coords.iter().cloned().unzip();
        LineShape::from_lat_lons(&lats, &lons).unwrap()
    }

    #[test]
    fn test_reference_index_agrees() {
        init_tracing();
        let config = small_config();
        let report = run(&config, |shapes| Ok(SegmentIndex::new(shapes))).unwrap();
        assert_eq!(report.trials, 3);
        assert_eq!(report.queries, 60);
        assert_eq!(report.comparisons, 60 * 3 * 40);
        // Every document is either disjoint or intersecting.
        assert!(
            report.hits.get(QueryRelation::Intersects) + report.hits.get(QueryRelation::Disjoint)
                <= report.comparisons / 3
        );
        assert!(report.hits.get(QueryRelation::Intersects) > 0);
        assert!(report.hits.get(QueryRelation::Disjoint) > 0);
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = small_config();
        let a = run(&config, |shapes| Ok(SegmentIndex::new(shapes))).unwrap();
        let b = run(&config, |shapes| Ok(SegmentIndex::new(shapes))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_index_agrees_on_saturated_wrapping_box() {
        let max_lon = float_extras::f64::nextafter(180.0, 0.0);
        let query = QueryShape::BoundingBox(Rect::new(-10.0, 10.0, 180.0, max_lon).unwrap());
        let lines = [
            line(&[(0.0, 0.0), (1.0, 1.0)]),
            line(&[(0.0, 179.0), (5.0, 180.0)]),
            line(&[(0.0, 0.0), (20.0, 1.0)]),
            line(&[(20.0, 0.0), (30.0, 1.0)]),
        ];
        let shapes: Vec<Option<LineShape>> = lines.iter().cloned().map(Some).collect();
        let index = SegmentIndex::new(&shapes);
        for (doc, l) in lines.iter().enumerate() {
            compare_pair(&index, doc, l, &query).unwrap();
        }
        assert_eq!(index.relate(0, &query), Some(Relation::Within));
        assert_eq!(index.search(&query, QueryRelation::Disjoint), vec![3]);
    }

    #[test]
    fn test_compare_pair_catches_wrap_bug() {
        let l = line(&[(10.0, 10.0), (10.0, 20.0)]);
        let query = QueryShape::BoundingBox(Rect::new(0.0, 20.0, 170.0, -170.0).unwrap());

        let good = SegmentIndex::new(&[Some(l.clone())]);
        assert!(compare_pair(&good, 0, &l, &query).is_ok());

        let bad = NoWrapIndex(SegmentIndex::new(&[Some(l.clone())]));
        match compare_pair(&bad, 0, &l, &query) {
            Err(OracleError::Mismatch(cx)) => {
                assert_eq!(cx.relation, QueryRelation::Intersects);
                assert_eq!(cx.check, Check::Relate);
                assert!(!cx.expected);
                assert!(cx.actual);
                assert_eq!(cx.seed, None);
                let text = cx.to_string();
                assert!(text.contains("doc 0: relate INTERSECTS expected false got true"));
                assert!(text.contains("box(minLat=0, maxLat=20, minLon=170, maxLon=-170)"));
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_run_catches_wrap_bug() {
        init_tracing();
        let config = HarnessConfig {
            trials: 20,
            ..small_config()
        };
        let err = run(&config, |shapes| Ok(NoWrapIndex(SegmentIndex::new(shapes)))).unwrap_err();
        match err {
            OracleError::Mismatch(cx) => {
                assert!(cx.seed.is_some());
                assert!(cx.trial.is_some());
                assert_eq!(cx.query.kind(), "box");
                assert!(cx.to_string().starts_with("trial "));
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_run_catches_phantom_hits() {
        let config = HarnessConfig {
            missing_one_in: 2,
            ..small_config()
        };
        let err = run(&config, |shapes| Ok(PhantomIndex(SegmentIndex::new(shapes)))).unwrap_err();
        match err {
            OracleError::Mismatch(cx) => {
                assert_eq!(cx.check, Check::Search);
                assert!(!cx.expected);
                assert!(cx.actual);
            }
            other => panic!("expected a mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_build_failure_is_propagated() {
        let err = run(&small_config(), |_| -> Result<SegmentIndex> {
            Err(OracleError::InvalidArgument("no index".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, OracleError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_config() {
        let config = HarnessConfig {
            queries_per_trial: 0,
            ..small_config()
        };
        let err = run(&config, |shapes| Ok(SegmentIndex::new(shapes))).unwrap_err();
        assert!(matches!(err, OracleError::Config(_)));
    }

    #[test]
    fn test_trial_seed() {
        assert_eq!(trial_seed(7, 3), trial_seed(7, 3));
        assert_ne!(trial_seed(7, 3), trial_seed(7, 4));
        assert_ne!(trial_seed(7, 3), trial_seed(8, 3));
        assert_ne!(trial_seed(0, 0), 0);
    }
}
