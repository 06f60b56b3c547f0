// Copyright 2017 Google Inc. All rights reserved.
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

use crate::latlon::predicates::{canonical, orient, Direction, XY};

// A Crossing indicates how edges cross.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Crossing {
    Cross,
    Maybe,
    DoNotCross,
}

impl std::fmt::Display for Crossing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crossing::Cross => write!(f, "Cross"),
            Crossing::Maybe => write!(f, "MaybeCross"),
            Crossing::DoNotCross => write!(f, "DoNotCross"),
        }
    }
}

impl Crossing {
    // crossing_sign reports whether the edge AB intersects the edge CD.
    // If AB crosses CD at a point that is interior to both edges, Cross is returned.
    // If the edges only touch (a vertex of one lies on the other, or the edges
    // overlap along a common line) it returns Maybe. Otherwise it returns DoNotCross.
    //
    // Each edge is put in canonical order before any orientation is computed,
    // so the result does not depend on the direction of either edge:
    //
    //	crossing_sign(b,a,c,d) == crossing_sign(a,b,c,d)
    //	crossing_sign(a,b,d,c) == crossing_sign(a,b,c,d)
    pub fn crossing_sign(a: XY, b: XY, c: XY, d: XY) -> Crossing {
        let (a, b) = canonical(a, b);
        let (c, d) = canonical(c, d);

        // Collinear edges report Indeterminate for every orientation below;
        // the span check is what keeps disjoint collinear edges apart.
        if !spans_overlap(a, b, c, d) {
            return Crossing::DoNotCross;
        }
        let acb = orient(a, b, c);
        let abd = orient(a, b, d);
        crossing_from_orientations(acb, abd, orient(c, d, a), orient(c, d, b))
    }
}

fn spans_overlap(a: XY, b: XY, c: XY, d: XY) -> bool {
    a.x.max(b.x) >= c.x.min(d.x)
        && c.x.max(d.x) >= a.x.min(b.x)
        && a.y.max(b.y) >= c.y.min(d.y)
        && c.y.max(d.y) >= a.y.min(b.y)
}

// Combines the orientations of C and D about AB and of A and B about CD.
pub(crate) fn crossing_from_orientations(
    abc: Direction,
    abd: Direction,
    cda: Direction,
    cdb: Direction,
) -> Crossing {
    if same_side(abc, abd) || same_side(cda, cdb) {
        return Crossing::DoNotCross;
    }
    if abc == Direction::Indeterminate
        || abd == Direction::Indeterminate
        || cda == Direction::Indeterminate
        || cdb == Direction::Indeterminate
    {
        return Crossing::Maybe;
    }
    Crossing::Cross
}

fn same_side(x: Direction, y: Direction) -> bool {
    x == y && x != Direction::Indeterminate
}

/// Reports whether the closed segments AB and CD share at least one point.
pub fn segments_intersect(a: XY, b: XY, c: XY, d: XY) -> bool {
    Crossing::crossing_sign(a, b, c, d) != Crossing::DoNotCross
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlon::predicates::xy;

    fn check(msg: &str, a: XY, b: XY, c: XY, d: XY, want: Crossing) {
        assert_eq!(Crossing::crossing_sign(a, b, c, d), want, "{}", msg);
        assert_eq!(Crossing::crossing_sign(b, a, c, d), want, "{} (ba)", msg);
        assert_eq!(Crossing::crossing_sign(a, b, d, c), want, "{} (dc)", msg);
        assert_eq!(Crossing::crossing_sign(b, a, d, c), want, "{} (ba, dc)", msg);
    }

    #[test]
    fn test_crossing_sign() {
        check(
            "two regular edges that cross",
            xy(0.0, 0.0),
            xy(2.0, 2.0),
            xy(0.0, 2.0),
            xy(2.0, 0.0),
            Crossing::Cross,
        );
        check(
            "parallel edges",
            xy(0.0, 0.0),
            xy(2.0, 0.0),
            xy(0.0, 1.0),
            xy(2.0, 1.0),
            Crossing::DoNotCross,
        );
        check(
            "vertex of CD on AB",
            xy(0.0, 0.0),
            xy(2.0, 0.0),
            xy(1.0, 0.0),
            xy(1.0, 3.0),
            Crossing::Maybe,
        );
        check(
            "shared endpoint",
            xy(0.0, 0.0),
            xy(2.0, 0.0),
            xy(2.0, 0.0),
            xy(3.0, 1.0),
            Crossing::Maybe,
        );
        check(
            "collinear and overlapping",
            xy(0.0, 0.0),
            xy(2.0, 2.0),
            xy(1.0, 1.0),
            xy(3.0, 3.0),
            Crossing::Maybe,
        );
        check(
            "collinear and disjoint",
            xy(0.0, 0.0),
            xy(1.0, 1.0),
            xy(2.0, 2.0),
            xy(3.0, 3.0),
            Crossing::DoNotCross,
        );
        check(
            "lines cross beyond the edges",
            xy(0.0, 0.0),
            xy(1.0, 1.0),
            xy(3.0, 0.0),
            xy(2.0, 1.0),
            Crossing::DoNotCross,
        );
    }

    #[test]
    fn test_degenerate_edge() {
        let p = xy(1.0, 0.0);
        assert!(segments_intersect(p, p, xy(0.0, 0.0), xy(2.0, 0.0)));
        assert!(!segments_intersect(p, p, xy(0.0, 1.0), xy(2.0, 1.0)));
        assert!(segments_intersect(p, p, p, p));
    }
}
