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

use crate::latlon::edge_crossings::Crossing;
use crate::latlon::predicates::{canonical, orient, Direction, XY};

// EdgeCrosser allows edges to be efficiently tested for intersection with a
// given fixed edge AB. It is especially efficient when testing for
// intersection with an edge chain connecting vertices v0, v1, v2, ...
//
// Example usage:
//
//	fn count_intersections(a: XY, b: XY, chain: &[XY]) -> usize {
//		let mut crosser = EdgeCrosser::new_chain_edge_crosser(a, b, chain[0]);
//		chain[1..]
//			.iter()
//			.filter(|&&d| crosser.chain_crossing_sign(d) != Crossing::DoNotCross)
//			.count()
//	}
//
// The answers always agree with Crossing::crossing_sign.
pub struct EdgeCrosser {
    a: XY,
    b: XY,

    // The fields below are updated for each vertex in the chain.
    c: XY,          // Previous vertex in the vertex chain.
    acb: Direction, // The orientation of C relative to the canonical AB.
}

impl EdgeCrosser {
    /// Returns an EdgeCrosser with the fixed edge AB.
    pub fn new(a: XY, b: XY) -> EdgeCrosser {
        let (a, b) = canonical(a, b);
        EdgeCrosser {
            a,
            b,
            c: a,
            acb: Direction::Indeterminate,
        }
    }

    /// Convenience constructor that uses AB as the fixed edge and C as the
    /// first vertex of the vertex chain.
    pub fn new_chain_edge_crosser(a: XY, b: XY, c: XY) -> EdgeCrosser {
        let mut e = EdgeCrosser::new(a, b);
        e.restart_at(c);
        e
    }

    /// Sets the current point of the edge crosser to be c.
    pub fn restart_at(&mut self, c: XY) {
        self.c = c;
        self.acb = orient(self.a, self.b, c);
    }

    /// Reports whether the edge AB intersects the edge from the last vertex
    /// passed to chain_crossing_sign (or restart_at) to d.
    pub fn chain_crossing_sign(&mut self, d: XY) -> Crossing {
        let abd = orient(self.a, self.b, d);
        let result = if self.acb == abd && abd != Direction::Indeterminate {
            // C and D lie strictly on the same side of AB.
            Crossing::DoNotCross
        } else {
            Crossing::crossing_sign(self.a, self.b, self.c, d)
        };
        self.c = d;
        self.acb = abd;
        result
    }
}
