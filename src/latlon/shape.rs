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

use crate::latlon::latlng::GeoPoint;

/// Edge is a directed edge from v0 to v1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub v0: GeoPoint,
    pub v1: GeoPoint,
}

/// Shape is the edge view shared by polylines and rings.
///
/// A polyline with n vertices has n - 1 edges; a ring with n vertices has n
/// edges, the last one closing back to vertex 0.
pub trait Shape {
    /// Returns the number of edges in this shape.
    fn num_edges(&self) -> usize;

    /// Returns the edge for the given edge index.
    fn edge(&self, i: usize) -> Edge;

    /// Iterates over all edges in order.
    fn edges(&self) -> Edges<'_, Self>
    where
        Self: Sized,
    {
        Edges { shape: self, i: 0 }
    }
}

/// Iterator over the edges of a Shape.
pub struct Edges<'a, S> {
    shape: &'a S,
    i: usize,
}

impl<'a, S: Shape> Iterator for Edges<'a, S> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.i >= self.shape.num_edges() {
            return None;
        }
        let e = self.shape.edge(self.i);
        self.i += 1;
        Some(e)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.shape.num_edges().saturating_sub(self.i);
        (n, Some(n))
    }
}

impl<'a, S: Shape> ExactSizeIterator for Edges<'a, S> {}
