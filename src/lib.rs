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

//! Randomized differential-testing oracle for indexed lat/lon line shapes.
//!
//! The oracle computes the expected relation (disjoint, intersects, within)
//! between an indexed line and a bounding box, line or polygon query, and
//! the harness compares it against a [`ShapeIndex`] under test.

pub mod consts;
pub mod latlon;

pub use crate::latlon::config::{HarnessArgs, HarnessConfig};
pub use crate::latlon::error::{OracleError, Result};
pub use crate::latlon::harness::{Check, Counterexample, Report};
pub use crate::latlon::latlng::GeoPoint;
pub use crate::latlon::line::LineShape;
pub use crate::latlon::query::{Component2D, QueryShape};
pub use crate::latlon::rect::{QuantizedRect, Rect};
pub use crate::latlon::relation::{QueryRelation, Relation};
pub use crate::latlon::segment::Segment;
pub use crate::latlon::shape_index::{SegmentIndex, ShapeIndex};
