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

//! Random shapes and queries.
//!
//! Every generator is a pure function of the random source it is handed, so
//! a seeded source replays the same shapes.

use crate::consts::{MAX_LAT_INCL, MAX_LON_INCL, MIN_LAT_INCL, MIN_LON_INCL};
use crate::latlon::config::HarnessConfig;
use crate::latlon::error::Result;
use crate::latlon::latlng::GeoPoint;
use crate::latlon::line::LineShape;
use crate::latlon::line2d::Line2D;
use crate::latlon::polygon::Polygon2D;
use crate::latlon::query::QueryShape;
use crate::latlon::rect::Rect;
use crate::latlon::ring::Ring;
use rand::Rng;
use std::f64::consts::PI;

/// one_in returns true with a probability of 1/n.
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n <= 1 || rng.gen_range(0..n) == 0
}

// Draws from [-max, max], hitting the extremes, one ulp inside them and zero
// far more often than a uniform draw would.
fn next_coordinate<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    match rng.gen_range(0..20) {
        0 => max,
        1 => -max,
        2 => float_extras::f64::nextafter(max, 0.0),
        3 => float_extras::f64::nextafter(-max, 0.0),
        4 => 0.0,
        _ => rng.gen_range(-max..=max),
    }
}

/// Returns a random latitude in [-90, 90].
pub fn next_latitude<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    next_coordinate(rng, MAX_LAT_INCL)
}

/// Returns a random longitude in [-180, 180].
pub fn next_longitude<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    next_coordinate(rng, MAX_LON_INCL)
}

pub fn next_point<R: Rng + ?Sized>(rng: &mut R) -> GeoPoint {
    GeoPoint::clamped(next_latitude(rng), next_longitude(rng))
}

/// Returns a line of 2 to max_points vertices. Half the time the vertices
/// are scattered over the globe, otherwise they stay close to a random
/// centre.
pub fn next_line<R: Rng + ?Sized>(rng: &mut R, max_points: usize) -> Result<LineShape> {
    let n = rng.gen_range(2..=max_points.max(2));
    let vertices: Vec<GeoPoint> = if rng.gen() {
        (0..n).map(|_| next_point(rng)).collect()
    } else {
        let center = next_point(rng);
        let radius = rng.gen_range(0.01..10.0);
        (0..n)
            .map(|_| {
                GeoPoint::clamped(
                    center.lat() + rng.gen_range(-radius..=radius),
                    center.lon() + rng.gen_range(-radius..=radius),
                )
            })
            .collect()
    };
    LineShape::new(vertices)
}

/// Returns a random box. The longitudes are not sorted, so about half the
/// boxes cross the antimeridian.
pub fn next_box<R: Rng + ?Sized>(rng: &mut R) -> Result<Rect> {
    let (lat0, lat1) = (next_latitude(rng), next_latitude(rng));
    let (lon0, lon1) = (next_longitude(rng), next_longitude(rng));
    Rect::new(lat0.min(lat1), lat0.max(lat1), lon0, lon1)
}

/// Returns a non-wrapping box around the bound of line, grown or shrunk by
/// up to a few degrees on each side.
pub fn next_box_near<R: Rng + ?Sized>(rng: &mut R, line: &LineShape) -> Result<Rect> {
    let b = line.bound();
    let mut margin = || rng.gen_range(-1.0..=5.0);
    let lat0 = (b.min_lat - margin()).clamp(MIN_LAT_INCL, MAX_LAT_INCL);
    let lat1 = (b.max_lat + margin()).clamp(MIN_LAT_INCL, MAX_LAT_INCL);
    let lon0 = (b.min_lon - margin()).clamp(MIN_LON_INCL, MAX_LON_INCL);
    let lon1 = (b.max_lon + margin()).clamp(MIN_LON_INCL, MAX_LON_INCL);
    // A negative margin may cross the two sides over.
    Rect::new(lat0.min(lat1), lat0.max(lat1), lon0.min(lon1), lon0.max(lon1))
}

// Returns n vertices of a star-shaped ring around center. Angles advance
// by roughly 2π/n, radii vary between 30% and 100% of radius.
fn star<R: Rng + ?Sized>(rng: &mut R, center: GeoPoint, radius: f64, n: usize) -> Vec<GeoPoint> {
    let step = 2.0 * PI / n as f64;
    (0..n)
        .map(|i| {
            let angle = step * (i as f64 + rng.gen_range(-0.25..0.25));
            let r = radius * rng.gen_range(0.3..=1.0);
            GeoPoint::clamped(
                center.lat() + r * libm::sin(angle),
                center.lon() + r * libm::cos(angle),
            )
        })
        .collect()
}

/// Returns a random polygon query. One time in four it is a box with a
/// single shell; otherwise a star-shaped shell of 3 to max_points vertices,
/// sometimes with a hole around its centre.
pub fn next_polygon<R: Rng + ?Sized>(rng: &mut R, max_points: usize) -> Result<Polygon2D> {
    if one_in(rng, 4) {
        let r = next_box(rng)?;
        let (min_lon, max_lon) = (r.min_lon.min(r.max_lon), r.min_lon.max(r.max_lon));
        if r.min_lat < r.max_lat && min_lon < max_lon {
            let shell = Ring::from_lat_lons(
                &[r.min_lat, r.min_lat, r.max_lat, r.max_lat],
                &[min_lon, max_lon, max_lon, min_lon],
            )?;
            return Polygon2D::new(shell, vec![]);
        }
    }

    // Keep the centre far enough from the poles and the antimeridian that
    // no vertex needs clamping.
    let center = GeoPoint::clamped(rng.gen_range(-60.0..=60.0), rng.gen_range(-150.0..=150.0));
    let radius = rng.gen_range(0.5..=20.0);
    let n = rng.gen_range(3..=max_points.max(3));
    let shell = Ring::new(star(rng, center, radius, n))?;

    // With six or more vertices the shell holds the disc of 0.2 * radius,
    // which leaves room for a hole.
    let mut holes = Vec::new();
    if n >= 6 && one_in(rng, 3) {
        holes.push(Ring::new(star(rng, center, radius * 0.15, 6))?);
    }
    Polygon2D::new(shell, holes)
}

/// Returns a query line. One time in shared_vertex_one_in its vertices are
/// drawn from the indexed shapes, so that the query really touches them;
/// otherwise it is a fresh random line.
pub fn next_query_line<R: Rng + ?Sized>(
    rng: &mut R,
    shapes: &[Option<LineShape>],
    shared_vertex_one_in: u32,
    max_points: usize,
) -> Result<LineShape> {
    if !one_in(rng, shared_vertex_one_in) {
        return next_line(rng, max_points);
    }
    let mut max_bound = (shapes.len() as f64 * 0.1).floor() as usize;
    if max_bound < 2 {
        max_bound = shapes.len().max(2);
    }
    let n = rng.gen_range(2..=max_bound);
    let mut vertices = Vec::with_capacity(n);
    for j in 0..n {
        let shared = match shapes.get(j) {
            Some(Some(line)) if rng.gen::<bool>() => {
                Some(line.vertex(rng.gen_range(0..line.num_points() - 1)))
            }
            _ => None,
        };
        vertices.push(shared.unwrap_or_else(|| next_point(rng)));
    }
    LineShape::new(vertices)
}

/// Returns the documents of one trial; a slot is None (missing) one time in
/// config.missing_one_in.
pub fn next_shapes<R: Rng + ?Sized>(
    rng: &mut R,
    config: &HarnessConfig,
) -> Result<Vec<Option<LineShape>>> {
    (0..config.shapes_per_trial)
        .map(|_| {
            if one_in(rng, config.missing_one_in) {
                Ok(None)
            } else {
                next_line(rng, config.max_line_points).map(Some)
            }
        })
        .collect()
}

/// Returns a random query of any kind: a box anywhere, a box near one of
/// the shapes, a line or a polygon.
pub fn next_query<R: Rng + ?Sized>(
    rng: &mut R,
    shapes: &[Option<LineShape>],
    config: &HarnessConfig,
) -> Result<QueryShape> {
    let query = match rng.gen_range(0..4) {
        0 => QueryShape::BoundingBox(next_box(rng)?),
        1 => {
            let present: Vec<&LineShape> = shapes.iter().flatten().collect();
            if present.is_empty() {
                QueryShape::BoundingBox(next_box(rng)?)
            } else {
                let line = present[rng.gen_range(0..present.len())];
                QueryShape::BoundingBox(next_box_near(rng, line)?)
            }
        }
        2 => QueryShape::Line(Line2D::new(next_query_line(
            rng,
            shapes,
            config.shared_vertex_one_in,
            config.max_line_points,
        )?)),
        _ => QueryShape::Polygon(next_polygon(rng, config.max_polygon_points)?),
    };
    Ok(query)
}
