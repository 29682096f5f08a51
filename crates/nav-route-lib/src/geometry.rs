//! Geometry and temporal queries over a route's point sequence
//!
//! All queries read the route immutably and run in O(N) over its segments.

use crate::{Result, Route, RouteError, geo_utils};
use geo::{Coord, Rect};
use rayon::prelude::*;

/// Result of projecting a coordinate onto a route
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Nearest coordinate on the route
    pub coord: Coord<f64>,
    /// Index of the segment at (or after which) the projection lies
    pub segment_index: usize,
    /// Distance from the route start in meters
    pub distance: f64,
    /// Time from the route start in seconds, when known
    pub time: Option<f64>,
    /// Geodesic distance in meters from the query coordinate to `coord`
    pub offset: f64,
}

/// A projection candidate found while scanning the route
#[derive(Clone, Copy, Debug)]
enum Candidate {
    Vertex { index: usize },
    Foot { index: usize, fraction: f64 },
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Coordinates of all segment end points, in traversal order
    pub fn points(&self) -> Vec<Coord<f64>> {
        self.segments().iter().map(|s| s.coord).collect()
    }

    /// Minimal axis-aligned box containing every point, `None` for an empty route
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        geo_utils::bounding_box(&self.points())
    }

    /// Sum of the haversine distances between consecutive points in meters
    ///
    /// This is the length walked by [`Route::position_after_distance`], which may differ
    /// from the stored [`Route::distance`] reported by the route builder.
    pub fn geodesic_length(&self) -> f64 {
        self.segments()
            .windows(2)
            .map(|pair| geo_utils::haversine_distance(pair[0].coord, pair[1].coord))
            .sum()
    }

    /// Position reached after travelling `distance` meters along the route
    ///
    /// Returns `None` when the distance is negative, not finite, or beyond the end of the
    /// route. The position is never clamped to the last point.
    pub fn position_after_distance(&self, distance: f64) -> Option<Coord<f64>> {
        if !distance.is_finite() || distance < 0.0 {
            return None;
        }

        let segments = self.segments();
        let first = segments.first()?;
        if distance == 0.0 {
            return Some(first.coord);
        }

        let mut walked = 0.0;
        for pair in segments.windows(2) {
            let (from, to) = (pair[0].coord, pair[1].coord);
            let length = geo_utils::haversine_distance(from, to);
            if walked + length >= distance {
                if length == 0.0 {
                    return Some(from);
                }
                let fraction = (distance - walked) / length;
                return Some(geo_utils::interpolate(from, to, fraction));
            }
            walked += length;
        }

        None
    }

    /// Project a coordinate onto the nearest point of the route
    ///
    /// Candidates are every vertex and every perpendicular foot that falls strictly inside
    /// a pair of consecutive points. The nearest candidate wins; on equal distance the
    /// first one found (lowest index, vertex before foot) is kept.
    pub fn project(&self, target: Coord<f64>) -> Result<Projection> {
        let segments = self.segments();
        if segments.is_empty() {
            return Err(RouteError::EmptyRoute);
        }

        let mut best = Candidate::Vertex { index: 0 };
        let mut best_coord = segments[0].coord;
        let mut best_dist = geo_utils::planar_distance(target, best_coord);

        for (index, segment) in segments.iter().enumerate() {
            let vertex = segment.coord;
            let dist = geo_utils::planar_distance(target, vertex);
            if dist < best_dist {
                best = Candidate::Vertex { index };
                best_coord = vertex;
                best_dist = dist;
            }

            let Some(next) = segments.get(index + 1) else {
                break;
            };
            if let Some((fraction, foot)) = perpendicular_foot(vertex, next.coord, target) {
                let dist = geo_utils::planar_distance(target, foot);
                if dist < best_dist {
                    best = Candidate::Foot { index, fraction };
                    best_coord = foot;
                    best_dist = dist;
                }
            }
        }

        let offset = geo_utils::haversine_distance(target, best_coord);
        let projection = match best {
            Candidate::Vertex { index } => {
                let segment = &segments[index];
                Projection {
                    coord: best_coord,
                    segment_index: index,
                    distance: segment.distance,
                    time: self.has_time().then_some(segment.time),
                    offset,
                }
            }
            Candidate::Foot { index, fraction } => {
                let from = &segments[index];
                let to = &segments[index + 1];
                let time = (self.has_time() && index > 0)
                    .then(|| from.time + (to.time - from.time) * fraction);
                Projection {
                    coord: best_coord,
                    segment_index: index,
                    distance: from.distance + geo_utils::haversine_distance(from.coord, best_coord),
                    time,
                    offset,
                }
            }
        };

        tracing::trace!(
            "Projected ({}, {}) onto segment {} at {:.1}m",
            target.y,
            target.x,
            projection.segment_index,
            projection.distance
        );
        Ok(projection)
    }
}

/// Project many coordinates onto the same route in parallel
///
/// Results keep the order of `targets`.
pub fn project_all(route: &Route, targets: &[Coord<f64>]) -> Result<Vec<Projection>> {
    #[cfg(feature = "profiling")]
    profiling::scope!("geometry::project_all");

    if route.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    targets
        .par_iter()
        .map(|target| route.project(*target))
        .collect()
}

/// Foot of the perpendicular from `target` onto the line through `a` and `b`
///
/// Returns the fraction along `a -> b` and the foot itself, only when the foot lies
/// strictly between the two points.
fn perpendicular_foot(
    a: Coord<f64>,
    b: Coord<f64>,
    target: Coord<f64>,
) -> Option<(f64, Coord<f64>)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return None;
    }

    let fraction = ((target.x - a.x) * dx + (target.y - a.y) * dy) / length_sq;
    if fraction > 0.0 && fraction < 1.0 {
        Some((fraction, geo_utils::interpolate(a, b, fraction)))
    } else {
        None
    }
}
