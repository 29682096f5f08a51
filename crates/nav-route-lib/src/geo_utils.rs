//! Geographic primitives shared by the query engine
//!
//! Coordinates are `geo::Coord<f64>` with `x` = longitude and `y` = latitude, in degrees.

use geo::{Coord, Rect};

/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6371000.0;

/// Build a coordinate from latitude and longitude in degrees
#[inline(always)]
pub fn coord(lat: f64, lon: f64) -> Coord<f64> {
    Coord { x: lon, y: lat }
}

/// Calculate the Haversine distance between two coordinates in meters
///
/// Uses the Haversine formula for great-circle distance on a sphere.
#[inline]
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lon = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Planar linear interpolation between two coordinates
///
/// `fraction` 0.0 yields `a`, 1.0 yields `b`.
#[inline(always)]
pub fn interpolate(a: Coord<f64>, b: Coord<f64>, fraction: f64) -> Coord<f64> {
    Coord {
        x: a.x + (b.x - a.x) * fraction,
        y: a.y + (b.y - a.y) * fraction,
    }
}

/// Straight-line distance in coordinate units (degrees)
#[inline(always)]
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Minimal axis-aligned box containing all coordinates, `None` when empty
pub fn bounding_box(points: &[Coord<f64>]) -> Option<Rect<f64>> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;

    for point in &points[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }

    Some(Rect::new(min, max))
}

/// Check whether a coordinate lies inside a box, boundary included
#[inline(always)]
pub fn rect_contains(rect: &Rect<f64>, point: Coord<f64>) -> bool {
    let min = rect.min();
    let max = rect.max();
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Check whether two boxes overlap, touching edges included
#[inline(always)]
pub fn rects_intersect(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && a.max().x >= b.min().x
        && a.min().y <= b.max().y
        && a.max().y >= b.min().y
}
