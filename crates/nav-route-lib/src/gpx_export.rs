//! GPX export of a route
//!
//! The route points become a single track with one track segment. Attached waypoints are
//! exported as top-level GPX waypoints.

use crate::Route;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

/// Creator string written into exported documents
pub const CREATOR: &str = "nav-route";

/// Build a GPX document for a route
pub fn to_gpx(route: &Route) -> Gpx {
    let mut segment = TrackSegment::default();
    segment.points = route
        .segments()
        .iter()
        .map(|s| {
            let mut point = Waypoint::new(geo::Point::from(s.coord));
            point.name = s.name.clone();
            point
        })
        .collect();

    let mut track = Track::default();
    track.name = route.vehicle().map(str::to_string);
    track.segments.push(segment);

    let waypoints = route
        .waypoints()
        .map(|w| {
            let mut waypoint = Waypoint::new(geo::Point::from(w.coord));
            waypoint.name = w.name.clone();
            waypoint
        })
        .collect();

    let mut gpx = Gpx::default();
    gpx.version = GpxVersion::Gpx11;
    gpx.creator = Some(CREATOR.to_string());
    gpx.waypoints = waypoints;
    gpx.tracks.push(track);
    gpx
}
