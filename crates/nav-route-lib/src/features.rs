//! Generic vector-feature export for rendering tools
//!
//! A route becomes one line-string feature per traversed segment and one point feature per
//! waypoint. Serializing the features (GeoJSON, vector tiles, ...) is up to the caller.

use crate::{Route, Tag};
use geo::{Geometry, LineString, Point};
use std::collections::BTreeMap;

/// Attribute value attached to a feature
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    Text(String),
    Number(f64),
}

/// A geometry with its attributes
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub properties: BTreeMap<String, Property>,
}

/// Attribute keys added next to the tags of a segment feature
pub const TIME_KEY: &str = "time";
pub const DISTANCE_KEY: &str = "distance";
pub const VEHICLE_KEY: &str = "vehicle";

fn tag_properties(tags: &[Tag]) -> BTreeMap<String, Property> {
    tags.iter()
        .map(|tag| (tag.key.clone(), Property::Text(tag.value.clone())))
        .collect()
}

/// Convert a route into features
///
/// Segment features come first in traversal order, followed by the waypoint features.
/// The first segment only marks the start, so it produces no line.
pub fn route_features(route: &Route) -> Vec<Feature> {
    let segments = route.segments();
    let mut features = Vec::with_capacity(segments.len() + route.waypoints().count());

    for pair in segments.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let mut properties = tag_properties(&to.tags);
        if route.has_time() {
            properties.insert(TIME_KEY.to_string(), Property::Number(to.time));
        }
        properties.insert(DISTANCE_KEY.to_string(), Property::Number(to.distance));
        if let Some(vehicle) = to.vehicle.as_deref().or(route.vehicle()) {
            properties.insert(VEHICLE_KEY.to_string(), Property::Text(vehicle.to_string()));
        }

        features.push(Feature {
            geometry: Geometry::LineString(LineString::new(vec![from.coord, to.coord])),
            properties,
        });
    }

    features.extend(route.waypoints().map(|waypoint| Feature {
        geometry: Geometry::Point(Point::from(waypoint.coord)),
        properties: tag_properties(&waypoint.tags),
    }));

    tracing::debug!("Exported {} features", features.len());
    features
}
