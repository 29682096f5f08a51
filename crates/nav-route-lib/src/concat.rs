//! Route concatenation
//!
//! Two routes are joined when the last point of the first equals the first point of the
//! second. The join point becomes a single `Along` segment and the second route's
//! cumulative values are shifted onto the first route's timeline.

use crate::{Result, Route, RouteError, Segment, SegmentKind};

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Route {
    /// Concatenate two routes into a new, independent route
    ///
    /// Both inputs are deep copied and left untouched. If either route has no segments
    /// the other one is returned.
    pub fn concat(&self, other: &Route) -> Result<Route> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        check_endpoints(self, other)?;
        self.clone().concat_owned(other.clone())
    }

    /// Concatenate two routes, reusing the inputs' storage
    ///
    /// Same result as [`Route::concat`] without copying segments.
    pub fn concat_owned(self, other: Route) -> Result<Route> {
        if self.is_empty() {
            return Ok(other);
        }
        if other.is_empty() {
            return Ok(self);
        }
        check_endpoints(&self, &other)?;

        let vehicle = if self.vehicle() == other.vehicle() {
            self.vehicle().map(str::to_string)
        } else {
            None
        };
        let distance = self.distance() + other.distance();
        let time = self.time() + other.time();
        let has_time = self.has_time() && other.has_time();

        let (_, mut tags, mut metrics, mut segments) = self.into_parts();
        let (_, other_tags, other_metrics, other_segments) = other.into_parts();
        tags.extend(other_tags);
        metrics.extend(other_metrics);

        let mut other_segments = other_segments.into_iter();
        let (Some(joint), Some(head)) = (segments.last_mut(), other_segments.next()) else {
            return Err(RouteError::EmptyRoute);
        };
        let offset_distance = joint.distance;
        let offset_time = joint.time;

        // The joint keeps the first route's fields and waypoint order
        joint.kind = SegmentKind::Along;
        let mut skipped = 0;
        for waypoint in head.waypoints {
            if !joint.merge_waypoint(waypoint) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            tracing::debug!("Skipped {} duplicate waypoint(s) at the join point", skipped);
        }

        segments.reserve(other_segments.len());
        segments.extend(other_segments.map(|mut segment: Segment| {
            segment.distance += offset_distance;
            segment.time += offset_time;
            segment
        }));

        tracing::debug!(
            "Concatenated routes into {} segments ({:.1}m, {:.1}s)",
            segments.len(),
            distance,
            time
        );

        Ok(Route::from_parts(
            vehicle, tags, metrics, segments, distance, time, has_time,
        ))
    }
}

fn check_endpoints(first: &Route, second: &Route) -> Result<()> {
    let (Some(last), Some(head)) = (first.segments().last(), second.segments().first()) else {
        return Err(RouteError::EmptyRoute);
    };
    if last.coord != head.coord {
        return Err(RouteError::EndpointMismatch {
            last: last.coord,
            first: head.coord,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::coord;
    use crate::{Tag, Waypoint};

    fn create_route_a() -> Route {
        Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 0.0), 0.0, 0.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 1.0), 100.0, 10.0),
        ])
    }

    fn create_route_b() -> Route {
        Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.0), 0.0, 0.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 2.0), 50.0, 5.0),
        ])
    }

    #[test]
    fn test_worked_example() {
        let a = create_route_a();
        let b = create_route_b();
        let result = a.concat(&b).unwrap();

        let segments = result.segments();
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].coord, coord(0.0, 0.0));
        assert_eq!(segments[0].kind, SegmentKind::Start);
        assert_eq!((segments[0].distance, segments[0].time), (0.0, 0.0));

        assert_eq!(segments[1].coord, coord(0.0, 1.0));
        assert_eq!(segments[1].kind, SegmentKind::Along);
        assert_eq!((segments[1].distance, segments[1].time), (100.0, 10.0));

        assert_eq!(segments[2].coord, coord(0.0, 2.0));
        assert_eq!(segments[2].kind, SegmentKind::Stop);
        assert_eq!((segments[2].distance, segments[2].time), (150.0, 15.0));

        assert_eq!(result.distance(), a.distance() + b.distance());
        assert_eq!(result.time(), 15.0);
    }

    #[test]
    fn test_rebases_every_segment_of_second_route() {
        let a = create_route_a();
        let b = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.0), 0.0, 0.0),
            Segment::new(SegmentKind::Along, coord(0.0, 2.0), 20.0, 2.0),
            Segment::new(SegmentKind::Along, coord(0.0, 3.0), 35.0, 4.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 4.0), 50.0, 6.0),
        ]);
        let result = a.concat(&b).unwrap();

        assert_eq!(result.len(), a.len() + b.len() - 1);
        for (merged, original) in result.segments()[2..].iter().zip(&b.segments()[1..]) {
            assert_eq!(merged.distance, original.distance + 100.0);
            assert_eq!(merged.time, original.time + 10.0);
        }
        assert_eq!(result.segments().last().unwrap().distance, 150.0);
    }

    #[test]
    fn test_endpoint_mismatch() {
        let a = create_route_a();
        let b = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.5), 0.0, 0.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 2.0), 50.0, 5.0),
        ]);
        let err = a.concat(&b).unwrap_err();
        assert!(matches!(err, RouteError::EndpointMismatch { .. }));
        assert!(a.concat_owned(b).is_err());
    }

    #[test]
    fn test_empty_input_returns_other() {
        let a = create_route_a();
        let empty = Route::empty();

        assert_eq!(a.concat(&empty).unwrap().segments(), a.segments());
        assert_eq!(empty.concat(&a).unwrap().segments(), a.segments());
        assert!(empty.concat(&Route::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_waypoint_at_join_is_merged() {
        let shared = Waypoint::new(coord(0.0, 1.0)).with_name("Depot");
        let fresh = Waypoint::new(coord(0.0, 1.0)).with_name("Fuel");
        let earlier = Waypoint::new(coord(0.0, 0.5)).with_name("Bridge");

        let a = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 0.0), 0.0, 0.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 1.0), 100.0, 10.0)
                .with_waypoints(vec![earlier, shared.clone()]),
        ]);
        let b = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.0), 0.0, 0.0)
                .with_waypoints(vec![shared, fresh]),
            Segment::new(SegmentKind::Stop, coord(0.0, 2.0), 50.0, 5.0),
        ]);

        let result = a.concat(&b).unwrap();
        let names: Vec<&str> = result.segments()[1]
            .waypoints
            .iter()
            .filter_map(|w| w.name.as_deref())
            .collect();
        assert_eq!(names, vec!["Bridge", "Depot", "Fuel"]);
        assert_eq!(result.waypoints().filter(|w| w.name.as_deref() == Some("Depot")).count(), 1);
    }

    #[test]
    fn test_waypoint_with_different_tags_is_kept() {
        let plain = Waypoint::new(coord(0.0, 1.0)).with_name("Depot");
        let tagged = plain.clone().with_tags(vec![Tag::new("fuel", "yes")]);

        let a = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 0.0), 0.0, 0.0),
            Segment::new(SegmentKind::Stop, coord(0.0, 1.0), 100.0, 10.0)
                .with_waypoints(vec![plain]),
        ]);
        let b = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.0), 0.0, 0.0)
                .with_waypoints(vec![tagged]),
            Segment::new(SegmentKind::Stop, coord(0.0, 2.0), 50.0, 5.0),
        ]);

        let result = a.concat(&b).unwrap();
        assert_eq!(result.segments()[1].waypoints.len(), 2);
    }

    #[test]
    fn test_vehicle_and_tags() {
        let a = create_route_a()
            .with_vehicle("car")
            .with_tags(vec![Tag::new("mode", "fast")]);
        let b = create_route_b()
            .with_vehicle("car")
            .with_tags(vec![Tag::new("mode", "fast")]);

        let same = a.concat(&b).unwrap();
        assert_eq!(same.vehicle(), Some("car"));
        assert_eq!(same.tags().len(), 2);

        let bike = create_route_b().with_vehicle("bike");
        let mixed = a.concat(&bike).unwrap();
        assert!(mixed.vehicle().is_none());

        let unset = a.concat(&create_route_b()).unwrap();
        assert!(unset.vehicle().is_none());
    }

    #[test]
    fn test_segment_vehicle_untouched() {
        let a = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 0.0), 0.0, 0.0).with_vehicle("car"),
            Segment::new(SegmentKind::Stop, coord(0.0, 1.0), 100.0, 10.0).with_vehicle("car"),
        ])
        .with_vehicle("car");
        let b = Route::new(vec![
            Segment::new(SegmentKind::Start, coord(0.0, 1.0), 0.0, 0.0).with_vehicle("bike"),
            Segment::new(SegmentKind::Stop, coord(0.0, 2.0), 50.0, 5.0).with_vehicle("bike"),
        ])
        .with_vehicle("bike");

        let result = a.concat(&b).unwrap();
        assert!(result.vehicle().is_none());
        assert_eq!(result.segments()[1].vehicle.as_deref(), Some("car"));
        assert_eq!(result.segments()[2].vehicle.as_deref(), Some("bike"));
    }

    #[test]
    fn test_inputs_are_not_aliased() {
        let a = create_route_a();
        let b = create_route_b();
        let result = a.concat(&b).unwrap();

        // Editing the result through a fresh concatenation leaves the inputs intact
        let extended = result
            .concat(&Route::new(vec![
                Segment::new(SegmentKind::Start, coord(0.0, 2.0), 0.0, 0.0),
                Segment::new(SegmentKind::Stop, coord(0.0, 3.0), 10.0, 1.0),
            ]))
            .unwrap();
        assert_eq!(extended.len(), 4);
        assert_eq!(extended.segments()[2].kind, SegmentKind::Along);
        assert_eq!(result.segments()[2].kind, SegmentKind::Stop);
        assert_eq!(a.segments()[1].kind, SegmentKind::Stop);
        assert_eq!(b.segments()[1].distance, 50.0);
    }

    #[test]
    fn test_owned_matches_cloned() {
        let cloned = create_route_a().concat(&create_route_b()).unwrap();
        let owned = create_route_a().concat_owned(create_route_b()).unwrap();
        assert_eq!(cloned.segments(), owned.segments());
        assert_eq!(cloned.distance(), owned.distance());
    }

    #[test]
    fn test_time_flag_requires_both() {
        let a = create_route_a();
        let b = create_route_b().with_time(false);
        assert!(!a.concat(&b).unwrap().has_time());
        assert!(a.concat(&create_route_b()).unwrap().has_time());
    }
}
