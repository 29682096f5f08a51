//! Route model
//!
//! This module provides the `Route` snapshot and its nested entities. Routes are produced
//! by an external route builder; every type here is plain owned data, so `Clone` is a
//! deep copy and a `&Route` can be shared freely between threads.

use crate::{Metric, Result, RouteError, Tag};
use chrono::{DateTime, Utc};
use geo::Coord;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Role of a segment within the traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    /// Logical start, carries no incoming-edge data
    Start,
    /// Intermediate step with full incoming-edge data
    #[default]
    Along,
    /// Terminal point
    Stop,
}

/// A named point of interest attached to a segment
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub coord: Coord<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: Vec<Metric>,
}

/// A rejected alternative at a junction, kept for display only
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Branch {
    pub coord: Coord<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Names keyed by language code
    #[cfg_attr(feature = "serde", serde(default))]
    pub names: BTreeMap<String, String>,
}

/// One step of a route, ending at `coord`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub kind: SegmentKind,
    pub coord: Coord<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: Vec<Metric>,
    /// Cumulative distance from the route start in meters
    pub distance: f64,
    /// Cumulative time from the route start in seconds
    pub time: f64,
    /// Waypoints encountered since the previous segment
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Waypoint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Names keyed by language code
    #[cfg_attr(feature = "serde", serde(default))]
    pub names: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub branches: Vec<Branch>,
}

/// A previously computed route
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    #[cfg_attr(feature = "serde", serde(default))]
    vehicle: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(default))]
    metrics: Vec<Metric>,
    #[cfg_attr(feature = "serde", serde(default))]
    segments: Vec<Segment>,
    /// Total distance in meters
    distance: f64,
    /// Total time in seconds
    time: f64,
    /// Whether the time values carry meaning
    has_time: bool,
    #[cfg_attr(feature = "serde", serde(default = "Utc::now"))]
    created: DateTime<Utc>,
}

impl Waypoint {
    pub fn new(coord: Coord<f64>) -> Self {
        Self {
            name: None,
            coord,
            tags: Vec::new(),
            metrics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether both waypoints denote the same point of interest
    ///
    /// Coordinates, name and tags must match exactly, tags compared in order.
    /// Metrics are ignored. A waypoint without tags matches only another one without tags.
    pub fn represents_same(&self, other: &Waypoint) -> bool {
        self.coord == other.coord && self.name == other.name && self.tags == other.tags
    }
}

impl Branch {
    pub fn new(coord: Coord<f64>) -> Self {
        Self {
            coord,
            tags: Vec::new(),
            name: None,
            names: BTreeMap::new(),
        }
    }
}

impl Segment {
    /// Create a segment ending at `coord` with the given cumulative values
    pub fn new(kind: SegmentKind, coord: Coord<f64>, distance: f64, time: f64) -> Self {
        Self {
            kind,
            coord,
            vehicle: None,
            tags: Vec::new(),
            metrics: Vec::new(),
            distance,
            time,
            waypoints: Vec::new(),
            name: None,
            names: BTreeMap::new(),
            branches: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    #[must_use]
    pub fn with_branches(mut self, branches: Vec<Branch>) -> Self {
        self.branches = branches;
        self
    }

    /// Add a waypoint unless an equivalent one is already attached
    ///
    /// Returns `true` if the waypoint was appended.
    pub fn merge_waypoint(&mut self, waypoint: Waypoint) -> bool {
        if self.waypoints.iter().any(|w| w.represents_same(&waypoint)) {
            return false;
        }
        self.waypoints.push(waypoint);
        true
    }
}

impl Route {
    /// Create a route from its segments
    ///
    /// Total distance and time are taken from the last segment. The route is stamped
    /// with the current time and carries meaningful time values by default.
    pub fn new(segments: Vec<Segment>) -> Self {
        let (distance, time) = segments
            .last()
            .map(|s| (s.distance, s.time))
            .unwrap_or((0.0, 0.0));

        Self {
            vehicle: None,
            tags: Vec::new(),
            metrics: Vec::new(),
            segments,
            distance,
            time,
            has_time: true,
            created: Utc::now(),
        }
    }

    /// A route without segments
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Mark whether the cumulative time values carry meaning
    #[must_use]
    pub fn with_time(mut self, has_time: bool) -> Self {
        self.has_time = has_time;
        self
    }

    /// Override the stored totals
    #[must_use]
    pub fn with_totals(mut self, distance: f64, time: f64) -> Self {
        self.distance = distance;
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Assemble a route from already computed parts
    pub(crate) fn from_parts(
        vehicle: Option<String>,
        tags: Vec<Tag>,
        metrics: Vec<Metric>,
        segments: Vec<Segment>,
        distance: f64,
        time: f64,
        has_time: bool,
    ) -> Self {
        Self {
            vehicle,
            tags,
            metrics,
            segments,
            distance,
            time,
            has_time,
            created: Utc::now(),
        }
    }

    /// Decompose into the route-level parts, handing over segment ownership
    pub(crate) fn into_parts(self) -> (Option<String>, Vec<Tag>, Vec<Metric>, Vec<Segment>) {
        (self.vehicle, self.tags, self.metrics, self.segments)
    }

    #[inline]
    pub fn vehicle(&self) -> Option<&str> {
        self.vehicle.as_deref()
    }

    #[inline]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[inline]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total distance in meters as stored by the route builder
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total time in seconds as stored by the route builder
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    #[inline]
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// All waypoints in traversal order
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.segments.iter().flat_map(|s| s.waypoints.iter())
    }

    /// Check the structural invariants of the route
    ///
    /// The query operations assume these hold and never call this themselves.
    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(RouteError::EmptyRoute);
        }

        for (index, pair) in self.segments.windows(2).enumerate() {
            if pair[1].distance < pair[0].distance {
                return Err(RouteError::NonMonotonic {
                    index: index + 1,
                    field: "distance",
                });
            }
            if self.has_time && pair[1].time < pair[0].time {
                return Err(RouteError::NonMonotonic {
                    index: index + 1,
                    field: "time",
                });
            }
        }

        Ok(())
    }
}
