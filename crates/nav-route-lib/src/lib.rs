//! Navigation Route Library - Query engine for precomputed navigation routes
//!
//! This library represents routes that were already computed by an external route builder
//! (ordered segments with cumulative distance and time, tags, waypoints) and answers
//! geometric and temporal questions about them.
//!
//! # Architecture
//!
//! - **[`Route`]**: Owned snapshot of a route with its [`Segment`]s and [`Waypoint`]s
//! - **[`geometry`]**: Point extraction, bounding box, position after distance, projection
//! - **[`Route::concat`]**: Merges two routes that share an endpoint
//! - **[`Samples`]**: Lazy fixed-interval sampling along a route
//! - **[`SpatialIndex`]**: Bounding-box membership index with a naive baseline and a quadtree
//! - **[`features`]** / **[`gpx_export`]**: Export boundaries for rendering tools
//! - **[`LocalSearchOperator`]**: Contract for pluggable route improvement moves
//!
//! # Performance Characteristics
//!
//! - **Point queries**: O(N) per call over the segment sequence
//! - **Concatenation**: O(A + B), allocates a new route unless the inputs are consumed
//! - **Naive index query**: O(N); quadtree query: O(log N + K) for well spread inputs

mod concat;
pub mod features;
pub mod geo_utils;
pub mod geometry;
pub mod gpx_export;
mod local_search;
mod model;
mod sampling;
mod spatial;
mod tags;

// Public API exports
pub use geometry::{Projection, project_all};
pub use local_search::{Improvement, LocalSearchOperator};
pub use model::{Branch, Route, Segment, SegmentKind, Waypoint};
pub use sampling::{Samples, SamplesIter};
pub use spatial::{NaiveSpatialIndex, QuadtreeConfig, QuadtreeIndex, SpatialIndex};
pub use tags::{Metric, Tag, metrics_from_map, metrics_to_map, tags_from_map, tags_to_map};

/// Error types for route operations
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(
        "Routes do not share an endpoint: last point ({}, {}) != first point ({}, {})",
        .last.y, .last.x, .first.y, .first.x
    )]
    EndpointMismatch {
        last: geo::Coord<f64>,
        first: geo::Coord<f64>,
    },

    #[error("Empty route")]
    EmptyRoute,

    #[error("Invalid sampling interval: {0} (must be finite and positive)")]
    InvalidInterval(f64),

    #[error("Cumulative {field} decreases at segment {index}")]
    NonMonotonic { index: usize, field: &'static str },
}

pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(Vec<Segment>) -> Route = Route::new;
        let _: fn() -> NaiveSpatialIndex<u32> = NaiveSpatialIndex::new;
        let _: fn() -> QuadtreeConfig = QuadtreeConfig::default;
    }

    #[test]
    fn test_error_messages() {
        let err = RouteError::EndpointMismatch {
            last: geo::Coord { x: 1.0, y: 0.0 },
            first: geo::Coord { x: 2.0, y: 0.0 },
        };
        assert_eq!(
            err.to_string(),
            "Routes do not share an endpoint: last point (0, 1) != first point (0, 2)"
        );
        assert_eq!(RouteError::EmptyRoute.to_string(), "Empty route");
    }
}
