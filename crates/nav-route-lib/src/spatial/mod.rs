//! Bounding-box spatial indices over located payloads
//!
//! [`NaiveSpatialIndex`] is the unindexed reference: it scans every entry on each query.
//! Accelerated indices such as [`QuadtreeIndex`] must return exactly the same payload
//! sets for any sequence of insertions and any query box.

mod quadtree;

pub use quadtree::{QuadtreeConfig, QuadtreeIndex};

use crate::geo_utils;
use geo::{Coord, Rect};
use std::collections::HashSet;
use std::hash::Hash;

/// Membership index answering "which payloads lie inside this box"
///
/// Containment includes the box boundary. Insertion takes `&mut self` and queries `&self`,
/// so shared use across threads needs a build-then-query discipline or external locking.
pub trait SpatialIndex<T: Eq + Hash> {
    /// Store a payload at a location; duplicates of either are allowed
    fn add(&mut self, location: Coord<f64>, payload: T);

    /// Distinct payloads whose location lies inside `bbox`
    fn get_inside(&self, bbox: &Rect<f64>) -> HashSet<&T>;

    /// Number of stored entries, duplicates included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Linear-scan index, O(N) per query
#[derive(Clone, Debug)]
pub struct NaiveSpatialIndex<T> {
    entries: Vec<(Coord<f64>, T)>,
}

impl<T> NaiveSpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Default for NaiveSpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> SpatialIndex<T> for NaiveSpatialIndex<T> {
    fn add(&mut self, location: Coord<f64>, payload: T) {
        self.entries.push((location, payload));
    }

    fn get_inside(&self, bbox: &Rect<f64>) -> HashSet<&T> {
        self.entries
            .iter()
            .filter(|(location, _)| geo_utils::rect_contains(bbox, *location))
            .map(|(_, payload)| payload)
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
