//! Point quadtree index
//!
//! Entries are stored in the deepest node whose bounds contain them. A node splits into
//! four children once it holds more than `max_items_per_node` entries, unless it already
//! sits at `max_depth`. Entries outside the root bounds (or with non-finite coordinates)
//! are kept in an overflow list that every query scans.

use super::SpatialIndex;
use crate::geo_utils;
use geo::{Coord, Rect};
use std::collections::HashSet;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the quadtree index
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadtreeConfig {
    /// Root bounds. Default: the whole longitude/latitude plane
    pub bounds: Rect<f64>,
    /// Entries a node holds before it subdivides. Default: 16
    pub max_items_per_node: usize,
    /// Maximum depth of the tree, to bound recursion on stacked points. Default: 20
    pub max_depth: u32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(Coord { x: -180.0, y: -90.0 }, Coord { x: 180.0, y: 90.0 }),
            max_items_per_node: 16,
            max_depth: 20,
        }
    }
}

/// Quadtree-backed [`SpatialIndex`]
#[derive(Debug, Clone)]
pub struct QuadtreeIndex<T> {
    root: QuadtreeNode<T>,
    /// Entries that do not fit the root bounds
    overflow: Vec<(Coord<f64>, T)>,
    config: QuadtreeConfig,
    len: usize,
}

/// A single node of the quadtree
#[derive(Debug, Clone)]
struct QuadtreeNode<T> {
    bounding_box: Rect<f64>,
    /// Depth level in the tree (0 = root)
    level: u32,
    entries: Vec<(Coord<f64>, T)>,
    /// Child nodes (NW, NE, SW, SE) if subdivided
    children: Option<Box<[QuadtreeNode<T>; 4]>>,
}

impl<T> QuadtreeIndex<T> {
    pub fn new(config: QuadtreeConfig) -> Self {
        Self {
            root: QuadtreeNode::new(config.bounds, 0),
            overflow: Vec::new(),
            config,
            len: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Depth of the deepest subdivided level
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }
}

impl<T> Default for QuadtreeIndex<T> {
    fn default() -> Self {
        Self::new(QuadtreeConfig::default())
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl<T: Eq + Hash> SpatialIndex<T> for QuadtreeIndex<T> {
    fn add(&mut self, location: Coord<f64>, payload: T) {
        self.len += 1;
        if !geo_utils::rect_contains(&self.root.bounding_box, location) {
            tracing::trace!(
                "Location ({}, {}) outside quadtree bounds, kept in overflow",
                location.y,
                location.x
            );
            self.overflow.push((location, payload));
            return;
        }
        self.root.insert(location, payload, &self.config);
    }

    fn get_inside(&self, bbox: &Rect<f64>) -> HashSet<&T> {
        let mut results = HashSet::new();
        self.root.query(bbox, &mut results);
        results.extend(
            self.overflow
                .iter()
                .filter(|(location, _)| geo_utils::rect_contains(bbox, *location))
                .map(|(_, payload)| payload),
        );
        results
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T> QuadtreeNode<T> {
    fn new(bounding_box: Rect<f64>, level: u32) -> Self {
        Self {
            bounding_box,
            level,
            entries: Vec::new(),
            children: None,
        }
    }

    fn depth(&self) -> u32 {
        match &self.children {
            Some(children) => children.iter().map(|c| c.depth()).max().unwrap_or(self.level),
            None => self.level,
        }
    }

    /// Index of the child quadrant a location belongs to
    ///
    /// Points on the midlines go to the east / north side.
    fn child_index(bounding_box: &Rect<f64>, location: Coord<f64>) -> usize {
        let min = bounding_box.min();
        let max = bounding_box.max();
        let mid_x = (min.x + max.x) / 2.0;
        let mid_y = (min.y + max.y) / 2.0;

        match (location.x >= mid_x, location.y >= mid_y) {
            (false, true) => 0, // NW
            (true, true) => 1,  // NE
            (false, false) => 2, // SW
            (true, false) => 3, // SE
        }
    }

    /// Subdivide this node into 4 children
    fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let min = self.bounding_box.min();
        let max = self.bounding_box.max();
        let mid_x = (min.x + max.x) / 2.0;
        let mid_y = (min.y + max.y) / 2.0;
        let child_level = self.level + 1;

        let nw = QuadtreeNode::new(
            Rect::new(Coord { x: min.x, y: mid_y }, Coord { x: mid_x, y: max.y }),
            child_level,
        );
        let ne = QuadtreeNode::new(
            Rect::new(Coord { x: mid_x, y: mid_y }, Coord { x: max.x, y: max.y }),
            child_level,
        );
        let sw = QuadtreeNode::new(
            Rect::new(Coord { x: min.x, y: min.y }, Coord { x: mid_x, y: mid_y }),
            child_level,
        );
        let se = QuadtreeNode::new(
            Rect::new(Coord { x: mid_x, y: min.y }, Coord { x: max.x, y: mid_y }),
            child_level,
        );

        self.children = Some(Box::new([nw, ne, sw, se]));

        // Push existing entries down
        for (location, payload) in std::mem::take(&mut self.entries) {
            let index = Self::child_index(&self.bounding_box, location);
            if let Some(children) = &mut self.children {
                children[index].entries.push((location, payload));
            }
        }
    }

    fn insert(&mut self, location: Coord<f64>, payload: T, config: &QuadtreeConfig) {
        if let Some(children) = &mut self.children {
            let index = Self::child_index(&self.bounding_box, location);
            children[index].insert(location, payload, config);
            return;
        }

        self.entries.push((location, payload));

        if self.entries.len() > config.max_items_per_node && self.level < config.max_depth {
            self.subdivide();
        }
    }

    fn query<'a>(&'a self, bbox: &Rect<f64>, results: &mut HashSet<&'a T>)
    where
        T: Eq + Hash,
    {
        if !geo_utils::rects_intersect(&self.bounding_box, bbox) {
            return;
        }

        results.extend(
            self.entries
                .iter()
                .filter(|(location, _)| geo_utils::rect_contains(bbox, *location))
                .map(|(_, payload)| payload),
        );

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(bbox, results);
            }
        }
    }
}
