//! Key/value annotations attached to routes, segments, waypoints and branches

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A descriptive string annotation
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A numeric annotation
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metric {
    pub key: String,
    pub value: f64,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Metric {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Convert a mapping into tags, ordered by key
pub fn tags_from_map(map: &BTreeMap<String, String>) -> Vec<Tag> {
    map.iter().map(|(k, v)| Tag::new(k.clone(), v.clone())).collect()
}

/// Convert tags into a mapping
///
/// When a key repeats, the last occurrence wins.
pub fn tags_to_map(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|tag| (tag.key.clone(), tag.value.clone()))
        .collect()
}

/// Convert a mapping into metrics, ordered by key
pub fn metrics_from_map(map: &BTreeMap<String, f64>) -> Vec<Metric> {
    map.iter().map(|(k, v)| Metric::new(k.clone(), *v)).collect()
}

/// Convert metrics into a mapping
///
/// When a key repeats, the last occurrence wins.
pub fn metrics_to_map(metrics: &[Metric]) -> BTreeMap<String, f64> {
    metrics
        .iter()
        .map(|metric| (metric.key.clone(), metric.value))
        .collect()
}
