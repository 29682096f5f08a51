//! Fixed-interval sampling along a route

use crate::{Result, Route, RouteError};
use geo::Coord;

/// Lazy sequence of positions every `interval` meters along a route
///
/// Each call to `into_iter` starts again from the route start, so the same `Samples`
/// can be traversed any number of times. The route is only read.
#[derive(Clone, Copy, Debug)]
pub struct Samples<'a> {
    route: &'a Route,
    interval: f64,
}

/// Iterator over the positions of a [`Samples`] traversal
#[derive(Clone, Debug)]
pub struct SamplesIter<'a> {
    route: &'a Route,
    interval: f64,
    length: f64,
    next_step: usize,
}

impl Route {
    /// Sample the route every `interval` meters, starting at the first point
    ///
    /// The interval must be finite and positive.
    pub fn samples(&self, interval: f64) -> Result<Samples<'_>> {
        if !interval.is_finite() || interval <= 0.0 {
            tracing::warn!("Rejected sampling interval {}", interval);
            return Err(RouteError::InvalidInterval(interval));
        }
        if self.is_empty() {
            tracing::warn!("Sampling an empty route yields no positions");
        }
        Ok(Samples {
            route: self,
            interval,
        })
    }
}

impl<'a> Samples<'a> {
    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn iter(&self) -> SamplesIter<'a> {
        let length = self.route.geodesic_length();
        tracing::trace!(
            "Sampling {:.1}m every {}m over {} segments",
            length,
            self.interval,
            self.route.len()
        );
        SamplesIter {
            route: self.route,
            interval: self.interval,
            length,
            next_step: 0,
        }
    }
}

impl<'a> IntoIterator for Samples<'a> {
    type Item = Coord<f64>;
    type IntoIter = SamplesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Samples<'a> {
    type Item = Coord<f64>;
    type IntoIter = SamplesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Iterator for SamplesIter<'_> {
    type Item = Coord<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        // Multiply instead of accumulating to keep sample positions exact
        let distance = self.next_step as f64 * self.interval;
        if distance > self.length {
            return None;
        }
        let position = self.route.position_after_distance(distance)?;
        self.next_step += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.route.is_empty() {
            return (0, Some(0));
        }
        match last_step(self.length, self.interval) {
            Some(last) => (0, Some((last + 1).saturating_sub(self.next_step))),
            None => (0, None),
        }
    }
}

/// Steps are only counted exactly while they stay integral in an `f64`
const MAX_EXACT_STEP: f64 = (1u64 << 53) as f64;

/// Highest step `n` with `n * interval <= length`
///
/// The division may round either way, so the estimate is corrected with the same
/// comparison the iterator stops on. `None` when the count is too large to be exact.
fn last_step(length: f64, interval: f64) -> Option<usize> {
    let estimate = (length / interval).floor();
    if !estimate.is_finite() || estimate < 0.0 || estimate >= MAX_EXACT_STEP {
        return None;
    }
    let mut last = estimate as usize;
    while last > 0 && last as f64 * interval > length {
        last -= 1;
    }
    while ((last + 1) as f64) * interval <= length {
        last += 1;
    }
    Some(last)
}
