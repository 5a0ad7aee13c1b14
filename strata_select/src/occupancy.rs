// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-redraw counts of visible material relative to the selection's vertical range.

/// What a redraw saw inside the selection footprint.
///
/// Renderers call [`OccupancySample::record`] for each visible solid block top they
/// draw within the footprint. Heights below the lower bound count as `below`, heights
/// within the bounds as `inside` and heights over the upper bound as `above`.
/// `min_solid_y` tracks the lowest height seen in the first two buckets, so whenever
/// `below > 0` it is the lowest height found beneath the selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OccupancySample {
    /// Solid tops found beneath the selection.
    pub below: u32,
    /// Solid tops found within the selection's vertical range.
    pub inside: u32,
    /// Solid tops found over the selection.
    pub above: u32,
    /// Lowest solid height seen at or below the upper bound; `max_height + 1` when
    /// nothing was seen.
    pub min_solid_y: i32,
}

impl OccupancySample {
    /// A sample that has seen nothing.
    pub fn empty(max_height: i32) -> Self {
        Self {
            below: 0,
            inside: 0,
            above: 0,
            min_solid_y: max_height.saturating_add(1),
        }
    }

    /// Forget everything seen so far.
    pub fn reset(&mut self, max_height: i32) {
        *self = Self::empty(max_height);
    }

    /// Count one visible solid block top at `height` against the depth bounds
    /// `(lower, upper)`, given in either order.
    pub fn record(&mut self, height: i32, bounds: (i32, i32)) {
        let (lo, hi) = if bounds.0 <= bounds.1 {
            bounds
        } else {
            (bounds.1, bounds.0)
        };
        if height > hi {
            self.above += 1;
            return;
        }
        if height < lo {
            self.below += 1;
        } else {
            self.inside += 1;
        }
        self.min_solid_y = self.min_solid_y.min(height);
    }

    /// Anything was seen beneath the selection.
    pub fn has_below(&self) -> bool {
        self.below > 0
    }

    /// Anything was seen within the selection.
    pub fn has_inside(&self) -> bool {
        self.inside > 0
    }

    /// Nothing was seen at all.
    pub fn is_empty(&self) -> bool {
        self.below == 0 && self.inside == 0 && self.above == 0
    }
}

impl Default for OccupancySample {
    fn default() -> Self {
        Self::empty(strata_view::config::MAX_HEIGHT)
    }
}
