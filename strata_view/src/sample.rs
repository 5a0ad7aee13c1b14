// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Access to what lies under a map column.

use crate::Column;

/// What the world data source reports for one column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSample {
    /// Height of the top solid block at or below the probed depth.
    ///
    /// Values outside `0..=max_height` mean no block was found (for example an
    /// unloaded chunk); `-1` marks the void below the world.
    pub height: i32,
    /// Block type id.
    pub block: u16,
    /// Human-readable block name.
    pub label: String,
    /// The block is flat-topped (a rail, carpet or pressure plate, say), so the column
    /// really starts one layer lower for export.
    pub flat_top: bool,
}

impl ColumnSample {
    /// The lower depth that picking this column should set.
    ///
    /// Flat-topped blocks pick the layer beneath them. Returns `None` when no block was
    /// found within `0..=max_height`.
    pub fn picked_depth(&self, max_height: i32) -> Option<i32> {
        if !(0..=max_height).contains(&self.height) {
            return None;
        }
        if self.flat_top && self.height > 0 {
            Some(self.height - 1)
        } else {
            Some(self.height)
        }
    }
}

/// Source of per-column world data.
///
/// Implemented by the host's world loader; the selection engine only probes single
/// columns, for status text and for picking depths.
pub trait ColumnSampler {
    /// Describe the top solid block of `column` at or below `depth`.
    fn sample(&self, column: Column, depth: i32) -> ColumnSample;
}

impl<S: ColumnSampler + ?Sized> ColumnSampler for &S {
    fn sample(&self, column: Column, depth: i32) -> ColumnSample {
        (**self).sample(column, depth)
    }
}
