// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection box: a footprint of map columns plus a vertical range.

use kurbo::{Point, Rect};
use strata_view::Column;

/// Inclusive integer bounds of a region to export.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExportBox {
    /// Western edge.
    pub min_x: i32,
    /// Bottom layer.
    pub min_y: i32,
    /// Northern edge.
    pub min_z: i32,
    /// Eastern edge.
    pub max_x: i32,
    /// Top layer.
    pub max_y: i32,
    /// Southern edge.
    pub max_z: i32,
}

impl ExportBox {
    /// Copy of this box with every axis ordered `min <= max`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            min_z: self.min_z.min(self.max_z),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
            max_z: self.min_z.max(self.max_z),
        }
    }

    /// Number of blocks along each axis, `(x, y, z)`, saturating at `u32::MAX`.
    pub fn extent(&self) -> (u32, u32, u32) {
        let n = self.normalized();
        (
            n.max_x.abs_diff(n.min_x).saturating_add(1),
            n.max_y.abs_diff(n.min_y).saturating_add(1),
            n.max_z.abs_diff(n.min_z).saturating_add(1),
        )
    }
}

/// The current selection box.
///
/// While active, every axis is stored with `min <= max`. The footprint is the inclusive
/// column range `min..=max` on `x` and `z`; the vertical range comes from the view's two
/// depth bounds, ordered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    active: bool,
    min: Column,
    max: Column,
    min_y: i32,
    max_y: i32,
}

impl Selection {
    /// No selection.
    pub const fn inactive() -> Self {
        Self {
            active: false,
            min: Column::new(0, 0),
            max: Column::new(0, 0),
            min_y: 0,
            max_y: 0,
        }
    }

    /// An active selection spanning two corners and two depths, in any order.
    pub fn from_corners(anchor: Column, live: Column, lower: i32, upper: i32) -> Self {
        Self {
            active: true,
            min: Column::new(anchor.x.min(live.x), anchor.z.min(live.z)),
            max: Column::new(anchor.x.max(live.x), anchor.z.max(live.z)),
            min_y: lower.min(upper),
            max_y: lower.max(upper),
        }
    }

    /// An active selection covering `bounds`.
    pub fn from_export_box(bounds: ExportBox) -> Self {
        let b = bounds.normalized();
        Self {
            active: true,
            min: Column::new(b.min_x, b.min_z),
            max: Column::new(b.max_x, b.max_z),
            min_y: b.min_y,
            max_y: b.max_y,
        }
    }

    /// Whether a selection exists.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// North-west corner column.
    pub fn min_column(&self) -> Column {
        self.min
    }

    /// South-east corner column.
    pub fn max_column(&self) -> Column {
        self.max
    }

    /// Bottom layer.
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Top layer.
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Replace the vertical range with two depths, in either order.
    ///
    /// Has no effect on an inactive selection.
    pub fn set_depths(&mut self, lower: i32, upper: i32) {
        if self.active {
            self.min_y = lower.min(upper);
            self.max_y = lower.max(upper);
        }
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        *self = Self::inactive();
    }

    /// The footprint is a single column; nobody exports one column, so such a
    /// selection is dropped on release.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Inclusive bounds, if a selection exists.
    pub fn export_box(&self) -> Option<ExportBox> {
        self.active.then_some(ExportBox {
            min_x: self.min.x,
            min_y: self.min_y,
            min_z: self.min.z,
            max_x: self.max.x,
            max_y: self.max_y,
            max_z: self.max.z,
        })
    }

    /// Middle column of the footprint, rounding toward zero.
    pub fn center(&self) -> Option<Column> {
        self.active.then(|| {
            Column::new(
                midpoint(self.min.x, self.max.x),
                midpoint(self.min.z, self.max.z),
            )
        })
    }

    /// Footprint in world units, grown by `margin` on every side.
    ///
    /// Columns are treated as points here, matching how the grab test compares
    /// column indices against the margin-expanded bounds.
    pub fn grab_region(&self, margin: f64) -> Option<Rect> {
        self.active.then(|| {
            Rect::from_points(self.min.origin(), self.max.origin()).inflate(margin, margin)
        })
    }

    /// Whether `column` lies within `margin` world units of the footprint, edges
    /// included.
    pub fn within_grab_range(&self, column: Column, margin: f64) -> bool {
        let Some(region) = self.grab_region(margin) else {
            return false;
        };
        let p: Point = column.origin();
        p.x >= region.x0 && p.x <= region.x1 && p.y >= region.y0 && p.y <= region.y1
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the midpoint of two i32 values fits in i32"
)]
fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}
