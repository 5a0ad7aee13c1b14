// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deciding whether a press grabs an edge or corner of the current selection.
//!
//! ## Zones
//!
//! Each axis is classified on its own. A press within `inner` columns of the minimum
//! edge grabs that edge, within `inner` of the maximum edge grabs the other one, and
//! anything between leaves the axis locked at its current bounds. `inner` is the grab
//! margin in whole columns, shrunk for narrow selections so the two edge zones cannot
//! meet in the middle.
//!
//! A press with both axes locked is in the interior; like a press outside the margin,
//! it starts a fresh selection.
//!
//! ```
//! use strata_select::grab::{classify, Grab};
//! use strata_select::Selection;
//! use strata_view::Column;
//!
//! let sel = Selection::from_corners(Column::new(0, 0), Column::new(100, 100), 0, 255);
//!
//! // Near the south-east corner: both edges follow the pointer.
//! let Grab::Adjust(adj) = classify(Column::new(98, 102), &sel, 5.0) else {
//!     panic!("expected a corner grab");
//! };
//! assert_eq!(adj.anchor(), Column::new(0, 0));
//! assert_eq!(adj.follow(Column::new(120, 130)), Column::new(120, 130));
//!
//! // Deep inside: a new selection starts.
//! assert_eq!(classify(Column::new(50, 50), &sel, 5.0), Grab::Interior);
//! ```

use strata_view::Column;

use crate::Selection;

/// Where a press falls along one axis of the selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisZone {
    /// Near the minimum edge; the maximum edge stays put.
    MinSide,
    /// Near the maximum edge; the minimum edge stays put.
    MaxSide,
    /// Between the edge zones; the axis keeps its bounds while dragging.
    Locked,
}

/// Classification of one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisGrab {
    /// Which zone the press fell in.
    pub zone: AxisZone,
    /// Fixed end of the axis during the drag.
    pub anchor: i32,
    /// Moving end of the axis; follows the pointer unless locked.
    pub live: i32,
}

impl AxisGrab {
    /// Whether this axis ignores pointer motion.
    pub fn is_locked(&self) -> bool {
        self.zone == AxisZone::Locked
    }

    /// Moving end for a pointer coordinate.
    pub fn follow(&self, pointer: i32) -> i32 {
        if self.is_locked() { self.live } else { pointer }
    }
}

/// Classify one axis of a press at `m` against the inclusive range `min..=max`.
///
/// `margin` is in world units and is truncated to whole columns.
pub fn classify_axis(m: i32, min: i32, max: i32, margin: f64) -> AxisGrab {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "margins are a few columns wide; saturating conversion is intended"
    )]
    let margin = margin as i32;
    let (m64, min64, max64) = (i64::from(m), i64::from(min), i64::from(max));
    let inner = i64::from(margin).min((max64 - min64 - 1) / 2);
    if m64 <= min64 + inner {
        AxisGrab {
            zone: AxisZone::MinSide,
            anchor: max,
            live: m,
        }
    } else if m64 >= max64 - inner {
        AxisGrab {
            zone: AxisZone::MaxSide,
            anchor: min,
            live: m,
        }
    } else {
        AxisGrab {
            zone: AxisZone::Locked,
            anchor: min,
            live: max,
        }
    }
}

/// An edge or corner grab of an existing selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Adjustment {
    /// East-west classification.
    pub x: AxisGrab,
    /// North-south classification.
    pub z: AxisGrab,
}

impl Adjustment {
    /// Fixed corner.
    pub fn anchor(&self) -> Column {
        Column::new(self.x.anchor, self.z.anchor)
    }

    /// Moving corner at the time of the press.
    pub fn live(&self) -> Column {
        Column::new(self.x.live, self.z.live)
    }

    /// Moving corner for a pointer column; locked axes keep their bounds.
    pub fn follow(&self, pointer: Column) -> Column {
        Column::new(self.x.follow(pointer.x), self.z.follow(pointer.z))
    }
}

/// Result of classifying a press against the current selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grab {
    /// No selection, or the press is outside the grab margin.
    Miss,
    /// Inside the selection, away from every edge.
    Interior,
    /// An edge or corner is grabbed.
    Adjust(Adjustment),
}

/// Classify a press at `pointer` against `selection`.
///
/// `margin` is the grab tolerance in world units (the pixel margin divided by the scale).
pub fn classify(pointer: Column, selection: &Selection, margin: f64) -> Grab {
    if !selection.within_grab_range(pointer, margin) {
        return Grab::Miss;
    }
    let (min, max) = (selection.min_column(), selection.max_column());
    let x = classify_axis(pointer.x, min.x, max.x, margin);
    let z = classify_axis(pointer.z, min.z, max.z, margin);
    if x.is_locked() && z.is_locked() {
        Grab::Interior
    } else {
        Grab::Adjust(Adjustment { x, z })
    }
}
