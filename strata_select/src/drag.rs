// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag state machine: panning, drawing new selections and reshaping existing ones.
//!
//! ## States
//!
//! - `Idle`: nothing in flight.
//! - `Panning`: the primary button is down; every move drags the map.
//! - `SelectingNew`: the secondary button is down and a fresh selection grows from the
//!   press column to the pointer.
//! - `Adjusting`: the secondary button grabbed an edge or corner of the existing
//!   selection (see [`grab`](crate::grab)); the grabbed sides follow the pointer.
//!
//! Every transition returns the [`DragEffect`]s it produced, in order, so the caller can
//! redraw, reset occupancy tracking or run autocorrection as needed. The machine updates
//! the [`View`] (for panning) and the [`Selection`] directly.
//!
//! Pressing a different button while a drag is in flight, or losing pointer capture,
//! ends the drag on the spot: a selection being drawn is kept as it stands (or dropped
//! if it covers a single column) and autocorrection is skipped.
//!
//! ```
//! use kurbo::{Point, Size};
//! use strata_select::drag::{Commit, DragEffect, DragMachine, PointerButton};
//! use strata_select::Selection;
//! use strata_view::{Column, View, ViewConfig};
//!
//! let mut view = View::new(&ViewConfig::default(), Size::new(100.0, 100.0));
//! let mut selection = Selection::inactive();
//! let mut drag = DragMachine::new();
//!
//! drag.press(PointerButton::Secondary, Point::new(60.0, 60.0), &mut view, &mut selection);
//! drag.motion(Point::new(75.0, 90.0), &mut view, &mut selection);
//! let effects = drag.release(PointerButton::Secondary, &mut selection);
//! assert_eq!(effects, vec![DragEffect::Committed(Commit::Created)]);
//! assert_eq!(selection.min_column(), Column::new(10, 10));
//! assert_eq!(selection.max_column(), Column::new(25, 40));
//! ```

use kurbo::Point;
use strata_view::{Column, View, transform};

use crate::Selection;
use crate::grab::{self, Adjustment, Grab};

/// Pointer buttons the map reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Pans the map.
    Primary,
    /// Draws, reshapes and clears selections.
    Secondary,
    /// Picks the lower depth from the block under the pointer.
    Middle,
}

/// Current drag.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag.
    #[default]
    Idle,
    /// Dragging the map; `last` is the previous pointer position.
    Panning {
        /// Previous pointer position in map-area pixels.
        last: Point,
    },
    /// Drawing a new selection from `anchor`.
    SelectingNew {
        /// Column of the press.
        anchor: Column,
    },
    /// Reshaping the existing selection.
    Adjusting(Adjustment),
}

/// How a selection drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Commit {
    /// The selection covered a single column and was dropped.
    Cleared,
    /// A new selection was drawn; autocorrection applies.
    Created,
    /// An existing selection was reshaped.
    Adjusted,
    /// The drag was cut short; the selection stays as drawn.
    Interrupted,
}

/// Something a transition did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragEffect {
    /// A pan drag began and took pointer capture.
    PanStarted,
    /// The view center moved.
    Panned,
    /// A pan drag ended.
    PanEnded,
    /// A new selection was seeded at the pointer; occupancy tracking restarts.
    SelectionStarted,
    /// An edge or corner grab began and the selection snapped to the pointer.
    AdjustmentStarted,
    /// The selection was reshaped by pointer motion.
    SelectionMoved,
    /// A selection drag ended.
    Committed(Commit),
    /// The middle button asks to pick the lower depth under the pointer.
    PickDepth,
}

/// Pointer drag state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragMachine {
    state: DragState,
    captured: bool,
}

impl DragMachine {
    /// An idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current drag.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the pointer is captured by a drag.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether a selection is being drawn or reshaped.
    pub fn is_selecting(&self) -> bool {
        matches!(
            self.state,
            DragState::SelectingNew { .. } | DragState::Adjusting(_)
        )
    }

    /// Whether a new selection is being drawn.
    pub fn is_selecting_new(&self) -> bool {
        matches!(self.state, DragState::SelectingNew { .. })
    }

    /// Handle a button press at `screen`.
    pub fn press(
        &mut self,
        button: PointerButton,
        screen: Point,
        view: &View,
        selection: &mut Selection,
    ) -> Vec<DragEffect> {
        match button {
            PointerButton::Primary => {
                let mut effects = self.interrupt(selection);
                self.enter(DragState::Panning { last: screen });
                effects.push(DragEffect::PanStarted);
                effects
            }
            PointerButton::Middle => {
                let mut effects = self.interrupt(selection);
                effects.push(DragEffect::PickDepth);
                effects
            }
            PointerButton::Secondary => {
                let mut effects = Vec::new();
                let restarting = self.is_selecting();
                if matches!(self.state, DragState::Panning { .. }) {
                    effects.push(DragEffect::PanEnded);
                }
                let pointer = transform::screen_to_column(screen, view);
                let grab = if restarting {
                    Grab::Miss
                } else {
                    let margin = view.config().select_margin / view.scale();
                    grab::classify(pointer, selection, margin)
                };
                let (lower, upper) = (view.lower_depth(), view.upper_depth());
                if let Grab::Adjust(adj) = grab {
                    *selection = Selection::from_corners(adj.anchor(), adj.live(), lower, upper);
                    self.enter(DragState::Adjusting(adj));
                    effects.push(DragEffect::AdjustmentStarted);
                } else {
                    *selection = Selection::from_corners(pointer, pointer, lower, upper);
                    self.enter(DragState::SelectingNew { anchor: pointer });
                    effects.push(DragEffect::SelectionStarted);
                }
                log::trace!("secondary press at {pointer:?}: {grab:?}");
                effects
            }
        }
    }

    /// Handle pointer motion to `screen`.
    pub fn motion(
        &mut self,
        screen: Point,
        view: &mut View,
        selection: &mut Selection,
    ) -> Vec<DragEffect> {
        let (lower, upper) = (view.lower_depth(), view.upper_depth());
        match &mut self.state {
            DragState::Idle => Vec::new(),
            DragState::Panning { last } => {
                view.pan_by_pixels(screen - *last);
                *last = screen;
                vec![DragEffect::Panned]
            }
            DragState::SelectingNew { anchor } => {
                let live = transform::screen_to_column(screen, view);
                *selection = Selection::from_corners(*anchor, live, lower, upper);
                vec![DragEffect::SelectionMoved]
            }
            DragState::Adjusting(adj) => {
                let live = adj.follow(transform::screen_to_column(screen, view));
                *selection = Selection::from_corners(adj.anchor(), live, lower, upper);
                vec![DragEffect::SelectionMoved]
            }
        }
    }

    /// Handle a button release.
    ///
    /// Either the primary or the secondary button ends a pan.
    pub fn release(&mut self, button: PointerButton, selection: &mut Selection) -> Vec<DragEffect> {
        match (button, self.state) {
            (PointerButton::Primary | PointerButton::Secondary, DragState::Panning { .. }) => {
                self.enter(DragState::Idle);
                vec![DragEffect::PanEnded]
            }
            (PointerButton::Secondary, DragState::SelectingNew { .. }) => {
                vec![DragEffect::Committed(self.commit(selection, Commit::Created))]
            }
            (PointerButton::Secondary, DragState::Adjusting(_)) => {
                vec![DragEffect::Committed(self.commit(selection, Commit::Adjusted))]
            }
            _ => Vec::new(),
        }
    }

    /// The host took the pointer away (for example on focus loss).
    pub fn capture_lost(&mut self, selection: &mut Selection) -> Vec<DragEffect> {
        self.interrupt(selection)
    }

    /// Drop any drag without touching the selection.
    pub fn reset(&mut self) {
        self.enter(DragState::Idle);
    }

    /// End whatever is in flight, keeping a drawn selection unless it is degenerate.
    fn interrupt(&mut self, selection: &mut Selection) -> Vec<DragEffect> {
        match self.state {
            DragState::Idle => Vec::new(),
            DragState::Panning { .. } => {
                self.enter(DragState::Idle);
                vec![DragEffect::PanEnded]
            }
            DragState::SelectingNew { .. } | DragState::Adjusting(_) => {
                vec![DragEffect::Committed(
                    self.commit(selection, Commit::Interrupted),
                )]
            }
        }
    }

    fn commit(&mut self, selection: &mut Selection, outcome: Commit) -> Commit {
        self.enter(DragState::Idle);
        let outcome = if selection.is_degenerate() {
            selection.clear();
            Commit::Cleared
        } else {
            outcome
        };
        log::debug!("selection drag ended: {outcome:?}, box {:?}", selection.export_box());
        outcome
    }

    fn enter(&mut self, state: DragState) {
        if core::mem::discriminant(&self.state) != core::mem::discriminant(&state) {
            log::trace!("drag {:?} -> {:?}", self.state, state);
        }
        self.captured = !matches!(state, DragState::Idle);
        self.state = state;
    }
}
