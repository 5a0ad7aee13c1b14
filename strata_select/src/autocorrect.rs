// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth autocorrection: fixing a lower depth that clips what the user can see.
//!
//! When a new selection is committed, the occupancy sample from the last redraw tells
//! whether the chosen vertical range cuts through visible material:
//!
//! 1. Everything seen lies beneath the lower depth. The lower depth drops to the lowest
//!    block seen and the user is told so. If the lowest block is not actually beneath the
//!    lower depth the sample is inconsistent and nothing happens.
//! 2. Otherwise, when enabled, the user is asked to move the lower depth to the lowest
//!    block seen if some material lies beneath the selection, or if nothing lies beneath
//!    and the lowest block inside sits above the lower depth.
//! 3. Anything else leaves the depth alone.
//!
//! The first notice shown in a session explains three-dimensional selection; later
//! notices are brief.
//!
//! ```
//! use strata_select::autocorrect::{Autocorrector, Choice, DepthNotice};
//! use strata_select::{OccupancySample, Ui};
//!
//! struct Answer(Choice);
//! impl Ui for Answer {
//!     fn inform(&mut self, _: &DepthNotice) {}
//!     fn ask(&mut self, _: &DepthNotice) -> Choice { self.0 }
//! }
//!
//! let mut sample = OccupancySample::empty(255);
//! sample.record(30, (50, 80));
//!
//! let mut fixer = Autocorrector::new();
//! assert_eq!(fixer.run(&sample, 50, &mut Answer(Choice::Decline)), Some(30));
//! ```

use core::fmt;

use crate::{OccupancySample, Ui};

/// Answer to a depth autocorrection prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Move the lower depth as proposed.
    Accept,
    /// Keep the current lower depth.
    Decline,
    /// Keep the current lower depth and stop asking for the rest of the session.
    DisableFuture,
}

/// Which situation a notice describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Every visible block lies beneath the lower depth.
    AllBelow,
    /// Some visible blocks lie beneath the lower depth.
    SomeBelow,
    /// Nothing lies beneath, and the layers between the lower depth and the lowest
    /// visible block are hidden.
    HiddenLayers,
}

/// Message shown to the user about the lower depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepthNotice {
    /// The situation.
    pub kind: NoticeKind,
    /// Lower depth at the time of the commit.
    pub lower_depth: i32,
    /// Lower depth being applied or offered.
    pub proposed: i32,
    /// Include the explanation of three-dimensional selection.
    pub explain: bool,
}

impl DepthNotice {
    /// Dialog title.
    pub fn title(&self) -> &'static str {
        "Informational"
    }

    /// Whether this notice expects a [`Choice`].
    pub fn is_question(&self) -> bool {
        self.kind != NoticeKind::AllBelow
    }
}

impl fmt::Display for DepthNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lower, proposed) = (self.lower_depth, self.proposed);
        match self.kind {
            NoticeKind::AllBelow => {
                write!(
                    f,
                    "All blocks in your selection are below the current lower depth of {lower}.\n\n"
                )?;
                if self.explain {
                    f.write_str(
                        "When you select, you're selecting in three dimensions, and there\n\
                         is a lower depth, displayed in the status bar at the bottom.\n\
                         You can adjust this depth by using the lower slider or '[' & ']' keys.\n\n",
                    )?;
                }
                write!(
                    f,
                    "The depth will be reset to {proposed} to include all visible blocks."
                )
            }
            NoticeKind::SomeBelow | NoticeKind::HiddenLayers => {
                if self.kind == NoticeKind::SomeBelow {
                    write!(
                        f,
                        "Some blocks in your selection are visible below the current lower depth of {lower}.\n\n"
                    )?;
                } else {
                    write!(
                        f,
                        "The current selection lower depth of {lower} contains hidden lower layers.\n\n"
                    )?;
                }
                if self.explain {
                    f.write_str(
                        "When you select, you're selecting in three dimensions, and there\n\
                         is a lower depth, shown on the second slider at the top.\n\
                         You can adjust this depth by using this slider or '[' & ']' keys.\n\n",
                    )?;
                }
                let goal = if self.kind == NoticeKind::SomeBelow {
                    "select all visible blocks"
                } else {
                    "minimize the underground"
                };
                write!(
                    f,
                    "Do you want to set the depth to {proposed} to {goal}?\n\
                     Select 'Cancel' to turn off this autocorrection system."
                )
            }
        }
    }
}

/// Outcome of inspecting an occupancy sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The lower depth is fine.
    Unchanged,
    /// Everything seen is beneath the selection, yet the lowest block is not beneath the
    /// lower depth; the sample does not describe this range.
    Inconsistent,
    /// Move the lower depth without asking.
    Inform(NoticeKind, i32),
    /// Offer to move the lower depth.
    Ask(NoticeKind, i32),
}

/// Inspect a sample against `lower_depth`. `enabled` gates the prompting rule only.
pub fn evaluate(sample: &OccupancySample, lower_depth: i32, enabled: bool) -> Verdict {
    let below = sample.has_below();
    let inside = sample.has_inside();
    let min = sample.min_solid_y;
    if below && !inside {
        return if min < lower_depth {
            Verdict::Inform(NoticeKind::AllBelow, min)
        } else {
            Verdict::Inconsistent
        };
    }
    if enabled {
        if below && inside && min < lower_depth {
            return Verdict::Ask(NoticeKind::SomeBelow, min);
        }
        if !below && inside && min > lower_depth {
            return Verdict::Ask(NoticeKind::HiddenLayers, min);
        }
    }
    Verdict::Unchanged
}

/// Session-scoped autocorrection state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Autocorrector {
    enabled: bool,
    explained: bool,
}

impl Default for Autocorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl Autocorrector {
    /// Enabled, with the explanation still to be shown.
    pub fn new() -> Self {
        Self {
            enabled: true,
            explained: false,
        }
    }

    /// Whether prompting is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn prompting on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Inspect a sample with the current enablement.
    pub fn evaluate(&self, sample: &OccupancySample, lower_depth: i32) -> Verdict {
        evaluate(sample, lower_depth, self.enabled)
    }

    /// Build the notice for a verdict, consuming the one-time explanation.
    fn notice(&mut self, kind: NoticeKind, lower_depth: i32, proposed: i32) -> DepthNotice {
        let explain = !self.explained;
        self.explained = true;
        DepthNotice {
            kind,
            lower_depth,
            proposed,
            explain,
        }
    }

    /// Inspect `sample`, talk to the user through `ui`, and return the lower depth to
    /// apply, if any.
    pub fn run<U: Ui + ?Sized>(
        &mut self,
        sample: &OccupancySample,
        lower_depth: i32,
        ui: &mut U,
    ) -> Option<i32> {
        let verdict = self.evaluate(sample, lower_depth);
        log::debug!("autocorrect verdict {verdict:?} for {sample:?}, lower depth {lower_depth}");
        match verdict {
            Verdict::Unchanged | Verdict::Inconsistent => None,
            Verdict::Inform(kind, proposed) => {
                let notice = self.notice(kind, lower_depth, proposed);
                ui.inform(&notice);
                Some(proposed)
            }
            Verdict::Ask(kind, proposed) => {
                let notice = self.notice(kind, lower_depth, proposed);
                match ui.ask(&notice) {
                    Choice::Accept => Some(proposed),
                    Choice::Decline => None,
                    Choice::DisableFuture => {
                        log::debug!("depth autocorrection disabled");
                        self.enabled = false;
                        None
                    }
                }
            }
        }
    }
}
