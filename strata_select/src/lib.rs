// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Select: interactive region selection over a depth-sliced voxel map.
//!
//! ## Overview
//!
//! Building on the view state in `strata_view`, this crate turns pointer and keyboard
//! input into a rectangular 3D [`Selection`] ready for export:
//!
//! - [`Selection`] and [`ExportBox`]: the normalized selection and the bounds handed to
//!   an exporter.
//! - [`grab`]: classifying a press against an existing selection as an edge or corner
//!   grab, an interior press, or a miss.
//! - [`drag`]: the drag state machine for panning, drawing and reshaping.
//! - [`OccupancySample`] and [`autocorrect`]: what the renderer saw inside and beneath a
//!   selection, and the rules that propose a better lower depth afterwards.
//! - [`keys`]: keyboard bindings.
//! - [`host`]: the [`MapRenderer`] and [`Ui`] seams and the [`Frame`] buffer.
//! - [`Session`]: one owner for all of the above, driven by [`InputEvent`]s.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size};
//! use strata_select::{
//!     Frame, Handled, InputEvent, MapRenderer, OccupancySample, RenderRequest, Session, Ui,
//!     WorldInfo,
//! };
//! use strata_select::autocorrect::{Choice, DepthNotice};
//! use strata_select::drag::PointerButton;
//! use strata_view::{Column, ColumnSample, ColumnSampler, ViewConfig};
//!
//! /// Flat ground at layer 64.
//! struct Flat;
//!
//! impl ColumnSampler for Flat {
//!     fn sample(&self, _: Column, depth: i32) -> ColumnSample {
//!         ColumnSample { height: depth.min(64), block: 1, label: "Grass".into(), flat_top: false }
//!     }
//! }
//!
//! impl MapRenderer for Flat {
//!     fn render(
//!         &mut self,
//!         request: &RenderRequest<'_>,
//!         frame: &mut Frame,
//!         _progress: &mut dyn FnMut(f32),
//!     ) -> OccupancySample {
//!         frame.fill(0x40);
//!         let view = request.view;
//!         let mut sample = OccupancySample::empty(view.config().max_height);
//!         if request.selection.is_active() {
//!             sample.record(64.min(view.upper_depth()), view.depth_bounds());
//!         }
//!         sample
//!     }
//! }
//!
//! struct Quiet;
//!
//! impl Ui for Quiet {
//!     fn inform(&mut self, _: &DepthNotice) {}
//!     fn ask(&mut self, _: &DepthNotice) -> Choice {
//!         Choice::Decline
//!     }
//! }
//!
//! let mut session =
//!     Session::new(&ViewConfig::default(), Size::new(200.0, 200.0), Flat, Flat, Quiet).unwrap();
//! session.load_world(WorldInfo::default(), false);
//! session.set_lower_depth(64);
//!
//! // At scale 1 the middle of the map shows the origin.
//! for event in [
//!     InputEvent::PointerDown { button: PointerButton::Secondary, position: Point::new(110.0, 110.0) },
//!     InputEvent::PointerMove { position: Point::new(120.0, 130.0) },
//!     InputEvent::PointerUp { button: PointerButton::Secondary, position: Point::new(120.0, 130.0) },
//! ] {
//!     assert_ne!(session.handle(event), Handled::Ignored);
//! }
//!
//! let bounds = session.export_box().unwrap();
//! assert_eq!((bounds.min_x, bounds.max_x), (10, 20));
//! assert_eq!((bounds.min_z, bounds.max_z), (10, 30));
//! assert_eq!((bounds.min_y, bounds.max_y), (64, 255));
//! ```

pub mod autocorrect;
pub mod drag;
pub mod grab;
pub mod host;
pub mod keys;
pub mod occupancy;
pub mod selection;
pub mod session;

pub use autocorrect::{Autocorrector, Choice, DepthNotice, NoticeKind, Verdict};
pub use drag::{Commit, DragEffect, DragMachine, DragState, PointerButton};
pub use grab::{Adjustment, Grab};
pub use host::{Frame, MapRenderer, RenderRequest, Ui};
pub use keys::{Command, Key, Modifiers, PanKeys};
pub use occupancy::OccupancySample;
pub use selection::{ExportBox, Selection};
pub use session::{Actions, Handled, InputEvent, Session, StatusLine, WorldInfo};
