// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata View: pan, zoom and depth state for a depth-sliced voxel map.
//!
//! ## Overview
//!
//! A voxel world is shown as a top-down map: each pixel shows the top solid block of a
//! column at or below the *upper depth*. A second, independent *lower depth* marks the
//! floor of the region a user will eventually export. This crate owns the state that
//! decides what the map shows and how screen pixels relate to world columns:
//!
//! - [`View`]: center, scale, viewport and the two depth bounds, with clamped mutators for
//!   wheel and key zoom, pointer and key panning, and depth stepping and presets.
//! - [`transform`]: screen↔world conversion, the visible world rectangle, slider helpers and
//!   [`transform::locate`] for probing the column under the pointer through a
//!   [`ColumnSampler`].
//! - [`RenderOptions`], [`WorldKind`] and [`MapMode`]: display toggles and the dimension
//!   being viewed, including the rescaling applied when entering or leaving the Nether.
//! - [`ViewConfig`]: every tunable limit and step, validated by [`ViewConfig::validate`].
//!
//! Selections, drags and depth autocorrection live in `strata_select`, which builds on
//! these types.
//!
//! ## Coordinates
//!
//! World `x` grows with screen `x` and world `z` grows with screen `y`. Continuous world
//! positions use [`kurbo::Point`] with world `z` in the `y` field; integer block columns are
//! [`Column`]s. The scale is in pixels per block, so panning by a pixel delta moves the
//! center by `delta / scale`.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use strata_view::{Column, View, ViewConfig, transform};
//!
//! let config = ViewConfig::default();
//! config.validate().unwrap();
//! let mut view = View::new(&config, Size::new(640.0, 480.0));
//!
//! // One wheel notch from fully zoomed out doubles the scale.
//! view.zoom_by_wheel(120.0);
//! assert_eq!(view.scale(), 2.0);
//!
//! // Dragging the map 20 pixels right moves the view 10 blocks west.
//! view.pan_by_pixels(Vec2::new(20.0, 0.0));
//! assert_eq!(view.center, Point::new(-10.0, 0.0));
//!
//! // The pixel in the middle of the map shows the column at the center.
//! let middle = transform::screen_to_column(Point::new(320.0, 240.0), &view);
//! assert_eq!(middle, Column::new(-10, 0));
//!
//! // Depths stay in range and may cross.
//! view.set_upper_depth(40);
//! view.set_lower_depth(300);
//! assert_eq!(view.depth_bounds(), (40, 255));
//! ```

pub mod config;
pub mod options;
pub mod sample;
pub mod transform;
pub mod types;
pub mod view;

pub use config::{ConfigError, Limits, ViewConfig};
pub use options::{MapMode, RenderOptions, WorldKind};
pub use sample::{ColumnSample, ColumnSampler};
pub use transform::Probe;
pub use types::Column;
pub use view::View;
