// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between map-area pixels and world coordinates.
//!
//! Screen positions are relative to the top-left of the map area. World `x` grows with
//! screen `x` and world `z` grows with screen `y`; both travel in [`kurbo::Point`], with
//! world `z` in the `y` field.
//!
//! ```
//! use kurbo::{Point, Size};
//! use strata_view::{Column, View, ViewConfig, transform};
//!
//! let mut view = View::new(&ViewConfig::default(), Size::new(200.0, 200.0));
//! view.set_scale(4.0);
//! let column = transform::screen_to_column(Point::new(140.0, 60.0), &view);
//! assert_eq!(column, Column::new(10, -10));
//! let pixel = transform::world_to_screen(column, &view);
//! assert_eq!(transform::screen_to_column(pixel, &view), column);
//! ```

use kurbo::{Point, Rect, Vec2};

use crate::{Column, ColumnSample, ColumnSampler, View};

/// Continuous world position under a screen point.
pub fn screen_to_world(screen: Point, view: &View) -> Point {
    let offset = screen - half_viewport(view);
    view.center + offset.to_vec2() / view.scale()
}

/// Integer column under a screen point.
pub fn screen_to_column(screen: Point, view: &View) -> Column {
    Column::containing(screen_to_world(screen, view))
}

/// First pixel whose top-left corner lies inside `column`.
///
/// For any scale of at least one pixel per block,
/// `screen_to_column(world_to_screen(c, view), view) == c`.
pub fn world_to_screen(column: Column, view: &View) -> Point {
    let rel = (column.origin() - view.center) * view.scale();
    let pixel = half_viewport(view) + rel;
    Point::new(pixel.x.ceil(), pixel.y.ceil())
}

/// Screen rectangle covered by a range of columns, both corners inclusive.
pub fn columns_to_screen(min: Column, max: Column, view: &View) -> Rect {
    let end = Column::new(max.x.saturating_add(1), max.z.saturating_add(1));
    Rect::from_points(world_to_screen(min, view), world_to_screen(end, view))
}

/// World rectangle covered by the whole map area.
pub fn visible_world_rect(view: &View) -> Rect {
    Rect::from_points(
        screen_to_world(Point::ORIGIN, view),
        screen_to_world(view.viewport.to_vec2().to_point(), view),
    )
}

/// Position of a depth on a slider that runs from the top layer down to zero.
pub fn slider_position(depth: i32, max_height: i32) -> i32 {
    max_height - depth
}

/// Depth for a slider position, clamped to `0..=max_height`.
pub fn depth_from_slider(position: i32, max_height: i32) -> i32 {
    (max_height - position).clamp(0, max_height)
}

/// Everything known about the column under the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Probe {
    /// Column under the pointer.
    pub column: Column,
    /// What the world reports for it at the view's upper depth.
    pub sample: ColumnSample,
}

/// Resolve a screen point to its column and sample it at the rendered depth.
pub fn locate<S: ColumnSampler + ?Sized>(screen: Point, view: &View, sampler: &S) -> Probe {
    let column = screen_to_column(screen, view);
    let sample = sampler.sample(column, view.upper_depth());
    Probe { column, sample }
}

fn half_viewport(view: &View) -> Vec2 {
    view.viewport.to_vec2() * 0.5
}
