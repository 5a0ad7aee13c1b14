// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan, zoom and depth state of the map view.

use kurbo::{Point, Size, Vec2};

use crate::ViewConfig;

/// What the map area currently shows.
///
/// `center` is the world point drawn at the middle of the viewport (world `z` travels in
/// [`Point::y`]). `scale` is in pixels per block and always lies inside the configured zoom
/// limits. The upper depth is the slice rendered on the map; the lower depth is the floor of
/// an eventual export box. Both stay inside `0..=max_height` but are independent of each
/// other and may cross.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    /// World point at the middle of the map area.
    pub center: Point,
    /// Size of the map area in pixels.
    pub viewport: Size,
    scale: f64,
    upper_depth: i32,
    lower_depth: i32,
    config: ViewConfig,
}

impl View {
    /// A view of the origin, fully zoomed out, rendering from the top layer with the
    /// configured default lower depth.
    pub fn new(config: &ViewConfig, viewport: Size) -> Self {
        let limits = config.limits();
        Self {
            center: Point::ORIGIN,
            viewport,
            scale: config.min_zoom,
            upper_depth: config.max_height,
            lower_depth: limits.clamp_depth(config.default_lower_depth),
            config: config.clone(),
        }
    }

    /// The configuration this view clamps against.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Pixels per block.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Depth rendered on the map.
    pub fn upper_depth(&self) -> i32 {
        self.upper_depth
    }

    /// Floor of the export box.
    pub fn lower_depth(&self) -> i32 {
        self.lower_depth
    }

    /// `(min, max)` of the two depths.
    pub fn depth_bounds(&self) -> (i32, i32) {
        if self.lower_depth <= self.upper_depth {
            (self.lower_depth, self.upper_depth)
        } else {
            (self.upper_depth, self.lower_depth)
        }
    }

    /// Set the scale, clamped to the zoom limits.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.config.limits().clamp_scale(scale);
    }

    /// Apply a mouse wheel rotation.
    ///
    /// Zoom speeds up as the view is magnified: each notch adds `scale^0.2`.
    pub fn zoom_by_wheel(&mut self, wheel_delta: f64) {
        let notches = wheel_delta / self.config.wheel_unit;
        let step = self.scale.powf(1.2) / self.scale;
        self.set_scale(self.scale + notches * step);
    }

    /// Zoom in by one key step.
    pub fn zoom_in_step(&mut self) {
        self.set_scale(self.scale + self.config.key_zoom_step);
    }

    /// Zoom out by one key step.
    pub fn zoom_out_step(&mut self) {
        self.set_scale(self.scale - self.config.key_zoom_step);
    }

    /// Jump to the closest zoom.
    pub fn zoom_to_max(&mut self) {
        self.scale = self.config.max_zoom;
    }

    /// Jump to the farthest zoom.
    pub fn zoom_to_min(&mut self) {
        self.scale = self.config.min_zoom;
    }

    /// Drag the map by a screen-space delta; the content follows the pointer.
    pub fn pan_by_pixels(&mut self, delta: Vec2) {
        self.center -= delta / self.scale;
    }

    /// Move the view one key step in `direction`, given in unit screen steps
    /// (for example `(-1, 0)` pans west).
    pub fn pan_by_keys(&mut self, direction: Vec2) {
        self.center += direction * (self.config.key_pan_pixels / self.scale);
    }

    /// Recenter on a world point.
    pub fn center_on(&mut self, world: Point) {
        self.center = world;
    }

    /// Set the rendered depth, clamped to `0..=max_height`.
    pub fn set_upper_depth(&mut self, depth: i32) {
        self.upper_depth = self.config.limits().clamp_depth(depth);
    }

    /// Set the export floor, clamped to `0..=max_height`.
    pub fn set_lower_depth(&mut self, depth: i32) {
        self.lower_depth = self.config.limits().clamp_depth(depth);
    }

    /// Move the rendered depth by `delta` layers.
    ///
    /// Returns `false` and leaves the depth alone when the step would leave
    /// `0..=max_height`.
    pub fn step_upper_depth(&mut self, delta: i32) -> bool {
        let next = self.upper_depth.saturating_add(delta);
        if (0..=self.config.max_height).contains(&next) {
            self.upper_depth = next;
            true
        } else {
            false
        }
    }

    /// Move the export floor by `delta` layers, clamping at the limits.
    pub fn step_lower_depth(&mut self, delta: i32) {
        self.set_lower_depth(self.lower_depth.saturating_add(delta));
    }

    /// Put the export floor at the rendered depth.
    pub fn snap_lower_to_upper(&mut self) {
        self.lower_depth = self.upper_depth;
    }

    /// Set the rendered depth to the preset bound to `digit`.
    ///
    /// Returns `false` for digits above 9.
    pub fn apply_depth_preset(&mut self, digit: u8) -> bool {
        match self.config.depth_presets.get(usize::from(digit)) {
            Some(&depth) => {
                self.set_upper_depth(depth);
                true
            }
            None => false,
        }
    }
}
