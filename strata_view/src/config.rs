// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable limits and steps for the map view.
//!
//! All constants used by pan, zoom, and depth handling live in [`ViewConfig`]. The
//! [`Default`] implementation matches the classic map viewer behavior; hosts can
//! override individual fields (or, with the `serde` feature, load the whole struct from
//! a settings file) and then call [`ViewConfig::validate`].

use core::fmt;

/// Fully zoomed out.
pub const MIN_ZOOM: f64 = 1.0;

/// Fully zoomed in. High enough to be useful when switching between the Nether and the
/// overworld.
pub const MAX_ZOOM: f64 = 40.0;

/// Highest block layer of the world.
pub const MAX_HEIGHT: i32 = 255;

/// Sea level; the default lower depth for a fresh overworld view.
pub const SEA_LEVEL: i32 = 62;

/// Distance in pixels outside a selection at which its corners and edges can still be grabbed.
pub const SELECT_MARGIN: f64 = 5.0;

/// Wheel delta reported for one notch.
pub const WHEEL_UNIT: f64 = 120.0;

/// Upper depths bound to the digit keys `0` through `9`.
///
/// `51` reaches the bottom dirt layer of deep lakes.
pub const DEPTH_PRESETS: [i32; 10] = [0, 10, 20, 30, 40, 51, SEA_LEVEL, 85, 106, MAX_HEIGHT];

/// Configuration for a [`View`](crate::View) and the input rules that drive it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewConfig {
    /// Smallest allowed scale (pixels per block).
    pub min_zoom: f64,
    /// Largest allowed scale (pixels per block).
    pub max_zoom: f64,
    /// Highest block layer; depths are clamped to `0..=max_height`.
    pub max_height: i32,
    /// Lower depth used when a new world is loaded.
    pub default_lower_depth: i32,
    /// Grab tolerance around a selection, in screen pixels.
    pub select_margin: f64,
    /// Wheel delta that counts as one notch.
    pub wheel_unit: f64,
    /// Scale change per zoom key press.
    pub key_zoom_step: f64,
    /// Screen distance panned per arrow key press.
    pub key_pan_pixels: f64,
    /// Upper depths for the digit keys `0` through `9`.
    pub depth_presets: [i32; 10],
    /// Horizontal coordinate ratio between the overworld and the Nether.
    pub nether_scale: f64,
    /// Upper depth used in the Nether in place of `max_height`.
    pub nether_depth: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            max_height: MAX_HEIGHT,
            default_lower_depth: SEA_LEVEL,
            select_margin: SELECT_MARGIN,
            wheel_unit: WHEEL_UNIT,
            key_zoom_step: 0.5,
            key_pan_pixels: 10.0,
            depth_presets: DEPTH_PRESETS,
            nether_scale: 8.0,
            nether_depth: 126,
        }
    }
}

impl ViewConfig {
    /// Check that limits are ordered and every depth fits inside `0..=max_height`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom)
        {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.max_height < 0 {
            return Err(ConfigError::NegativeHeight(self.max_height));
        }
        self.check_depth("default_lower_depth", self.default_lower_depth)?;
        self.check_depth("nether_depth", self.nether_depth)?;
        for depth in self.depth_presets {
            self.check_depth("depth_presets", depth)?;
        }
        check_positive("wheel_unit", self.wheel_unit)?;
        check_positive("key_zoom_step", self.key_zoom_step)?;
        check_positive("key_pan_pixels", self.key_pan_pixels)?;
        check_positive("nether_scale", self.nether_scale)?;
        if !(self.select_margin.is_finite() && self.select_margin >= 0.0) {
            return Err(ConfigError::NotPositive {
                field: "select_margin",
                value: self.select_margin,
            });
        }
        Ok(())
    }

    /// The clamping limits a [`View`](crate::View) carries with it.
    pub fn limits(&self) -> Limits {
        Limits {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            max_height: self.max_height,
        }
    }

    fn check_depth(&self, field: &'static str, depth: i32) -> Result<(), ConfigError> {
        if (0..=self.max_height).contains(&depth) {
            Ok(())
        } else {
            Err(ConfigError::DepthOutOfRange {
                field,
                depth,
                max_height: self.max_height,
            })
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Zoom and height limits enforced by every [`View`](crate::View) mutation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Limits {
    /// Smallest allowed scale.
    pub min_zoom: f64,
    /// Largest allowed scale.
    pub max_zoom: f64,
    /// Highest block layer.
    pub max_height: i32,
}

impl Limits {
    /// Clamp a scale into `min_zoom..=max_zoom`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }

    /// Clamp a depth into `0..=max_height`.
    pub fn clamp_depth(&self, depth: i32) -> i32 {
        depth.clamp(0, self.max_height)
    }

    /// Height marker meaning "no solid block found", one above the top layer.
    pub fn no_height(&self) -> i32 {
        self.max_height + 1
    }
}

impl Default for Limits {
    fn default() -> Self {
        ViewConfig::default().limits()
    }
}

/// Reasons a [`ViewConfig`] is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Zoom limits are not finite, not positive, or out of order.
    ZoomRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The top layer is below zero.
    NegativeHeight(i32),
    /// A configured depth lies outside `0..=max_height`.
    DepthOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected depth.
        depth: i32,
        /// The configured top layer.
        max_height: i32,
    },
    /// A step or ratio that must be positive is not.
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoomRange { min, max } => {
                write!(f, "invalid zoom range {min}..={max}")
            }
            Self::NegativeHeight(height) => write!(f, "max_height {height} is negative"),
            Self::DepthOutOfRange {
                field,
                depth,
                max_height,
            } => write!(f, "{field} depth {depth} is outside 0..={max_height}"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
