// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host application: the map renderer, the dialog layer and the pixel frame.

use kurbo::Size;
use strata_view::{RenderOptions, View, WorldKind};

use crate::autocorrect::{Choice, DepthNotice};
use crate::{OccupancySample, Selection};

/// An RGBA8 pixel buffer for the map area.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Bytes per pixel.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// A frame of `width` by `height` pixels, zero-filled.
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = Self::default();
        frame.resize(width, height);
        frame
    }

    /// A frame covering a viewport, rounding fractional sizes up.
    pub fn for_viewport(viewport: Size) -> Self {
        let (width, height) = pixel_dims(viewport);
        Self::new(width, height)
    }

    /// Change the dimensions; contents are zeroed.
    ///
    /// Dimensions whose byte length does not fit in `usize` leave an empty frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(Self::BYTES_PER_PIXEL));
        let Some(len) = len else {
            log::warn!("frame of {width}x{height} pixels is not addressable");
            self.width = 0;
            self.height = 0;
            self.pixels.clear();
            return;
        };
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Row-major RGBA bytes, writable.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Set every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    /// The four bytes of pixel `(x, y)`, if inside the frame.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        self.pixels.get_mut(start..start + Self::BYTES_PER_PIXEL)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "viewport sizes are clamped to non-negative and saturate at u32::MAX"
)]
pub(crate) fn pixel_dims(viewport: Size) -> (u32, u32) {
    (
        viewport.width.max(0.0).ceil() as u32,
        viewport.height.max(0.0).ceil() as u32,
    )
}

/// Everything a renderer needs to draw one frame.
#[derive(Copy, Clone, Debug)]
pub struct RenderRequest<'a> {
    /// Center, scale, viewport and depth bounds.
    pub view: &'a View,
    /// Selection to highlight and to measure occupancy against.
    pub selection: &'a Selection,
    /// Display toggles in effect.
    pub options: RenderOptions,
    /// Dimension being drawn.
    pub world: WorldKind,
}

/// Draws the map.
///
/// Each call redraws the whole frame from scratch. While a selection is active the
/// renderer also records each visible solid block top inside its footprint into the
/// returned [`OccupancySample`] (see [`OccupancySample::record`]).
pub trait MapRenderer {
    /// Draw `request` into `frame`, reporting progress in `0.0..=1.0`.
    fn render(
        &mut self,
        request: &RenderRequest<'_>,
        frame: &mut Frame,
        progress: &mut dyn FnMut(f32),
    ) -> OccupancySample;
}

/// The user-facing dialog layer.
///
/// Calls are synchronous: [`Ui::ask`] blocks until the user answers.
pub trait Ui {
    /// Rendering progress in `0.0..=1.0`; reset to `0.0` after each redraw.
    fn progress(&mut self, fraction: f32) {
        let _ = fraction;
    }

    /// Show a notice that needs no answer.
    fn inform(&mut self, notice: &DepthNotice);

    /// Show a notice and wait for the user's choice.
    fn ask(&mut self, notice: &DepthNotice) -> Choice;
}

impl<U: Ui + ?Sized> Ui for &mut U {
    fn progress(&mut self, fraction: f32) {
        (**self).progress(fraction);
    }

    fn inform(&mut self, notice: &DepthNotice) {
        (**self).inform(notice);
    }

    fn ask(&mut self, notice: &DepthNotice) -> Choice {
        (**self).ask(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_sizes_follow_viewport() {
        let f = Frame::for_viewport(Size::new(10.5, 4.0));
        assert_eq!((f.width(), f.height()), (11, 4));
        assert_eq!(f.pixels().len(), 11 * 4 * 4);
        let empty = Frame::for_viewport(Size::new(-3.0, 2.0));
        assert_eq!(empty.pixels().len(), 0);
    }

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut f = Frame::new(3, 2);
        f.pixel_mut(2, 1).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(&f.pixels()[20..24], &[1, 2, 3, 4]);
        assert!(f.pixel_mut(3, 0).is_none());
        assert!(f.pixel_mut(0, 2).is_none());
    }

    #[test]
    fn unaddressable_sizes_leave_an_empty_frame() {
        let mut f = Frame::new(2, 2);
        f.resize(u32::MAX, u32::MAX);
        assert_eq!((f.width(), f.height()), (0, 0));
        assert!(f.pixels().is_empty());
        assert!(f.pixel_mut(0, 0).is_none());
    }

    #[test]
    fn fill_and_resize() {
        let mut f = Frame::new(2, 2);
        f.fill(0xff);
        assert!(f.pixels().iter().all(|&b| b == 0xff));
        f.resize(1, 1);
        assert_eq!(f.pixels(), &[0, 0, 0, 0]);
    }
}
