// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render options and the world being viewed.
//!
//! Display toggles are a [`RenderOptions`] bit set. The dimension being shown is a
//! separate [`WorldKind`], and [`MapMode`] couples the two so that switching worlds can
//! apply the forced options and view rescaling each dimension needs.

use crate::View;

bitflags::bitflags! {
    /// Display toggles passed to the renderer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RenderOptions: u8 {
        /// Draw every object, including ones normally filtered out.
        const SHOW_ALL = 1 << 0;
        /// Shade the map with block light.
        const LIGHTING = 1 << 1;
        /// Highlight open cave space instead of surface blocks.
        const CAVE_MODE = 1 << 2;
        /// Skip blocks that are covered from above.
        const HIDE_OBSCURED = 1 << 3;
        /// Darken blocks by their distance below the upper depth.
        const DEPTH_SHADING = 1 << 4;
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::empty()
    }
}

impl RenderOptions {
    /// Options actually handed to the renderer for `kind`.
    ///
    /// The Nether is always drawn with obscured blocks hidden, since its ceiling would
    /// otherwise cover everything.
    pub fn for_world(self, kind: WorldKind) -> Self {
        match kind {
            WorldKind::Nether => self | Self::HIDE_OBSCURED,
            WorldKind::Overworld | WorldKind::End => self,
        }
    }
}

/// The dimension of the world being viewed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldKind {
    /// The surface world.
    #[default]
    Overworld,
    /// The Nether, with horizontal coordinates compressed by the Nether scale.
    Nether,
    /// The End.
    End,
}

impl WorldKind {
    /// Whether coordinates in this world are compressed relative to the overworld.
    pub fn is_scaled(self) -> bool {
        matches!(self, Self::Nether)
    }
}

/// Current world kind plus the user's render options.
///
/// Entering the Nether forces [`RenderOptions::HIDE_OBSCURED`] on and remembers the
/// user's choice so it can be restored on the way out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MapMode {
    kind: WorldKind,
    options: RenderOptions,
    saved_hide_obscured: bool,
}

impl MapMode {
    /// Start in `kind` with the given options.
    pub fn new(kind: WorldKind, options: RenderOptions) -> Self {
        Self {
            kind,
            options: options.for_world(kind),
            saved_hide_obscured: options.contains(RenderOptions::HIDE_OBSCURED),
        }
    }

    /// The world being viewed.
    pub fn kind(&self) -> WorldKind {
        self.kind
    }

    /// The options in effect.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Flip the given options.
    pub fn toggle(&mut self, options: RenderOptions) {
        self.options.toggle(options);
        log::debug!("render options now {:?}", self.options);
    }

    /// Switch to `kind`, rescaling `view` as needed.
    ///
    /// - Entering the Nether divides the view center by the Nether scale, lowers an upper
    ///   depth sitting at the top layer to the Nether depth, and forces obscured blocks hidden.
    /// - Leaving the Nether multiplies the center back, raises an upper depth sitting at the
    ///   Nether depth to the top layer, and restores the saved obscured setting.
    /// - Moving between the overworld and the End keeps the view.
    ///
    /// Returns `false` when already in `kind`.
    pub fn switch_world(&mut self, kind: WorldKind, view: &mut View) -> bool {
        if kind == self.kind {
            return false;
        }
        let config = view.config().clone();
        let from = self.kind;
        if from == WorldKind::Nether {
            view.center = (view.center.to_vec2() * config.nether_scale).to_point();
            if view.upper_depth() == config.nether_depth {
                view.set_upper_depth(config.max_height);
            }
            self.options
                .set(RenderOptions::HIDE_OBSCURED, self.saved_hide_obscured);
        }
        if kind == WorldKind::Nether {
            view.center = (view.center.to_vec2() / config.nether_scale).to_point();
            if view.upper_depth() == config.max_height {
                view.set_upper_depth(config.nether_depth);
            }
            self.saved_hide_obscured = self.options.contains(RenderOptions::HIDE_OBSCURED);
            self.options.insert(RenderOptions::HIDE_OBSCURED);
        }
        self.kind = kind;
        log::debug!(
            "switched world {from:?} -> {kind:?}, center {:?}, upper depth {}",
            view.center,
            view.upper_depth()
        );
        true
    }
}
