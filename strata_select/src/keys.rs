// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard bindings for map navigation and depth control.
//!
//! | Keys | Command |
//! |---|---|
//! | arrows, `W` `A` `S` `D` | pan while held |
//! | `PageUp`/`E`, `PageDown`/`Q` | zoom in / out one step |
//! | `Home`, `End` | zoom fully in / out |
//! | `,` `<` / `.` `>` | upper depth up / down one layer |
//! | `0`–`9` | upper depth presets |
//! | `[` / `]` | lower depth up / down one layer |
//! | `B` | lower depth to the upper depth |
//!
//! Any other key stops keyboard panning.

use kurbo::Vec2;

/// A key, as far as map navigation cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// A character key. Letters match in either case.
    Char(char),
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control; key presses with it held belong to menu accelerators.
        const CONTROL = 1 << 0;
        /// Shift.
        const SHIFT = 1 << 1;
        /// Alt.
        const ALT = 1 << 2;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags::bitflags! {
    /// Pan directions currently held.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PanKeys: u8 {
        /// North (screen up).
        const UP = 1 << 0;
        /// South (screen down).
        const DOWN = 1 << 1;
        /// West (screen left).
        const LEFT = 1 << 2;
        /// East (screen right).
        const RIGHT = 1 << 3;
    }
}

impl Default for PanKeys {
    fn default() -> Self {
        Self::empty()
    }
}

impl PanKeys {
    /// The direction bound to `key`, if it is a pan key.
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Self::UP),
            Key::Down => Some(Self::DOWN),
            Key::Left => Some(Self::LEFT),
            Key::Right => Some(Self::RIGHT),
            Key::Char(c) => match c.to_ascii_uppercase() {
                'W' => Some(Self::UP),
                'S' => Some(Self::DOWN),
                'A' => Some(Self::LEFT),
                'D' => Some(Self::RIGHT),
                _ => None,
            },
            _ => None,
        }
    }

    /// Sum of the held directions in unit screen steps.
    ///
    /// Opposite keys cancel out.
    pub fn direction(self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.contains(Self::UP) {
            d.y -= 1.0;
        }
        if self.contains(Self::DOWN) {
            d.y += 1.0;
        }
        if self.contains(Self::LEFT) {
            d.x -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            d.x += 1.0;
        }
        d
    }
}

/// What a key press asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start panning in a direction.
    Pan(PanKeys),
    /// Zoom in one step.
    ZoomIn,
    /// Zoom out one step.
    ZoomOut,
    /// Zoom fully in.
    ZoomMax,
    /// Zoom fully out.
    ZoomMin,
    /// Raise the upper depth one layer.
    UpperDepthUp,
    /// Lower the upper depth one layer.
    UpperDepthDown,
    /// Set the upper depth to the preset for a digit.
    DepthPreset(u8),
    /// Raise the lower depth one layer.
    LowerDepthUp,
    /// Lower the lower depth one layer.
    LowerDepthDown,
    /// Put the lower depth at the upper depth.
    SnapLowerToUpper,
    /// Not bound; stops keyboard panning.
    Unbound,
}

/// Look up the command bound to `key`.
pub fn command_for(key: Key) -> Command {
    if let Some(dir) = PanKeys::for_key(key) {
        return Command::Pan(dir);
    }
    match key {
        Key::PageUp => Command::ZoomIn,
        Key::PageDown => Command::ZoomOut,
        Key::Home => Command::ZoomMax,
        Key::End => Command::ZoomMin,
        Key::Char(c) => match c.to_ascii_uppercase() {
            'E' => Command::ZoomIn,
            'Q' => Command::ZoomOut,
            ',' | '<' => Command::UpperDepthUp,
            '.' | '>' => Command::UpperDepthDown,
            '[' => Command::LowerDepthUp,
            ']' => Command::LowerDepthDown,
            'B' => Command::SnapLowerToUpper,
            d @ '0'..='9' => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "ASCII digits convert to 0..=9"
                )]
                let digit = (u32::from(d) - u32::from('0')) as u8;
                Command::DepthPreset(digit)
            }
            _ => Command::Unbound,
        },
        _ => Command::Unbound,
    }
}
