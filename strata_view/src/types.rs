// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types shared across the view and selection crates.

use kurbo::Point;

/// An integer world column: one block-wide cell of the top-down map.
///
/// `x` grows eastward with screen `x`; `z` grows southward with screen `y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Column {
    /// East-west block coordinate.
    pub x: i32,
    /// North-south block coordinate.
    pub z: i32,
}

impl Column {
    /// Create a column from block coordinates.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The column containing a continuous world point.
    ///
    /// World `z` travels in [`Point::y`].
    #[allow(
        clippy::cast_possible_truncation,
        reason = "world coordinates are bounded by the map size, far inside i32"
    )]
    pub fn containing(world: Point) -> Self {
        Self {
            x: world.x.floor() as i32,
            z: world.y.floor() as i32,
        }
    }

    /// The north-west corner of this column as a world point.
    pub fn origin(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.z))
    }

    /// The middle of this column as a world point.
    pub fn middle(self) -> Point {
        Point::new(f64::from(self.x) + 0.5, f64::from(self.z) + 0.5)
    }
}

impl From<(i32, i32)> for Column {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}
