//! Grid positions and integer offsets.

use std::fmt;
use std::ops::Add;

/// An integer displacement `(dx, dy)` on the grid.
///
/// Used for action offsets and wind directions.
pub type Offset = (i32, i32);

/// A cell on the grid, addressed as `(x, y)`.
///
/// A `Position` carries no bounds of its own; whether it lies inside a
/// particular grid is decided by that grid. Positions are the state of
/// the gridworld and key every lookup table in the workspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing upward.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position displaced by `offset`. Wraps on `i32` overflow, which
    /// only matters for positions far outside any constructible grid.
    pub const fn shifted(self, offset: Offset) -> Self {
        Self {
            x: self.x.wrapping_add(offset.0),
            y: self.y.wrapping_add(offset.1),
        }
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, rhs: Offset) -> Position {
        self.shifted(rhs)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, i32) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
