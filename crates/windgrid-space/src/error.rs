//! Error types for grid construction and bounds checks.

use std::fmt;
use windgrid_core::Position;

/// Errors arising from grid construction or position checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// A grid dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The rejected value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// A position lies outside the grid.
    PositionOutOfBounds {
        /// What the position was used for (e.g. `"wall"`, `"agent"`).
        role: &'static str,
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "grid {name} {value} exceeds maximum {max}")
            }
            Self::PositionOutOfBounds {
                role,
                position,
                width,
                height,
            } => write!(
                f,
                "{role} position {position} out of bounds: [0, {width}) x [0, {height})"
            ),
        }
    }
}

impl std::error::Error for SpaceError {}
