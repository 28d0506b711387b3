//! Rectangular grid geometry.

use crate::error::SpaceError;
use windgrid_core::Position;

/// A `width × height` rectangle of cells with origin `(0, 0)`.
///
/// A position `(x, y)` is in bounds when `0 <= x < width` and
/// `0 <= y < height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a new grid.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of cells, walls included.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `position` lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Check that `position` is in bounds, tagging any error with `role`.
    pub fn check(&self, role: &'static str, position: Position) -> Result<Position, SpaceError> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(SpaceError::PositionOutOfBounds {
                role,
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Every cell in column-major order: `(0,0), (0,1), ..., (w-1, h-1)`.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }
}
