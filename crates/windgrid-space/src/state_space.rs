//! The set of occupiable cells.

use crate::grid::Grid;
use crate::terrain::WallSet;
use indexmap::IndexSet;
use windgrid_core::Position;

/// All positions that are in bounds and not walls.
///
/// Derived once from a [`Grid`] and a [`WallSet`] and immutable
/// afterwards. Iteration follows [`Grid::cells`] order, so two state
/// spaces built from the same inputs enumerate identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSpace {
    cells: IndexSet<Position>,
}

impl StateSpace {
    /// Derive the state space of `grid` with `walls` removed.
    pub fn new(grid: &Grid, walls: &WallSet) -> Self {
        let cells = grid.cells().filter(|p| !walls.contains(p)).collect();
        Self { cells }
    }

    /// Whether `position` is an occupiable state.
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Iterate the states in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether every cell is a wall.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Canonical index of `position`, if it is a state.
    pub fn rank(&self, position: Position) -> Option<usize> {
        self.cells.get_index_of(&position)
    }
}

impl<'a> IntoIterator for &'a StateSpace {
    type Item = Position;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, Position>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}
