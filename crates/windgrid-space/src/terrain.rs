//! Static terrain: walls and wind.

use indexmap::{IndexMap, IndexSet};
use windgrid_core::{Offset, Position};

/// Cells that can never be occupied. Insertion-ordered for stable iteration.
pub type WallSet = IndexSet<Position>;

/// Per-cell wind, keyed by the cell the agent moves *from*.
pub type WindMap = IndexMap<Position, Wind>;

/// A deterministic push applied when leaving a cell.
///
/// With probability `strength` the agent lands one `direction` step past
/// its intended destination; otherwise it lands where it intended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    /// Displacement added to the intended destination.
    pub direction: Offset,
    /// Probability in `[0, 1]` that the displacement applies.
    pub strength: f64,
}

impl Wind {
    /// Create a wind entry. Strength is checked when the environment is
    /// configured, not here.
    pub const fn new(direction: Offset, strength: f64) -> Self {
        Self {
            direction,
            strength,
        }
    }

    /// Whether `strength` is a usable probability (finite, in `[0, 1]`).
    pub fn has_valid_strength(&self) -> bool {
        (0.0..=1.0).contains(&self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_range() {
        assert!(Wind::new((0, 1), 0.0).has_valid_strength());
        assert!(Wind::new((0, 1), 1.0).has_valid_strength());
        assert!(!Wind::new((0, 1), 1.5).has_valid_strength());
        assert!(!Wind::new((0, 1), -0.1).has_valid_strength());
        assert!(!Wind::new((0, 1), f64::NAN).has_valid_strength());
    }
}
