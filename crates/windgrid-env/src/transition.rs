//! Gridworld dynamics and the precomputed transition table.
//!
//! [`dynamics`] computes the next-state distribution for one
//! `(state, action)` pair:
//!
//! 1. The intended destination is `state + action`.
//! 2. If `state` has wind `(d, s)`, the destination keeps weight `1 - s`
//!    and `destination + d` receives weight `s`; coinciding candidates
//!    merge additively.
//! 3. Candidates outside the state space, or with zero weight, are
//!    dropped before normalization.
//! 4. If nothing survives, the agent stays at `state` with probability 1.
//!
//! [`TransitionModel::build`] evaluates this once for every state and
//! action and caches the result.

use crate::config::ConfigError;
use indexmap::IndexMap;
use smallvec::SmallVec;
use windgrid_core::{Action, ActionError, DistributionError, Offset, Position, ProbabilityDistribution};
use windgrid_space::{StateSpace, Wind, WindMap};

/// Next-state distribution for one `(state, action)` pair.
///
/// Pure and deterministic. `wind` is the entry for `state`, if any; its
/// strength is assumed to lie in `[0, 1]` (checked by the callers that
/// build models).
pub fn dynamics(
    state: Position,
    action: Action,
    wind: Option<&Wind>,
    space: &StateSpace,
) -> Result<ProbabilityDistribution<Position>, DistributionError> {
    let intended = state + action.offset();

    let mut candidates: SmallVec<[(Position, f64); 2]> = match wind {
        Some(w) => SmallVec::from_buf([
            (intended, 1.0 - w.strength),
            (intended + w.direction, w.strength),
        ]),
        None => SmallVec::from_elem((intended, 1.0), 1),
    };

    candidates.retain(|(pos, weight)| *weight > 0.0 && space.contains(*pos));

    if candidates.is_empty() {
        return Ok(ProbabilityDistribution::point(state));
    }
    ProbabilityDistribution::from_weights(candidates)
}

/// Immutable table of next-state distributions keyed by `(state, action)`.
///
/// The single source of truth for environment dynamics. Entries are
/// stored in build order (state-major, then [`Action::ALL`] order).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionModel {
    table: IndexMap<(Position, Action), ProbabilityDistribution<Position>>,
}

impl TransitionModel {
    /// Build the default windy-gridworld model over `space`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WindStrengthOutOfRange`] if any wind entry
    /// has a strength outside `[0, 1]`.
    pub fn build(space: &StateSpace, winds: &WindMap) -> Result<Self, ConfigError> {
        for (position, wind) in winds {
            if !wind.has_valid_strength() {
                return Err(ConfigError::WindStrengthOutOfRange {
                    position: *position,
                    strength: wind.strength,
                });
            }
        }

        let mut table = IndexMap::with_capacity(space.len() * Action::COUNT);
        for state in space.iter() {
            let wind = winds.get(&state);
            for action in Action::ALL {
                table.insert((state, action), dynamics(state, action, wind, space)?);
            }
        }
        Ok(Self { table })
    }

    /// An empty model, to be filled with [`insert`](Self::insert) for
    /// externally supplied dynamics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distribution for `(state, action)`, replacing any previous
    /// entry.
    pub fn insert(
        &mut self,
        state: Position,
        action: Action,
        distribution: ProbabilityDistribution<Position>,
    ) -> &mut Self {
        self.table.insert((state, action), distribution);
        self
    }

    /// Like [`insert`](Self::insert), with the action given as a raw offset.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownOffset`] if `offset` is not one of
    /// the eight actions.
    pub fn insert_offset(
        &mut self,
        state: Position,
        offset: Offset,
        distribution: ProbabilityDistribution<Position>,
    ) -> Result<&mut Self, ActionError> {
        let action = Action::try_from(offset)?;
        Ok(self.insert(state, action, distribution))
    }

    /// Distribution over next states for `(state, action)`.
    pub fn get(&self, state: Position, action: Action) -> Option<&ProbabilityDistribution<Position>> {
        self.table.get(&(state, action))
    }

    /// Probability of moving from `state` to `next` under `action`.
    pub fn probability(&self, state: Position, action: Action, next: Position) -> f64 {
        self.get(state, action)
            .map_or(0.0, |d| d.probability_of(&next))
    }

    /// All entries in build order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (Position, Action, &ProbabilityDistribution<Position>)> {
        self.table.iter().map(|(&(s, a), d)| (s, a, d))
    }

    /// Number of `(state, action)` entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the model has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Check that the model covers every state and action of `space`
    /// and only ever leads into `space`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::IncompleteModel`] for the first uncovered pair
    /// - [`ConfigError::ModelOutcomeNotAllowed`] for the first outcome
    ///   outside `space`
    pub fn validate(&self, space: &StateSpace) -> Result<(), ConfigError> {
        for state in space.iter() {
            for action in Action::ALL {
                let dist = self
                    .get(state, action)
                    .ok_or(ConfigError::IncompleteModel { state, action })?;
                if let Some(outcome) = dist.support().find(|p| !space.contains(**p)) {
                    return Err(ConfigError::ModelOutcomeNotAllowed {
                        state,
                        action,
                        outcome: *outcome,
                    });
                }
            }
        }
        Ok(())
    }
}
