//! Environment configuration, validation, and error types.
//!
//! [`EnvConfig`] is the builder-input for constructing an
//! [`Environment`](crate::Environment). [`validate()`](EnvConfig::validate)
//! checks every structural invariant up front; the environment
//! constructor runs the same checks before building anything.

use std::error::Error;
use std::fmt;

use windgrid_core::{Action, DistributionError, Position};
use windgrid_space::{Grid, SpaceError, StateSpace, WallSet, Wind, WindMap};

use crate::reward::{self, RewardFn};
use crate::transition::TransitionModel;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EnvConfig`] or building a
/// [`TransitionModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid geometry is invalid or a position lies outside it.
    Space(SpaceError),
    /// The agent or target starts on a wall.
    PositionOnWall {
        /// `"agent"` or `"target"`.
        role: &'static str,
        /// The offending position.
        position: Position,
    },
    /// A wind strength is NaN or outside `[0, 1]`.
    WindStrengthOutOfRange {
        /// Cell carrying the wind.
        position: Position,
        /// The rejected strength.
        strength: f64,
    },
    /// A supplied transition model has no entry for a reachable pair.
    IncompleteModel {
        /// Uncovered state.
        state: Position,
        /// Uncovered action.
        action: Action,
    },
    /// A supplied transition model can lead outside the state space.
    ModelOutcomeNotAllowed {
        /// Source state.
        state: Position,
        /// Action taken.
        action: Action,
        /// Disallowed next state.
        outcome: Position,
    },
    /// Discount factor outside `(0, 1]`.
    InvalidDiscount {
        /// The rejected value.
        gamma: f64,
    },
    /// A transition distribution could not be normalized.
    Distribution(DistributionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::PositionOnWall { role, position } => {
                write!(f, "{role} position {position} is a wall")
            }
            Self::WindStrengthOutOfRange { position, strength } => {
                write!(
                    f,
                    "wind strength at {position} must lie in [0, 1], got {strength}"
                )
            }
            Self::IncompleteModel { state, action } => {
                write!(f, "transition model has no entry for ({state}, {action})")
            }
            Self::ModelOutcomeNotAllowed {
                state,
                action,
                outcome,
            } => write!(
                f,
                "transition ({state}, {action}) leads to disallowed position {outcome}"
            ),
            Self::InvalidDiscount { gamma } => {
                write!(f, "discount factor must lie in (0, 1], got {gamma}")
            }
            Self::Distribution(e) => write!(f, "distribution: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Distribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<DistributionError> for ConfigError {
    fn from(e: DistributionError) -> Self {
        Self::Distribution(e)
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Everything needed to construct an [`Environment`](crate::Environment).
///
/// Fields are public for struct-literal construction; the `with_*`
/// setters allow chaining from [`EnvConfig::new`] or `Default`.
///
/// Defaults: 4×4 grid, agent at `(0, 0)`, target at `(3, 3)`, no walls,
/// no wind, constant −1 reward, dynamics built from the grid.
#[derive(Clone)]
pub struct EnvConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Starting position of the agent.
    pub agent_position: Position,
    /// Goal cell. Informational: dynamics do not treat it specially.
    pub target_position: Position,
    /// Cells the agent can never occupy.
    pub walls: WallSet,
    /// Per-cell wind.
    pub winds: WindMap,
    /// Reward for taking an action in a state.
    pub reward_fn: RewardFn,
    /// Externally supplied dynamics. `None` builds the default windy model.
    pub transition_model: Option<TransitionModel>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            agent_position: Position::new(0, 0),
            target_position: Position::new(3, 3),
            walls: WallSet::new(),
            winds: WindMap::new(),
            reward_fn: reward::step_cost(),
            transition_model: None,
        }
    }
}

impl EnvConfig {
    /// A `width × height` grid with agent at the origin and target in
    /// the far corner.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            target_position: Position::new(
                width.saturating_sub(1) as i32,
                height.saturating_sub(1) as i32,
            ),
            ..Self::default()
        }
    }

    /// Set the agent's starting position.
    pub fn with_agent(mut self, position: impl Into<Position>) -> Self {
        self.agent_position = position.into();
        self
    }

    /// Set the target position.
    pub fn with_target(mut self, position: impl Into<Position>) -> Self {
        self.target_position = position.into();
        self
    }

    /// Add one wall.
    pub fn with_wall(mut self, position: impl Into<Position>) -> Self {
        self.walls.insert(position.into());
        self
    }

    /// Add several walls.
    pub fn with_walls<I, P>(mut self, walls: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        self.walls.extend(walls.into_iter().map(Into::into));
        self
    }

    /// Set the wind leaving `position`, replacing any previous entry.
    pub fn with_wind(mut self, position: impl Into<Position>, wind: Wind) -> Self {
        self.winds.insert(position.into(), wind);
        self
    }

    /// Replace the reward function.
    pub fn with_reward(mut self, reward_fn: RewardFn) -> Self {
        self.reward_fn = reward_fn;
        self
    }

    /// Supply dynamics instead of building them from the grid.
    pub fn with_transition_model(mut self, model: TransitionModel) -> Self {
        self.transition_model = Some(model);
        self
    }

    /// Check structural invariants without building the environment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - either grid dimension is zero or too large
    /// - a wall, the agent, the target, or a wind cell lies outside the grid
    /// - the agent or target lies on a wall
    /// - a wind strength is outside `[0, 1]`
    /// - a supplied transition model is incomplete or leaves the state space
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (_, space) = self.resolve_geometry()?;
        if let Some(model) = &self.transition_model {
            model.validate(&space)?;
        }
        Ok(())
    }

    /// Validate geometry and derive the grid and state space.
    ///
    /// Does not look at `transition_model`.
    pub(crate) fn resolve_geometry(&self) -> Result<(Grid, StateSpace), ConfigError> {
        let grid = Grid::new(self.width, self.height)?;

        for wall in &self.walls {
            grid.check("wall", *wall)?;
        }
        grid.check("agent", self.agent_position)?;
        grid.check("target", self.target_position)?;

        if self.walls.contains(&self.agent_position) {
            return Err(ConfigError::PositionOnWall {
                role: "agent",
                position: self.agent_position,
            });
        }
        if self.walls.contains(&self.target_position) {
            return Err(ConfigError::PositionOnWall {
                role: "target",
                position: self.target_position,
            });
        }

        for (position, wind) in &self.winds {
            grid.check("wind", *position)?;
            if !wind.has_valid_strength() {
                return Err(ConfigError::WindStrengthOutOfRange {
                    position: *position,
                    strength: wind.strength,
                });
            }
        }

        let space = StateSpace::new(&grid, &self.walls);
        Ok((grid, space))
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("agent_position", &self.agent_position)
            .field("target_position", &self.target_position)
            .field("walls", &self.walls)
            .field("winds", &self.winds)
            .field("transition_model", &self.transition_model.as_ref().map(|m| m.len()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn default_is_valid() {
        EnvConfig::default().validate().unwrap();
    }

    #[test]
    fn new_places_target_in_far_corner() {
        let cfg = EnvConfig::new(5, 3);
        assert_eq!(cfg.target_position, p(4, 2));
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(
            EnvConfig::new(0, 4).validate(),
            Err(ConfigError::Space(SpaceError::EmptyGrid))
        );
    }

    #[test]
    fn wall_out_of_bounds_rejected() {
        let r = EnvConfig::new(3, 3).with_wall((3, 0)).validate();
        assert!(matches!(
            r,
            Err(ConfigError::Space(SpaceError::PositionOutOfBounds { role: "wall", .. }))
        ));
    }

    #[test]
    fn agent_out_of_bounds_rejected() {
        let r = EnvConfig::new(3, 3).with_agent((-1, 0)).validate();
        assert!(matches!(
            r,
            Err(ConfigError::Space(SpaceError::PositionOutOfBounds { role: "agent", .. }))
        ));
    }

    #[test]
    fn target_out_of_bounds_rejected() {
        let r = EnvConfig::new(4, 4).with_target((4, 4)).validate();
        assert!(matches!(
            r,
            Err(ConfigError::Space(SpaceError::PositionOutOfBounds { role: "target", .. }))
        ));
    }

    #[test]
    fn agent_on_wall_rejected() {
        let r = EnvConfig::new(3, 3).with_wall((0, 0)).validate();
        assert_eq!(
            r,
            Err(ConfigError::PositionOnWall {
                role: "agent",
                position: p(0, 0),
            })
        );
    }

    #[test]
    fn target_on_wall_rejected() {
        let r = EnvConfig::new(3, 3).with_wall((2, 2)).validate();
        assert!(matches!(
            r,
            Err(ConfigError::PositionOnWall { role: "target", .. })
        ));
    }

    #[test]
    fn wind_strength_checked() {
        let r = EnvConfig::new(3, 3)
            .with_wind((1, 1), Wind::new((0, 1), -0.2))
            .validate();
        assert!(matches!(
            r,
            Err(ConfigError::WindStrengthOutOfRange { .. })
        ));
    }

    #[test]
    fn wind_outside_grid_rejected() {
        let r = EnvConfig::new(3, 3)
            .with_wind((7, 1), Wind::new((0, 1), 0.5))
            .validate();
        assert!(matches!(
            r,
            Err(ConfigError::Space(SpaceError::PositionOutOfBounds { role: "wind", .. }))
        ));
    }

    #[test]
    fn incomplete_supplied_model_rejected() {
        let r = EnvConfig::new(2, 2)
            .with_transition_model(TransitionModel::new())
            .validate();
        assert!(matches!(r, Err(ConfigError::IncompleteModel { .. })));
    }

    #[test]
    fn error_source_chains() {
        let e = ConfigError::from(SpaceError::EmptyGrid);
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "space: grid must have at least one cell");
    }
}
