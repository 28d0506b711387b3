//! The gridworld environment.
//!
//! [`Environment`] owns the static world (grid, walls, wind, reward,
//! transition model) and one piece of simulation state: the agent's
//! current position. [`step()`](Environment::step) is the only way that
//! position advances.
//!
//! # Sharing
//!
//! Everything except the position is immutable after construction and
//! held behind `Arc`. Cloning an `Environment` is cheap and yields an
//! independent position over the same shared model, which is how
//! parallel rollouts get one environment each.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use windgrid_core::{Action, ActionError, Offset, Position, ProbabilityDistribution};
use windgrid_space::{Grid, StateSpace, WallSet, WindMap};

use crate::config::{ConfigError, EnvConfig};
use crate::reward::RewardFn;
use crate::transition::TransitionModel;

// ── StepError ───────────────────────────────────────────────────

/// Errors from [`Environment::step`] and friends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The action is not one of the eight fixed moves.
    UnknownAction(ActionError),
    /// The transition model has no entry for the current pair.
    ///
    /// Unreachable for environments built by [`Environment::new`], which
    /// validates coverage.
    MissingTransition {
        /// Current state.
        state: Position,
        /// Requested action.
        action: Action,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAction(e) => write!(f, "{e}"),
            Self::MissingTransition { state, action } => {
                write!(f, "no transition for ({state}, {action})")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownAction(e) => Some(e),
            Self::MissingTransition { .. } => None,
        }
    }
}

impl From<ActionError> for StepError {
    fn from(e: ActionError) -> Self {
        Self::UnknownAction(e)
    }
}

// ── RenderView ──────────────────────────────────────────────────

/// Read-only view handed to renderers.
///
/// Exactly the five pieces of state a grid renderer needs.
#[derive(Clone, Copy, Debug)]
pub struct RenderView<'e> {
    /// Where the agent currently is.
    pub agent_position: Position,
    /// The goal cell.
    pub target_position: Position,
    /// Wall cells.
    pub walls: &'e WallSet,
    /// Wind per cell.
    pub winds: &'e WindMap,
    /// `(width, height)`.
    pub grid_size: (u32, u32),
}

// ── Environment ─────────────────────────────────────────────────

/// A stochastic windy gridworld.
///
/// Created from an [`EnvConfig`] via [`new()`](Environment::new).
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use windgrid_core::{Action, Position};
/// use windgrid_env::{EnvConfig, Environment};
///
/// let mut env = Environment::new(EnvConfig::new(2, 2)).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// let (next, reward) = env.step(Action::Right, &mut rng).unwrap();
/// assert_eq!(next, Position::new(1, 0));
/// assert_eq!(reward, -1.0);
/// ```
#[derive(Clone)]
pub struct Environment {
    grid: Grid,
    walls: Arc<WallSet>,
    winds: Arc<WindMap>,
    state_space: Arc<StateSpace>,
    model: Arc<TransitionModel>,
    reward_fn: RewardFn,
    initial_position: Position,
    target_position: Position,
    position: Position,
}

impl Environment {
    /// Validate `config` and build the environment.
    ///
    /// If the config carries no transition model, the default windy
    /// dynamics are evaluated for every state and action. A supplied
    /// model is checked for full coverage instead.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`EnvConfig::validate`].
    pub fn new(config: EnvConfig) -> Result<Self, ConfigError> {
        let (grid, state_space) = config.resolve_geometry()?;

        let supplied = config.transition_model.is_some();
        let model = match config.transition_model {
            Some(model) => {
                model.validate(&state_space)?;
                model
            }
            None => TransitionModel::build(&state_space, &config.winds)?,
        };

        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            states = state_space.len(),
            transitions = model.len(),
            supplied,
            "environment constructed"
        );

        Ok(Self {
            grid,
            walls: Arc::new(config.walls),
            winds: Arc::new(config.winds),
            state_space: Arc::new(state_space),
            model: Arc::new(model),
            reward_fn: config.reward_fn,
            initial_position: config.agent_position,
            target_position: config.target_position,
            position: config.agent_position,
        })
    }

    /// Take `action` from the current position.
    ///
    /// The reward is evaluated for `(action, current state)`, a next
    /// state is sampled from the transition model using `rng`, and the
    /// position moves there. Returns `(next_state, reward)`. A missing
    /// transition fails before the reward function is called.
    ///
    /// To inspect outcomes without moving, use [`peek`](Self::peek).
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
    ) -> Result<(Position, f64), StepError> {
        let state = self.position;
        let outcomes = self
            .model
            .get(state, action)
            .ok_or(StepError::MissingTransition { state, action })?;
        let reward = (self.reward_fn)(action, state);
        let next = *outcomes.sample(rng);
        self.position = next;

        tracing::trace!(%state, %action, %next, reward, "step");
        Ok((next, reward))
    }

    /// [`step`](Self::step) with the action given as a raw offset.
    ///
    /// # Errors
    ///
    /// [`StepError::UnknownAction`] if `offset` is not one of the eight
    /// moves; the position is left unchanged.
    pub fn step_offset<R: Rng + ?Sized>(
        &mut self,
        offset: Offset,
        rng: &mut R,
    ) -> Result<(Position, f64), StepError> {
        let action = Action::try_from(offset)?;
        self.step(action, rng)
    }

    /// Next-state distribution for `action` from the current position.
    pub fn peek(&self, action: Action) -> Option<&ProbabilityDistribution<Position>> {
        self.model.get(self.position, action)
    }

    /// Whether `position` is in bounds and not a wall.
    pub fn is_allowed(&self, position: Position) -> bool {
        self.grid.contains(position) && !self.walls.contains(&position)
    }

    /// Move the agent back to its configured starting position.
    pub fn reset_position(&mut self) {
        self.position = self.initial_position;
    }

    /// Current agent position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Starting position from the configuration.
    pub fn initial_position(&self) -> Position {
        self.initial_position
    }

    /// Goal cell.
    pub fn target_position(&self) -> Position {
        self.target_position
    }

    /// Whether the agent currently sits on the target.
    pub fn at_target(&self) -> bool {
        self.position == self.target_position
    }

    /// Grid geometry.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `(width, height)`.
    pub fn grid_size(&self) -> (u32, u32) {
        self.grid.size()
    }

    /// Wall cells.
    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    /// Wind per cell.
    pub fn winds(&self) -> &WindMap {
        &self.winds
    }

    /// All occupiable states, computed once at construction.
    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    /// The transition model.
    pub fn model(&self) -> &TransitionModel {
        &self.model
    }

    /// A shared handle to the transition model.
    pub fn shared_model(&self) -> Arc<TransitionModel> {
        Arc::clone(&self.model)
    }

    /// Next-state distribution for an arbitrary `(state, action)`.
    pub fn transition(
        &self,
        state: Position,
        action: Action,
    ) -> Option<&ProbabilityDistribution<Position>> {
        self.model.get(state, action)
    }

    /// Reward for taking `action` in `state`.
    pub fn reward(&self, action: Action, state: Position) -> f64 {
        (self.reward_fn)(action, state)
    }

    /// The reward function.
    pub fn reward_fn(&self) -> &RewardFn {
        &self.reward_fn
    }

    /// Read-only state for renderers.
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            agent_position: self.position,
            target_position: self.target_position,
            walls: &self.walls,
            winds: &self.winds,
            grid_size: self.grid.size(),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("grid", &self.grid)
            .field("position", &self.position)
            .field("target_position", &self.target_position)
            .field("walls", &self.walls.len())
            .field("winds", &self.winds.len())
            .field("states", &self.state_space.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use windgrid_space::Wind;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    // ── Stepping ────────────────────────────────────────────────

    #[test]
    fn step_moves_and_returns_default_reward() {
        let mut env = Environment::new(EnvConfig::new(2, 2)).unwrap();
        let mut rng = rng();
        assert_eq!(env.step(Action::Right, &mut rng), Ok((p(1, 0), -1.0)));
        assert_eq!(env.step(Action::Up, &mut rng), Ok((p(1, 1), -1.0)));
        assert_eq!(env.position(), p(1, 1));
        assert!(env.at_target());
    }

    #[test]
    fn reward_uses_pre_step_state() {
        let cfg = EnvConfig::new(3, 1).with_reward(reward::from_fn(|_, s| s.x as f64));
        let mut env = Environment::new(cfg).unwrap();
        let mut rng = rng();
        assert_eq!(env.step(Action::Right, &mut rng).unwrap().1, 0.0);
        assert_eq!(env.step(Action::Right, &mut rng).unwrap().1, 1.0);
    }

    #[test]
    fn blocked_step_stays_put() {
        let mut env = Environment::new(EnvConfig::new(4, 4)).unwrap();
        let mut rng = rng();
        assert_eq!(env.step(Action::Left, &mut rng).unwrap().0, p(0, 0));
        assert_eq!(env.step(Action::DownLeft, &mut rng).unwrap().0, p(0, 0));
    }

    #[test]
    fn step_offset_rejects_unknown_action() {
        let mut env = Environment::new(EnvConfig::new(3, 3)).unwrap();
        let mut rng = rng();
        assert_eq!(
            env.step_offset((0, 2), &mut rng),
            Err(StepError::UnknownAction(ActionError::UnknownOffset { dx: 0, dy: 2 }))
        );
        assert_eq!(env.position(), p(0, 0));
        assert_eq!(env.step_offset((1, 1), &mut rng).unwrap().0, p(1, 1));
    }

    #[test]
    fn windy_step_lands_in_support() {
        let cfg = EnvConfig::new(5, 5)
            .with_agent((2, 0))
            .with_wind((2, 0), Wind::new((0, 1), 0.5));
        let env = Environment::new(cfg).unwrap();
        let mut rng = rng();
        for _ in 0..50 {
            let mut e = env.clone();
            let (next, _) = e.step(Action::Right, &mut rng).unwrap();
            assert!(next == p(3, 0) || next == p(3, 1), "unexpected {next}");
        }
    }

    #[test]
    fn peek_does_not_move() {
        let env = Environment::new(EnvConfig::new(3, 3)).unwrap();
        let d = env.peek(Action::Up).unwrap();
        assert_eq!(d.probability_of(&p(0, 1)), 1.0);
        assert_eq!(env.position(), p(0, 0));
    }

    // ── Queries ─────────────────────────────────────────────────

    #[test]
    fn is_allowed_checks_bounds_and_walls() {
        let env = Environment::new(EnvConfig::new(3, 3).with_wall((1, 1))).unwrap();
        assert!(env.is_allowed(p(0, 0)));
        assert!(!env.is_allowed(p(1, 1)));
        assert!(!env.is_allowed(p(3, 0)));
        assert!(!env.is_allowed(p(0, -1)));
        for s in env.state_space().iter() {
            assert!(env.is_allowed(s));
        }
    }

    #[test]
    fn clones_share_model_but_not_position() {
        let env = Environment::new(EnvConfig::new(3, 3)).unwrap();
        let mut other = env.clone();
        other.step(Action::Up, &mut rng()).unwrap();
        assert_eq!(env.position(), p(0, 0));
        assert_eq!(other.position(), p(0, 1));
        assert!(Arc::ptr_eq(&env.shared_model(), &other.shared_model()));
    }

    #[test]
    fn reset_position_returns_to_start() {
        let mut env = Environment::new(EnvConfig::new(3, 3).with_agent((1, 1))).unwrap();
        env.step(Action::Up, &mut rng()).unwrap();
        env.reset_position();
        assert_eq!(env.position(), p(1, 1));
    }

    #[test]
    fn render_view_exposes_world() {
        let cfg = EnvConfig::new(4, 3)
            .with_wall((2, 2))
            .with_wind((1, 0), Wind::new((0, 1), 0.2));
        let env = Environment::new(cfg).unwrap();
        let view = env.render_view();
        assert_eq!(view.agent_position, p(0, 0));
        assert_eq!(view.target_position, p(3, 2));
        assert_eq!(view.grid_size, (4, 3));
        assert!(view.walls.contains(&p(2, 2)));
        assert_eq!(view.winds.get(&p(1, 0)), Some(&Wind::new((0, 1), 0.2)));
    }

    #[test]
    fn missing_transition_skips_reward() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cfg = EnvConfig::new(2, 2).with_reward(reward::from_fn(move |_, _| {
            counter.fetch_add(1, Ordering::Relaxed);
            -1.0
        }));
        let mut env = Environment::new(cfg).unwrap();
        env.model = Arc::new(TransitionModel::new());

        let err = env.step(Action::Right, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            StepError::MissingTransition {
                state: p(0, 0),
                action: Action::Right
            }
        );
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(env.position(), p(0, 0));
    }

    #[test]
    fn supplied_model_is_used() {
        // A single-cell world whose supplied model keeps the agent in place.
        let mut model = TransitionModel::new();
        for a in Action::ALL {
            model.insert(p(0, 0), a, ProbabilityDistribution::point(p(0, 0)));
        }
        let cfg = EnvConfig::new(1, 1).with_transition_model(model.clone());
        let env = Environment::new(cfg).unwrap();
        assert_eq!(env.model(), &model);
    }
}
