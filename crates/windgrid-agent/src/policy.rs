//! Action-selection policies.
//!
//! Every policy answers the same question, [`Policy::select`]: given a
//! state, which action? Three implementations cover the common cases:
//!
//! - [`RandomPolicy`]: uniform over the eight actions, ignores state
//! - [`TablePolicy`]: per-state distribution over actions
//! - [`FunctionPolicy`]: arbitrary caller-supplied rule

use indexmap::IndexMap;
use rand::{Rng, RngCore};
use windgrid_core::{Action, DistributionError, PolicyError, Position, ProbabilityDistribution};
use windgrid_space::StateSpace;

/// Chooses an action for a state.
///
/// Policies are immutable once built and shared read-only between
/// agents (hence `Send + Sync`). Any randomness must come from `rng`.
pub trait Policy: Send + Sync {
    /// Human-readable name, used in diagnostics.
    fn name(&self) -> &str;

    /// Choose an action for `state`.
    ///
    /// # Errors
    ///
    /// [`PolicyError::Uncovered`] if the policy has no rule for `state`.
    fn select(&self, state: Position, rng: &mut dyn RngCore) -> Result<Action, PolicyError>;
}

// ── RandomPolicy ────────────────────────────────────────────────

/// Picks one of the eight actions uniformly at random.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn select(&self, _state: Position, rng: &mut dyn RngCore) -> Result<Action, PolicyError> {
        Ok(Action::ALL[rng.random_range(0..Action::COUNT)])
    }
}

// ── TablePolicy ─────────────────────────────────────────────────

/// A stochastic policy stored as one action distribution per state.
///
/// Querying a state without an entry is an error; the caller is
/// responsible for covering every state the agent can reach.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TablePolicy {
    table: IndexMap<Position, ProbabilityDistribution<Action>>,
}

impl TablePolicy {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(state, distribution)` pairs. Later entries replace
    /// earlier ones for the same state.
    pub fn from_table<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Position, ProbabilityDistribution<Action>)>,
    {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Uniform over all eight actions in every state of `space`.
    pub fn uniform(space: &StateSpace) -> Self {
        let everywhere = ProbabilityDistribution::from_weights(Action::ALL.map(|a| (a, 1.0)))
            .expect("eight unit weights form a valid distribution");
        Self::from_table(space.iter().map(|s| (s, everywhere.clone())))
    }

    /// Deterministic policy: `action` with probability 1 in `state`.
    pub fn insert_action(&mut self, state: Position, action: Action) -> &mut Self {
        self.table
            .insert(state, ProbabilityDistribution::point(action));
        self
    }

    /// Set the action distribution for `state` from unnormalized weights.
    ///
    /// # Errors
    ///
    /// Any [`DistributionError`] from normalizing `weights`.
    pub fn insert_weights<I>(&mut self, state: Position, weights: I) -> Result<&mut Self, DistributionError>
    where
        I: IntoIterator<Item = (Action, f64)>,
    {
        let dist = ProbabilityDistribution::from_weights(weights)?;
        self.table.insert(state, dist);
        Ok(self)
    }

    /// The distribution for `state`, if covered.
    pub fn get(&self, state: Position) -> Option<&ProbabilityDistribution<Action>> {
        self.table.get(&state)
    }

    /// Probability of choosing `action` in `state` (0.0 if uncovered).
    pub fn action_probability(&self, state: Position, action: Action) -> f64 {
        self.get(state).map_or(0.0, |d| d.probability_of(&action))
    }

    /// Whether every state of `space` has an entry.
    pub fn covers(&self, space: &StateSpace) -> bool {
        space.iter().all(|s| self.table.contains_key(&s))
    }

    /// Number of covered states.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no state is covered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Policy for TablePolicy {
    fn name(&self) -> &str {
        "table"
    }

    fn select(&self, state: Position, rng: &mut dyn RngCore) -> Result<Action, PolicyError> {
        self.get(state)
            .map(|d| *d.sample(rng))
            .ok_or(PolicyError::Uncovered { state })
    }
}

// ── FunctionPolicy ──────────────────────────────────────────────

type Rule = Box<dyn Fn(Position, &mut dyn RngCore) -> Action + Send + Sync>;

/// A policy defined by a caller-supplied rule.
///
/// Used for strategies computed outside this crate, e.g. acting greedily
/// on a value function.
pub struct FunctionPolicy {
    name: String,
    rule: Rule,
}

impl FunctionPolicy {
    /// A stochastic rule that may draw from the supplied generator.
    pub fn new<F>(name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(Position, &mut dyn RngCore) -> Action + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            rule: Box::new(rule),
        }
    }

    /// A deterministic `state -> action` rule.
    pub fn deterministic<F>(name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(Position) -> Action + Send + Sync + 'static,
    {
        Self::new(name, move |state, _| rule(state))
    }
}

impl Policy for FunctionPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn select(&self, state: Position, rng: &mut dyn RngCore) -> Result<Action, PolicyError> {
        Ok((self.rule)(state, rng))
    }
}

impl std::fmt::Debug for FunctionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionPolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
