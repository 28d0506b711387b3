//! Reward functions.
//!
//! A reward function maps `(action, state)` to a scalar and is fixed for
//! the lifetime of an environment. It is shared behind an `Arc` so cloned
//! environments running on other threads see the same function.

use std::sync::Arc;
use windgrid_core::{Action, Position};

/// Shared, thread-safe reward function `(action, state) -> reward`.
pub type RewardFn = Arc<dyn Fn(Action, Position) -> f64 + Send + Sync>;

/// Default per-step reward.
pub const STEP_COST: f64 = -1.0;

/// The same reward for every action in every state.
pub fn constant(value: f64) -> RewardFn {
    Arc::new(move |_, _| value)
}

/// Constant [`STEP_COST`]: every step costs one unit.
pub fn step_cost() -> RewardFn {
    constant(STEP_COST)
}

/// Wrap a closure as a [`RewardFn`].
pub fn from_fn<F>(f: F) -> RewardFn
where
    F: Fn(Action, Position) -> f64 + Send + Sync + 'static,
{
    Arc::new(f)
}
