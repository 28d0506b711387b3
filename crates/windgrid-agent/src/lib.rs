//! Policies and agents that drive Windgrid environments.
//!
//! An [`Agent`] wraps one [`Environment`](windgrid_env::Environment) and
//! one [`Policy`]. Each [`step_once()`](Agent::step_once) asks the policy
//! for an action, steps the environment, records the experience, and
//! accumulates discounted return. The [`rollout`] module runs many
//! independent episodes in parallel over one shared transition model.
//!
//! All randomness is passed in explicitly as a generator, so a fixed
//! seed reproduces a trajectory exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod policy;
pub mod rollout;

pub use agent::{Agent, Experience};
pub use error::AgentError;
pub use policy::{FunctionPolicy, Policy, RandomPolicy, TablePolicy};
pub use rollout::{run_episode, run_rollouts, RolloutConfig, RolloutSummary};
