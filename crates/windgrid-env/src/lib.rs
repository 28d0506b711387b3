//! Stochastic windy gridworld environment.
//!
//! The [`Environment`] owns grid geometry, walls, wind, a reward
//! function, and a precomputed [`TransitionModel`]. The model maps every
//! `(state, action)` pair to a distribution over next states and is
//! immutable after construction; it is held behind an `Arc` so cloned
//! environments (e.g. for parallel rollouts) share it read-only while
//! each keeps its own agent position.
//!
//! Construction goes through [`EnvConfig`], validated up front; failures
//! are reported as [`ConfigError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod environment;
pub mod reward;
pub mod transition;

pub use config::{ConfigError, EnvConfig};
pub use environment::{Environment, RenderView, StepError};
pub use reward::RewardFn;
pub use transition::TransitionModel;
