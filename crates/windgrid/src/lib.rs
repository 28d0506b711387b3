//! Windgrid: a stochastic windy gridworld for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Windgrid sub-crates. For most users, adding `windgrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use windgrid::prelude::*;
//!
//! // A 2×2 world; the target defaults to the far corner.
//! let env = Environment::new(EnvConfig::new(2, 2)).unwrap();
//! let mut agent = Agent::new(env, RandomPolicy, 1.0).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! agent.act_all([Action::RIGHT, Action::UP], &mut rng).unwrap();
//!
//! assert_eq!(agent.current_state(), Position::new(1, 1));
//! assert_eq!(agent.gain(), -2.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `windgrid-core` | Positions, actions, probability distributions |
//! | [`space`] | `windgrid-space` | Grid bounds, walls, wind, state space |
//! | [`env`] | `windgrid-env` | Transition model, configuration, environment |
//! | [`agent`] | `windgrid-agent` | Policies, agents, parallel rollouts |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`windgrid-core`).
///
/// [`types::Position`], the eight-move [`types::Action`] set, and
/// [`types::ProbabilityDistribution`].
pub use windgrid_core as types;

/// Grid geometry and terrain (`windgrid-space`).
///
/// [`space::Grid`] bounds, wall and wind maps, and the derived
/// [`space::StateSpace`].
pub use windgrid_space as space;

/// The environment (`windgrid-env`).
///
/// Build an [`env::EnvConfig`], hand it to [`env::Environment::new`], and
/// step. Dynamics are cached in an [`env::TransitionModel`].
pub use windgrid_env as env;

/// Policies and agents (`windgrid-agent`).
///
/// [`agent::Agent`] drives one environment with one [`agent::Policy`];
/// [`agent::run_rollouts`] runs many episodes in parallel.
pub use windgrid_agent as agent;

/// Common imports for typical Windgrid usage.
///
/// ```rust
/// use windgrid::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use windgrid_core::{
        Action, ActionError, DistributionError, Offset, PolicyError, Position,
        ProbabilityDistribution,
    };

    // Space
    pub use windgrid_space::{Grid, SpaceError, StateSpace, Wind};

    // Environment
    pub use windgrid_env::{
        ConfigError, EnvConfig, Environment, RenderView, RewardFn, StepError, TransitionModel,
    };

    // Agent
    pub use windgrid_agent::{
        run_rollouts, Agent, AgentError, Experience, FunctionPolicy, Policy, RandomPolicy,
        RolloutConfig, RolloutSummary, TablePolicy,
    };
}
