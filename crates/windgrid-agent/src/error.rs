//! Error type for agent-driven simulation.

use std::error::Error;
use std::fmt;

use windgrid_core::PolicyError;
use windgrid_env::{ConfigError, StepError};

/// Errors from running an [`Agent`](crate::Agent) or a rollout.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentError {
    /// Agent or rollout configuration is invalid.
    Config(ConfigError),
    /// The policy could not choose an action.
    Policy(PolicyError),
    /// The environment rejected the step.
    Step(StepError),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Policy(e) => write!(f, "policy: {e}"),
            Self::Step(e) => write!(f, "step: {e}"),
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Policy(e) => Some(e),
            Self::Step(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AgentError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PolicyError> for AgentError {
    fn from(e: PolicyError) -> Self {
        Self::Policy(e)
    }
}

impl From<StepError> for AgentError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}
