//! Leaf error types shared across the workspace.
//!
//! Each subsystem owns its own enum. Construction-time configuration
//! errors live with the crates that validate configuration; the types
//! here cover distributions, actions, and policy lookup.

use crate::position::Position;
use std::error::Error;
use std::fmt;

/// Errors from building a [`ProbabilityDistribution`](crate::ProbabilityDistribution).
#[derive(Clone, Debug, PartialEq)]
pub enum DistributionError {
    /// No outcomes were supplied.
    Empty,
    /// A weight was negative, NaN, or infinite.
    InvalidWeight {
        /// Index of the offending weight, in insertion order.
        index: usize,
        /// The offending value.
        weight: f64,
    },
    /// Every weight was zero.
    NoPositiveWeight,
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "distribution has no outcomes"),
            Self::InvalidWeight { index, weight } => {
                write!(
                    f,
                    "weight #{index} must be finite and non-negative, got {weight}"
                )
            }
            Self::NoPositiveWeight => write!(f, "distribution has no positive weight"),
        }
    }
}

impl Error for DistributionError {}

/// An action outside the fixed eight-action set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// No action moves by this offset.
    UnknownOffset {
        /// Horizontal displacement.
        dx: i32,
        /// Vertical displacement.
        dy: i32,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOffset { dx, dy } => write!(f, "unknown action ({dx}, {dy})"),
        }
    }
}

impl Error for ActionError {}

/// Errors from querying a policy.
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyError {
    /// A table policy has no entry for this state.
    Uncovered {
        /// The state that was queried.
        state: Position,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncovered { state } => write!(f, "policy has no entry for state {state}"),
        }
    }
}

impl Error for PolicyError {}
