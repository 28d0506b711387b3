//! Core types for the Windgrid MDP simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary used throughout the workspace: grid
//! positions, the fixed eight-action set, finite probability
//! distributions, and the leaf error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod distribution;
pub mod error;
pub mod position;

pub use action::Action;
pub use distribution::ProbabilityDistribution;
pub use error::{ActionError, DistributionError, PolicyError};
pub use position::{Offset, Position};
