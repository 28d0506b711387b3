//! Spatial structure of a Windgrid world.
//!
//! This crate describes *where* the agent may be: the rectangular
//! [`Grid`], the immutable wall set, the per-cell [`Wind`] map, and the
//! derived [`StateSpace`] of occupiable cells. Dynamics live in
//! `windgrid-env`; everything here is static geometry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod state_space;
pub mod terrain;

pub use error::SpaceError;
pub use grid::Grid;
pub use state_space::StateSpace;
pub use terrain::{WallSet, Wind, WindMap};
