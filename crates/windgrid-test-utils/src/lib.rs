//! Test utilities and fixtures for Windgrid development.
//!
//! Provides prebuilt environment configurations ([`fixtures`]), seeded
//! generators, and a [`ScriptedPolicy`] that replays a fixed action
//! sequence regardless of state.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use windgrid_agent::Policy;
use windgrid_core::{Action, PolicyError, Position};

pub use fixtures::{cliff_corridor, open_grid, windy_column};

/// A reproducible generator for tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Replays a fixed action script, cycling when it runs out.
///
/// The cursor is atomic so the policy stays `Sync` like any other.
/// An empty script fails every query with [`PolicyError::Uncovered`].
pub struct ScriptedPolicy {
    script: Vec<Action>,
    cursor: AtomicUsize,
}

impl ScriptedPolicy {
    pub fn new(script: impl Into<Vec<Action>>) -> Self {
        Self {
            script: script.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// How many actions have been handed out.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl Policy for ScriptedPolicy {
    fn name(&self) -> &str {
        "scripted"
    }

    fn select(&self, state: Position, _rng: &mut dyn RngCore) -> Result<Action, PolicyError> {
        if self.script.is_empty() {
            return Err(PolicyError::Uncovered { state });
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        Ok(self.script[i % self.script.len()])
    }
}
