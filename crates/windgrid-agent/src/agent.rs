//! An agent driving an environment under a policy.
//!
//! The agent owns its [`Environment`], so the environment's position can
//! only change through the agent and the two never disagree about the
//! current state. Outside code gets shared access only.

use std::sync::Arc;

use rand::Rng;
use windgrid_core::{Action, Position};
use windgrid_env::{ConfigError, Environment, StepError};

use crate::error::AgentError;
use crate::policy::Policy;

/// One recorded step: the action taken, the reward received, and where
/// the agent ended up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Experience {
    /// Action taken.
    pub action: Action,
    /// Reward for `(action, state before the step)`.
    pub reward: f64,
    /// State after the step.
    pub next_state: Position,
}

/// A policy-driven agent accumulating discounted return.
///
/// After `t` steps the gain is `Σ γ^k · r_k` for `k = 0..t`; the first
/// reward is undiscounted.
///
/// The experience trace is append-only and survives [`reset`](Self::reset)
/// so multi-episode analysis can inspect earlier episodes. Use
/// [`clear_history`](Self::clear_history) or [`reset_full`](Self::reset_full)
/// to drop it.
pub struct Agent {
    env: Environment,
    policy: Arc<dyn Policy>,
    gamma: f64,
    time_step: u64,
    // γ^time_step, maintained incrementally.
    discount: f64,
    gain: f64,
    recent_reward: f64,
    current_state: Position,
    experience: Vec<Experience>,
}

impl Agent {
    /// Wrap `env` with `policy` and discount factor `gamma`.
    ///
    /// The agent starts wherever the environment's position currently is.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidDiscount`] unless `0 < gamma <= 1`.
    pub fn new<P: Policy + 'static>(
        env: Environment,
        policy: P,
        gamma: f64,
    ) -> Result<Self, ConfigError> {
        Self::with_shared_policy(env, Arc::new(policy), gamma)
    }

    /// Like [`new`](Self::new), sharing an existing policy.
    pub fn with_shared_policy(
        env: Environment,
        policy: Arc<dyn Policy>,
        gamma: f64,
    ) -> Result<Self, ConfigError> {
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(ConfigError::InvalidDiscount { gamma });
        }
        let current_state = env.position();
        Ok(Self {
            env,
            policy,
            gamma,
            time_step: 0,
            discount: 1.0,
            gain: 0.0,
            recent_reward: 0.0,
            current_state,
            experience: Vec::new(),
        })
    }

    /// Ask the policy for an action and take it.
    ///
    /// # Errors
    ///
    /// [`AgentError::Policy`] if the policy cannot choose, or
    /// [`AgentError::Step`] if the environment rejects the step. Nothing
    /// is recorded on error.
    pub fn step_once<R: Rng>(&mut self, rng: &mut R) -> Result<Experience, AgentError> {
        let action = self.policy.select(self.current_state, rng)?;
        Ok(self.act(action, rng)?)
    }

    /// Take a caller-chosen `action`, with the same bookkeeping as
    /// [`step_once`](Self::step_once).
    pub fn act<R: Rng>(&mut self, action: Action, rng: &mut R) -> Result<Experience, StepError> {
        let (next_state, reward) = self.env.step(action, rng)?;

        let experience = Experience {
            action,
            reward,
            next_state,
        };
        self.experience.push(experience);
        self.current_state = next_state;
        self.recent_reward = reward;
        self.gain += self.discount * reward;
        self.discount *= self.gamma;
        self.time_step += 1;

        Ok(experience)
    }

    /// Take each action in `actions` in order, stopping at the first error.
    pub fn act_all<I, R>(&mut self, actions: I, rng: &mut R) -> Result<(), StepError>
    where
        I: IntoIterator<Item = Action>,
        R: Rng,
    {
        for action in actions {
            self.act(action, rng)?;
        }
        Ok(())
    }

    /// Call [`step_once`](Self::step_once) exactly `n_steps` times.
    ///
    /// For early termination, drive `step_once` directly and check a
    /// stop condition between calls.
    pub fn run<R: Rng>(&mut self, n_steps: usize, rng: &mut R) -> Result<(), AgentError> {
        for _ in 0..n_steps {
            self.step_once(rng)?;
        }
        Ok(())
    }

    /// Zero the time step, gain, and most recent reward. The trace and
    /// the environment position are kept.
    pub fn reset(&mut self) {
        self.time_step = 0;
        self.discount = 1.0;
        self.gain = 0.0;
        self.recent_reward = 0.0;
        tracing::debug!(trace_len = self.experience.len(), "agent reset");
    }

    /// Drop the experience trace.
    pub fn clear_history(&mut self) {
        self.experience.clear();
        tracing::debug!("agent history cleared");
    }

    /// [`reset`](Self::reset) plus [`clear_history`](Self::clear_history).
    pub fn reset_full(&mut self) {
        self.reset();
        self.clear_history();
    }

    /// Return the environment to its starting position and
    /// [`reset`](Self::reset). The trace is kept.
    pub fn restart_episode(&mut self) {
        self.env.reset_position();
        self.current_state = self.env.position();
        self.reset();
    }

    /// Replace the policy.
    pub fn set_policy<P: Policy + 'static>(&mut self, policy: P) {
        self.policy = Arc::new(policy);
    }

    /// Replace the policy with a shared one.
    pub fn set_shared_policy(&mut self, policy: Arc<dyn Policy>) {
        self.policy = policy;
    }

    /// Current state. Always equal to the environment's position.
    pub fn current_state(&self) -> Position {
        self.current_state
    }

    /// Steps taken since construction or the last reset.
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Discounted return since construction or the last reset.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Reward from the most recent step (0.0 after reset).
    pub fn recent_reward(&self) -> f64 {
        self.recent_reward
    }

    /// Discount factor γ.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Every recorded step, oldest first.
    pub fn experience(&self) -> &[Experience] {
        &self.experience
    }

    /// The wrapped environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The active policy.
    pub fn policy(&self) -> &dyn Policy {
        self.policy.as_ref()
    }

    /// Unwrap the environment, discarding the agent.
    pub fn into_environment(self) -> Environment {
        self.env
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("policy", &self.policy.name())
            .field("gamma", &self.gamma)
            .field("time_step", &self.time_step)
            .field("gain", &self.gain)
            .field("current_state", &self.current_state)
            .field("trace_len", &self.experience.len())
            .finish()
    }
}
