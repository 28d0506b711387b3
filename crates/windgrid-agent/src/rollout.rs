//! Parallel Monte-Carlo rollouts.
//!
//! Each episode gets its own clone of the environment (own position,
//! shared transition model and reward function) and its own generator
//! seeded with `seed ^ index`. Episodes never share mutable state, so no
//! locking is needed and the results are identical to running the same
//! episodes one after another.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use windgrid_core::Position;
use windgrid_env::Environment;

use crate::agent::Agent;
use crate::error::AgentError;
use crate::policy::Policy;

/// Configuration for [`run_rollouts`].
#[derive(Clone, Debug)]
pub struct RolloutConfig {
    /// Number of independent episodes. Default: 16.
    pub episodes: usize,
    /// Maximum steps per episode. Default: 100.
    pub steps: usize,
    /// Base seed; episode `i` uses `seed ^ i`. Default: 0.
    pub seed: u64,
    /// Discount factor. Default: 1.0.
    pub gamma: f64,
    /// End an episode early once the agent stands on the target.
    /// Default: true.
    pub stop_at_target: bool,
    /// Worker thread count. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, episodes]`).
    pub workers: Option<usize>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 16,
            steps: 100,
            seed: 0,
            gamma: 1.0,
            stop_at_target: true,
            workers: None,
        }
    }
}

impl RolloutConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Never more workers than episodes, never fewer than one.
    pub fn resolved_worker_count(&self) -> usize {
        let upper = self.episodes.max(1);
        match self.workers {
            Some(n) => n.clamp(1, upper),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, upper),
        }
    }
}

/// Outcome of one rollout episode.
#[derive(Clone, Debug, PartialEq)]
pub struct RolloutSummary {
    /// Episode index in `0..episodes`.
    pub index: usize,
    /// Discounted return.
    pub gain: f64,
    /// Steps actually taken.
    pub steps: usize,
    /// Where the episode ended.
    pub final_state: Position,
    /// Whether the episode ended on the target.
    pub reached_target: bool,
}

/// Run episode `index` from the environment's starting position.
///
/// `env` is cloned; the caller's environment is not touched.
pub fn run_episode(
    env: &Environment,
    policy: Arc<dyn Policy>,
    config: &RolloutConfig,
    index: usize,
) -> Result<RolloutSummary, AgentError> {
    let mut env = env.clone();
    env.reset_position();
    let mut agent = Agent::with_shared_policy(env, policy, config.gamma)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ index as u64);

    let mut steps = 0;
    while steps < config.steps {
        if config.stop_at_target && agent.environment().at_target() {
            break;
        }
        agent.step_once(&mut rng)?;
        steps += 1;
    }

    let summary = RolloutSummary {
        index,
        gain: agent.gain(),
        steps,
        final_state: agent.current_state(),
        reached_target: agent.environment().at_target(),
    };
    tracing::debug!(
        index,
        steps,
        gain = summary.gain,
        reached_target = summary.reached_target,
        "rollout finished"
    );
    Ok(summary)
}

/// Run `config.episodes` independent episodes across worker threads.
///
/// Results come back sorted by episode index. If any episode fails, the
/// error of the lowest-indexed failing episode is returned.
pub fn run_rollouts(
    env: &Environment,
    policy: Arc<dyn Policy>,
    config: &RolloutConfig,
) -> Result<Vec<RolloutSummary>, AgentError> {
    if config.episodes == 0 {
        return Ok(Vec::new());
    }
    let workers = config.resolved_worker_count();
    let (tx, rx) = crossbeam_channel::unbounded();

    std::thread::scope(|scope| {
        for worker in 0..workers {
            let tx = tx.clone();
            let policy = Arc::clone(&policy);
            scope.spawn(move || {
                for index in (worker..config.episodes).step_by(workers) {
                    let result = run_episode(env, Arc::clone(&policy), config, index);
                    // Receiver outlives the scope; send only fails if it is gone.
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<(usize, Result<RolloutSummary, AgentError>)> = rx.iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FunctionPolicy, RandomPolicy};
    use windgrid_core::Action;
    use windgrid_env::EnvConfig;
    use windgrid_space::Wind;

    fn windy_env() -> Environment {
        let cfg = EnvConfig::new(6, 4)
            .with_wind((2, 0), Wind::new((0, 1), 0.4))
            .with_wind((3, 1), Wind::new((0, 1), 0.6))
            .with_wall((4, 2));
        Environment::new(cfg).unwrap()
    }

    #[test]
    fn worker_count_clamped() {
        let cfg = RolloutConfig {
            episodes: 3,
            workers: Some(10),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 3);
        let cfg = RolloutConfig {
            workers: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let env = windy_env();
        let policy: Arc<dyn Policy> = Arc::new(RandomPolicy);
        let cfg = RolloutConfig {
            episodes: 12,
            steps: 30,
            seed: 99,
            gamma: 0.9,
            workers: Some(4),
            ..Default::default()
        };
        let parallel = run_rollouts(&env, Arc::clone(&policy), &cfg).unwrap();
        let sequential: Vec<RolloutSummary> = (0..cfg.episodes)
            .map(|i| run_episode(&env, Arc::clone(&policy), &cfg, i).unwrap())
            .collect();
        assert_eq!(parallel, sequential);
        for (i, s) in parallel.iter().enumerate() {
            assert_eq!(s.index, i);
        }
    }

    #[test]
    fn caller_environment_untouched() {
        let env = windy_env();
        let cfg = RolloutConfig {
            episodes: 4,
            steps: 10,
            ..Default::default()
        };
        run_rollouts(&env, Arc::new(RandomPolicy), &cfg).unwrap();
        assert_eq!(env.position(), env.initial_position());
    }

    #[test]
    fn stops_at_target() {
        let env = Environment::new(EnvConfig::new(3, 1)).unwrap();
        let policy: Arc<dyn Policy> =
            Arc::new(FunctionPolicy::deterministic("right", |_| Action::Right));
        let cfg = RolloutConfig {
            episodes: 2,
            steps: 10,
            ..Default::default()
        };
        let out = run_rollouts(&env, policy, &cfg).unwrap();
        for s in out {
            assert!(s.reached_target);
            assert_eq!(s.steps, 2);
            assert_eq!(s.gain, -2.0);
            assert_eq!(s.final_state, Position::new(2, 0));
        }
    }

    #[test]
    fn invalid_gamma_reported() {
        let env = windy_env();
        let cfg = RolloutConfig {
            episodes: 2,
            gamma: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            run_rollouts(&env, Arc::new(RandomPolicy), &cfg),
            Err(AgentError::Config(_))
        ));
    }

    #[test]
    fn zero_episodes_is_empty() {
        let cfg = RolloutConfig {
            episodes: 0,
            ..Default::default()
        };
        assert!(run_rollouts(&windy_env(), Arc::new(RandomPolicy), &cfg)
            .unwrap()
            .is_empty());
    }
}
