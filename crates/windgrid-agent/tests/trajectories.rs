//! End-to-end agent trajectories over real environments.

use std::sync::Arc;

use windgrid_agent::{run_rollouts, Agent, Policy, RandomPolicy, RolloutConfig, TablePolicy};
use windgrid_core::{Action, Position};
use windgrid_env::Environment;
use windgrid_test_utils::{cliff_corridor, open_grid, seeded_rng, windy_column, ScriptedPolicy};

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

#[test]
fn two_by_two_right_then_up() {
    let env = open_grid(2, 2);
    assert_eq!(env.target_position(), p(1, 1));
    let script = Arc::new(ScriptedPolicy::new([Action::RIGHT, Action::UP]));
    let shared: Arc<dyn Policy> = script.clone();
    let mut agent = Agent::with_shared_policy(env, shared, 1.0).unwrap();
    let mut rng = seeded_rng(0);
    agent.run(2, &mut rng).unwrap();
    assert_eq!(script.calls(), 2);

    let states: Vec<Position> = agent.experience().iter().map(|e| e.next_state).collect();
    let rewards: Vec<f64> = agent.experience().iter().map(|e| e.reward).collect();
    assert_eq!(states, vec![p(1, 0), p(1, 1)]);
    assert_eq!(rewards, vec![-1.0, -1.0]);
    assert_eq!(agent.gain(), -2.0);
    assert!(agent.environment().at_target());
}

#[test]
fn discounted_gain_matches_definition() {
    for (gamma, expected) in [(1.0, -3.0), (0.5, -1.75)] {
        let policy = ScriptedPolicy::new([Action::Right]);
        let mut agent = Agent::new(open_grid(4, 4), policy, gamma).unwrap();
        agent.run(3, &mut seeded_rng(1)).unwrap();
        assert!((agent.gain() - expected).abs() < 1e-12, "gamma {gamma}");
    }
}

#[test]
fn trace_length_and_final_state() {
    let env = Environment::new(windy_column(0.5)).unwrap();
    let mut agent = Agent::new(env, RandomPolicy, 0.99).unwrap();
    let mut rng = seeded_rng(8);
    for n in [1usize, 5, 20] {
        agent.run(n, &mut rng).unwrap();
    }
    assert_eq!(agent.experience().len(), 26);
    assert_eq!(
        agent.experience().last().map(|e| e.next_state),
        Some(agent.current_state())
    );
    assert_eq!(agent.current_state(), agent.environment().position());
    for e in agent.experience() {
        assert!(agent.environment().is_allowed(e.next_state));
    }
}

#[test]
fn corridor_detour_collects_bonus() {
    let env = Environment::new(cliff_corridor()).unwrap();
    let route = [
        Action::Right,
        Action::Right,
        Action::Right,
        Action::Right,
        Action::Up,
        Action::Up,
        Action::Left,
        Action::Left,
        Action::Left,
        Action::Left,
    ];
    let mut agent = Agent::new(env, RandomPolicy, 1.0).unwrap();
    agent.act_all(route, &mut seeded_rng(0)).unwrap();
    assert!(agent.environment().at_target());
    // Nine step costs, then the bonus for entering the target.
    assert_eq!(agent.gain(), -9.0 + 10.0);
}

#[test]
fn uniform_table_policy_never_leaves_space() {
    let env = Environment::new(cliff_corridor()).unwrap();
    let table = TablePolicy::uniform(env.state_space());
    let mut agent = Agent::new(env, table, 1.0).unwrap();
    agent.run(200, &mut seeded_rng(3)).unwrap();
    assert_eq!(agent.experience().len(), 200);
}

#[test]
fn rollouts_share_one_model() {
    let env = Environment::new(windy_column(0.4)).unwrap();
    let model = env.shared_model();
    let policy: Arc<dyn Policy> = Arc::new(RandomPolicy);
    let cfg = RolloutConfig {
        episodes: 8,
        steps: 60,
        seed: 5,
        gamma: 0.9,
        workers: Some(3),
        ..Default::default()
    };
    let first = run_rollouts(&env, Arc::clone(&policy), &cfg).unwrap();
    let second = run_rollouts(&env, policy, &cfg).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    for s in &first {
        assert!(s.steps <= 60);
        assert_eq!(s.reached_target, s.final_state == env.target_position());
    }
    // Only the caller's handle and the environment's own remain.
    assert_eq!(Arc::strong_count(&model), 2);
}
