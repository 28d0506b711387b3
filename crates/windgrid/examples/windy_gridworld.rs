//! Windy gridworld walkthrough.
//!
//! Demonstrates: build config → Environment → inspect transitions → drive
//! an Agent → parallel Monte-Carlo rollouts.
//!
//! Set `RUST_LOG=windgrid_env=trace` to see every step.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use windgrid::prelude::*;

fn draw(view: &RenderView<'_>) -> String {
    let (width, height) = view.grid_size;
    let mut out = String::new();
    for y in (0..height as i32).rev() {
        for x in 0..width as i32 {
            let cell = Position::new(x, y);
            let glyph = if cell == view.agent_position {
                '@'
            } else if cell == view.target_position {
                'G'
            } else if view.walls.contains(&cell) {
                '#'
            } else if view.winds.contains_key(&cell) {
                '~'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Windgrid Example ===\n");

    let mut config = EnvConfig::new(10, 7)
        .with_agent((0, 3))
        .with_target((7, 3))
        .with_walls([(5, 0), (5, 1)]);
    for (x, strength) in [(3, 0.3), (4, 0.3), (5, 0.3), (6, 0.6), (7, 0.6), (8, 0.3)] {
        for y in 0..7 {
            config = config.with_wind((x, y), Wind::new((0, 1), strength));
        }
    }
    let env = Environment::new(config).unwrap();

    println!("{}", draw(&env.render_view()));
    println!(
        "{} states, {} transition entries\n",
        env.state_space().len(),
        env.model().len()
    );

    // --- Transition inspection ---
    let from = Position::new(6, 3);
    println!("P(· | {from}, {})", Action::Right);
    for (next, p) in env.transition(from, Action::Right).unwrap().iter() {
        println!("  {next}: {p:.2}");
    }
    println!();

    // --- One episode with a hand-written policy ---
    let target = env.target_position();
    let greedy = FunctionPolicy::deterministic("toward_target", move |s: Position| {
        let dx = (target.x - s.x).signum();
        let dy = (target.y - s.y).signum();
        Action::try_from((dx, dy)).unwrap_or(Action::RIGHT)
    });
    let mut agent = Agent::new(env.clone(), greedy, 0.99).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    while !agent.environment().at_target() && agent.time_step() < 50 {
        agent.step_once(&mut rng).unwrap();
    }
    let path: String = agent
        .experience()
        .iter()
        .map(|e| e.action.glyph())
        .collect();
    println!("Greedy episode: {path}");
    println!(
        "  {} steps, gain {:.3}, ended at {}\n",
        agent.time_step(),
        agent.gain(),
        agent.current_state()
    );
    println!("{}", draw(&agent.environment().render_view()));

    // --- Parallel rollouts with a random policy ---
    let rollouts = RolloutConfig {
        episodes: 64,
        steps: 200,
        seed: 42,
        gamma: 0.99,
        ..Default::default()
    };
    let summaries = run_rollouts(&env, Arc::new(RandomPolicy), &rollouts).unwrap();
    let reached = summaries.iter().filter(|s| s.reached_target).count();
    let mean_gain = summaries.iter().map(|s| s.gain).sum::<f64>() / summaries.len() as f64;
    println!(
        "Random policy: {reached}/{} episodes reached the target, mean gain {mean_gain:.3}",
        summaries.len()
    );
}
