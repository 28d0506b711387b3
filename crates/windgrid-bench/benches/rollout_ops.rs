//! Criterion benchmarks for agent stepping and parallel rollouts.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use windgrid_agent::{run_rollouts, Agent, Policy, RandomPolicy, RolloutConfig, TablePolicy};
use windgrid_bench::reference_profile;
use windgrid_env::Environment;
use windgrid_test_utils::seeded_rng;

/// Benchmark: 1K agent steps under a random policy.
fn bench_agent_run_1k(c: &mut Criterion) {
    let env = Environment::new(reference_profile(42)).unwrap();

    c.bench_function("agent_run_random_1k", |b| {
        b.iter(|| {
            let mut agent = Agent::new(env.clone(), RandomPolicy, 0.99).unwrap();
            agent.run(1_000, &mut seeded_rng(1)).unwrap();
            black_box(agent.gain());
        });
    });
}

/// Benchmark: 1K agent steps under a uniform table policy.
fn bench_agent_table_1k(c: &mut Criterion) {
    let env = Environment::new(reference_profile(42)).unwrap();
    let policy: Arc<dyn Policy> = Arc::new(TablePolicy::uniform(env.state_space()));

    c.bench_function("agent_run_table_1k", |b| {
        b.iter(|| {
            let mut agent =
                Agent::with_shared_policy(env.clone(), Arc::clone(&policy), 0.99).unwrap();
            agent.run(1_000, &mut seeded_rng(1)).unwrap();
            black_box(agent.gain());
        });
    });
}

/// Benchmark: 64 episodes of 500 steps, single worker vs auto-detected.
fn bench_rollouts(c: &mut Criterion) {
    let env = Environment::new(reference_profile(42)).unwrap();
    let policy: Arc<dyn Policy> = Arc::new(RandomPolicy);

    let mut group = c.benchmark_group("rollouts_64x500");
    group.sample_size(10);
    for (label, workers) in [("sequential", Some(1)), ("parallel", None)] {
        let cfg = RolloutConfig {
            episodes: 64,
            steps: 500,
            seed: 7,
            gamma: 0.99,
            stop_at_target: false,
            workers,
        };
        group.bench_function(label, |b| {
            b.iter(|| {
                let summaries = run_rollouts(&env, Arc::clone(&policy), &cfg).unwrap();
                black_box(summaries);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_agent_run_1k,
    bench_agent_table_1k,
    bench_rollouts
);
criterion_main!(benches);
