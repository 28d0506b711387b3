//! Reusable environment configurations.
//!
//! - [`open_grid`]: no walls, no wind
//! - [`windy_column`]: upward wind through the middle columns
//! - [`cliff_corridor`]: a wall row with a single gap and a goal bonus

use windgrid_core::Position;
use windgrid_env::{reward, EnvConfig, Environment};
use windgrid_space::Wind;

/// An open `width × height` grid, agent at the origin, default reward.
pub fn open_grid(width: u32, height: u32) -> Environment {
    Environment::new(EnvConfig::new(width, height)).expect("open grid config is valid")
}

/// A 7×5 grid with upward wind of the given strength on columns 2..=4.
///
/// Agent starts at `(0, 2)`, target at `(6, 2)`.
pub fn windy_column(strength: f64) -> EnvConfig {
    let mut cfg = EnvConfig::new(7, 5).with_agent((0, 2)).with_target((6, 2));
    for x in 2..=4 {
        for y in 0..5 {
            cfg = cfg.with_wind((x, y), Wind::new((0, 1), strength));
        }
    }
    cfg
}

/// A 5×3 grid with walls along `y = 1` except a gap at `x = 4`.
///
/// Reaching the target at `(0, 2)` from `(0, 0)` requires detouring
/// through the gap. A move aimed at the target pays +10, every other
/// step costs −1.
pub fn cliff_corridor() -> EnvConfig {
    let target = Position::new(0, 2);
    EnvConfig::new(5, 3)
        .with_walls((0..4).map(|x| (x, 1)))
        .with_agent((0, 0))
        .with_target(target)
        .with_reward(reward::from_fn(move |action, state| {
            if state + action.offset() == target {
                10.0
            } else {
                reward::STEP_COST
            }
        }))
}
