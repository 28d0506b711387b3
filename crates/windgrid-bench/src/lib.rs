//! Benchmark profiles for the Windgrid workspace.
//!
//! Provides pre-built [`EnvConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 50x50 grid (2.5K cells) with wind bands and wall strips
//! - [`stress_profile`]: 300x300 grid (90K cells), same layout scaled up
//! - [`wind_bands`]: deterministic wind placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use windgrid_env::EnvConfig;
use windgrid_space::Wind;

/// Build a reference benchmark profile: 50x50 grid (2.5K cells).
///
/// Agent starts bottom-left, target top-right. Every fifth column
/// carries an upward wind band; every tenth row has a wall strip with a
/// gap at the right edge.
pub fn reference_profile(seed: u64) -> EnvConfig {
    layout(50, 50, seed)
}

/// Build a stress benchmark profile: 300x300 grid (90K cells).
///
/// Same layout as [`reference_profile`] at 36x the cell count.
pub fn stress_profile(seed: u64) -> EnvConfig {
    layout(300, 300, seed)
}

fn layout(width: u32, height: u32, seed: u64) -> EnvConfig {
    let (w, h) = (width as i32, height as i32);
    let mut cfg = EnvConfig::new(width, height);

    for y in (10..h).step_by(10) {
        cfg = cfg.with_walls((0..w - 1).map(|x| (x, y)));
    }
    for (x, strength) in wind_bands(width, seed) {
        for y in 0..h {
            cfg = cfg.with_wind((x, y), Wind::new((0, 1), strength));
        }
    }
    cfg
}

/// Generate deterministic wind bands.
///
/// One band per five columns, starting at column 2. Strengths lie in
/// `[0.1, 0.9]` and derive from a simple hash of the seed and column.
/// Returns `(column, strength)` pairs.
pub fn wind_bands(width: u32, seed: u64) -> Vec<(i32, f64)> {
    (2..width as i32)
        .step_by(5)
        .map(|x| {
            let h = seed
                .wrapping_add(x as u64)
                .wrapping_mul(6364136223846793007)
                .wrapping_add(1442695040888963407);
            let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
            (x, 0.1 + 0.8 * unit)
        })
        .collect()
}
