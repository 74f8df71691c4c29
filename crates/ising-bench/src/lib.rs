//! Benchmark profiles and utilities for the Ising simulator.
//!
//! Provides pre-built [`SimulationConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 128x128 lattice (16K cells), one sweep per tick
//! - [`stress_profile`]: 512x512 lattice (~262K cells) for stress testing
//! - [`sweeps`]: convert whole-lattice sweeps into a trial count

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ising_engine::SimulationConfig;

/// The exact critical temperature of the square-lattice model, `2 / ln(1 + √2)`.
pub const CRITICAL_TEMPERATURE: f64 = 2.269_185_314_213_022;

/// Trials needed for `n` full sweeps of a `width x height` lattice.
pub fn sweeps(width: usize, height: usize, n: usize) -> usize {
    width * height * n
}

/// Build a reference benchmark profile: 128x128 lattice (16K cells).
///
/// Runs at the critical temperature, one sweep per tick.
pub fn reference_profile(seed: u64) -> SimulationConfig {
    SimulationConfig {
        width: 128,
        height: 128,
        seed,
        temperature: CRITICAL_TEMPERATURE,
        sweeps_per_tick: sweeps(128, 128, 1),
        ..Default::default()
    }
}

/// Build a stress benchmark profile: 512x512 lattice (~262K cells).
///
/// Same temperature and per-site rate as [`reference_profile`] at 16x the
/// cell count, with observables tracked every tick.
pub fn stress_profile(seed: u64) -> SimulationConfig {
    SimulationConfig {
        width: 512,
        height: 512,
        seed,
        temperature: CRITICAL_TEMPERATURE,
        sweeps_per_tick: sweeps(512, 512, 1),
        track_observables: true,
        ..Default::default()
    }
}
