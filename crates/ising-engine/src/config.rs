//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the builder-input for a [`Simulation`](crate::Simulation).
//! [`validate()`](SimulationConfig::validate) checks every field before
//! any state is allocated.

use std::error::Error;
use std::fmt;

use ising_core::{LatticeError, ParameterError};

use crate::metropolis::{AcceptanceRule, ParameterSampling};
use crate::params::clamp_temperature;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building or tearing down a simulation.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The lattice dimensions are unusable.
    Lattice(LatticeError),
    /// The initial temperature is NaN or `+∞`.
    InvalidTemperature {
        /// The invalid value.
        value: f64,
    },
    /// The sweep rate is zero or cannot be truncated to a trial count.
    InvalidSweepRate {
        /// The invalid value, as requested.
        value: f64,
    },
    /// The realtime frame buffer capacity is zero.
    FrameBufferZero,
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
    /// Simulation could not be recovered from the tick thread (e.g. thread panicked).
    EngineRecoveryFailed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice: {e}"),
            Self::InvalidTemperature { value } => {
                write!(f, "temperature must not be NaN or +inf, got {value}")
            }
            Self::InvalidSweepRate { value } => {
                write!(f, "sweep rate must be a whole count from 1 to usize::MAX, got {value}")
            }
            Self::FrameBufferZero => write!(f, "frame_buffer must be at least 1"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
            Self::EngineRecoveryFailed => {
                write!(f, "simulation could not be recovered from tick thread")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for ConfigError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<ParameterError> for ConfigError {
    fn from(e: ParameterError) -> Self {
        match e {
            ParameterError::InvalidParameter {
                name: "sweep_rate",
                value,
            } => Self::InvalidSweepRate { value },
            ParameterError::InvalidParameter { value, .. } => Self::InvalidTemperature { value },
        }
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Complete configuration for a simulation session.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Lattice columns. Default: 128.
    pub width: usize,
    /// Lattice rows. Default: 128.
    pub height: usize,
    /// Seed for the initial randomization and all trials. Default: 0.
    pub seed: u64,
    /// Initial temperature, clamped to the floor on construction. Default: 2.269.
    pub temperature: f64,
    /// Initial number of trials per tick. Default: 10 000.
    pub sweeps_per_tick: usize,
    /// Acceptance rule. Default: clamped exponent.
    pub acceptance: AcceptanceRule,
    /// When temperature is read during a batch. Default: per trial.
    pub sampling: ParameterSampling,
    /// Measure observables after every tick. Default: false.
    pub track_observables: bool,
    /// Capacity of the realtime frame channel. Default: 4.
    pub frame_buffer: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            seed: 0,
            temperature: 2.269,
            sweeps_per_tick: 10_000,
            acceptance: AcceptanceRule::default(),
            sampling: ParameterSampling::default(),
            track_observables: false,
            frame_buffer: 4,
        }
    }
}

impl SimulationConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Lattice dimensions.
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Lattice(LatticeError::EmptyLattice));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::Lattice(LatticeError::DimensionTooLarge {
                width: self.width,
                height: self.height,
            }));
        }
        // 2. Parameters.
        if clamp_temperature(self.temperature).is_err() {
            return Err(ConfigError::InvalidTemperature {
                value: self.temperature,
            });
        }
        if self.sweeps_per_tick == 0 {
            return Err(ConfigError::InvalidSweepRate { value: 0.0 });
        }
        // 3. Realtime frame channel.
        if self.frame_buffer == 0 {
            return Err(ConfigError::FrameBufferZero);
        }
        Ok(())
    }
}
