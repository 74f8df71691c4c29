//! Temperature and sweep-rate parameters shared with input collaborators.
//!
//! [`Parameters`] stores both values in atomics so an input thread can
//! write while the engine reads, without locks. There is no transactional
//! guarantee across the pair: a reader may see a new temperature with
//! an old sweep rate, but never a torn individual value.

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use ising_core::ParameterError;

/// Smallest temperature the engine will ever divide by.
pub const TEMPERATURE_FLOOR: f64 = 1e-11;

/// Clamp a requested temperature onto `[TEMPERATURE_FLOOR, ∞)`.
///
/// NaN and `+∞` are rejected. Anything else, including negative values
/// and `-∞`, is raised to the floor.
pub fn clamp_temperature(value: f64) -> Result<f64, ParameterError> {
    let clamped = value.max(TEMPERATURE_FLOOR);
    if value.is_nan() || !clamped.is_finite() {
        return Err(ParameterError::InvalidParameter {
            name: "temperature",
            value,
        });
    }
    Ok(clamped)
}

/// Truncate a requested sweep rate to a whole number of trials.
///
/// The truncated value must be at least 1 and must fit in a `usize`;
/// non-finite input is rejected.
pub fn truncate_sweep_rate(value: f64) -> Result<usize, ParameterError> {
    let truncated = value.trunc();
    // `usize::MAX as f64` rounds up to the next power of two, so `>=`
    // rejects exactly the values a cast would saturate.
    if !value.is_finite() || truncated < 1.0 || truncated >= usize::MAX as f64 {
        return Err(ParameterError::InvalidParameter {
            name: "sweep_rate",
            value,
        });
    }
    Ok(truncated as usize)
}

/// Current simulation parameters.
#[derive(Debug)]
pub struct Parameters {
    temperature_bits: AtomicU64,
    sweeps_per_tick: AtomicUsize,
}

impl Parameters {
    /// Create parameters, applying the same rules as the setters.
    pub fn new(temperature: f64, sweeps_per_tick: usize) -> Result<Self, ParameterError> {
        let temperature = clamp_temperature(temperature)?;
        if sweeps_per_tick == 0 {
            return Err(ParameterError::InvalidParameter {
                name: "sweep_rate",
                value: 0.0,
            });
        }
        Ok(Self {
            temperature_bits: AtomicU64::new(temperature.to_bits()),
            sweeps_per_tick: AtomicUsize::new(sweeps_per_tick),
        })
    }

    /// The current temperature; always `>= TEMPERATURE_FLOOR`.
    #[inline]
    pub fn temperature(&self) -> f64 {
        f64::from_bits(self.temperature_bits.load(Ordering::Relaxed))
    }

    /// The current number of single-spin trials per tick; always `>= 1`.
    #[inline]
    pub fn sweeps_per_tick(&self) -> usize {
        self.sweeps_per_tick.load(Ordering::Relaxed)
    }

    /// Store a new temperature, clamped to [`TEMPERATURE_FLOOR`].
    ///
    /// Returns the stored value. On error the previous value is kept.
    pub fn set_temperature(&self, value: f64) -> Result<f64, ParameterError> {
        let clamped = clamp_temperature(value)?;
        self.temperature_bits
            .store(clamped.to_bits(), Ordering::Relaxed);
        Ok(clamped)
    }

    /// Store a new sweep rate, truncated to an integer `>= 1`.
    ///
    /// Returns the stored value. On error the previous value is kept.
    pub fn set_sweep_rate(&self, value: f64) -> Result<usize, ParameterError> {
        let sweeps = truncate_sweep_rate(value)?;
        self.sweeps_per_tick.store(sweeps, Ordering::Relaxed);
        Ok(sweeps)
    }
}

/// Cloneable shared handle to [`Parameters`].
///
/// The simulation keeps one handle; input collaborators get clones
/// and write through [`Parameters::set_temperature`] and
/// [`Parameters::set_sweep_rate`].
#[derive(Clone, Debug)]
pub struct ParameterHandle {
    inner: Arc<Parameters>,
}

impl ParameterHandle {
    /// Wrap freshly constructed parameters.
    pub fn new(temperature: f64, sweeps_per_tick: usize) -> Result<Self, ParameterError> {
        Ok(Self {
            inner: Arc::new(Parameters::new(temperature, sweeps_per_tick)?),
        })
    }
}

impl Deref for ParameterHandle {
    type Target = Parameters;

    fn deref(&self) -> &Parameters {
        &self.inner
    }
}
