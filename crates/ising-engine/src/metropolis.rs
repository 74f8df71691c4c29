//! Single-spin-flip Metropolis engine.
//!
//! Each trial draws a cell uniformly at random (independent draws, not
//! a permutation: cells may be revisited or skipped within a batch),
//! computes the flip energy delta, draws a fresh uniform, and flips the
//! spin if the acceptance rule says so. Trials run sequentially against
//! one mutable lattice because each depends on the state left by the
//! previous one.
//!
//! # Draw order
//!
//! Every trial consumes exactly three uniforms, in order: `x`, `y`, then
//! the acceptance draw. The acceptance draw is taken even when the flip
//! lowers the energy, so the random stream never depends on outcomes.

use ising_core::{LatticeError, RandomSource};
use ising_lattice::Lattice;

use crate::energy;
use crate::params::Parameters;

/// How a trial's energy delta becomes an acceptance decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AcceptanceRule {
    /// Accept if `u < exp(min(1, -ΔE / T))`.
    ///
    /// The exponent is clamped rather than the probability. For a
    /// uniform `u < 1` this accepts every non-positive `ΔE`, exactly as
    /// the standard rule does, but the reported weight can exceed 1.
    #[default]
    ClampedExponent,
    /// Accept if `u < min(1, exp(-ΔE / T))`.
    Standard,
}

impl AcceptanceRule {
    /// The weight a uniform draw is compared against.
    ///
    /// For [`Standard`](Self::Standard) this is a probability in
    /// `[0, 1]`. For [`ClampedExponent`](Self::ClampedExponent) it lies
    /// in `[0, e]`; values at or above 1 mean certain acceptance.
    #[inline]
    pub fn acceptance_probability(self, delta_e: f64, temperature: f64) -> f64 {
        let exponent = -delta_e / temperature;
        match self {
            Self::ClampedExponent => exponent.min(1.0).exp(),
            Self::Standard => exponent.exp().min(1.0),
        }
    }

    /// Whether the uniform draw `u` accepts a flip with energy change
    /// `delta_e` at `temperature`.
    #[inline]
    pub fn accepts(self, delta_e: f64, temperature: f64, u: f64) -> bool {
        u < self.acceptance_probability(delta_e, temperature)
    }
}

/// When the engine reads the temperature during a batch.
///
/// The batch size is always read once, when the batch starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParameterSampling {
    /// Re-read the temperature before every trial, so a concurrent
    /// update takes effect mid-batch.
    #[default]
    PerTrial,
    /// Read the temperature once at the start of the batch.
    PerTick,
}

/// The result of one trial.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialOutcome {
    /// Column of the proposed flip.
    pub x: usize,
    /// Row of the proposed flip.
    pub y: usize,
    /// Energy change the flip would cause.
    pub delta_e: f64,
    /// Whether the spin was flipped.
    pub accepted: bool,
}

/// Counters for one batch of trials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Trials performed.
    pub trials: usize,
    /// Trials that flipped their spin.
    pub accepted: usize,
}

impl BatchReport {
    /// Fraction of trials accepted; `0.0` for an empty batch.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.trials += other.trials;
        self.accepted += other.accepted;
    }
}

/// Drives batches of Metropolis trials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetropolisEngine {
    rule: AcceptanceRule,
    sampling: ParameterSampling,
}

impl MetropolisEngine {
    /// Create an engine with the given rule and sampling policy.
    pub fn new(rule: AcceptanceRule, sampling: ParameterSampling) -> Self {
        Self { rule, sampling }
    }

    /// The acceptance rule in use.
    pub fn rule(&self) -> AcceptanceRule {
        self.rule
    }

    /// The temperature sampling policy in use.
    pub fn sampling(&self) -> ParameterSampling {
        self.sampling
    }

    /// Run a single trial at `temperature`.
    pub fn trial<R: RandomSource + ?Sized>(
        &self,
        lattice: &mut Lattice,
        temperature: f64,
        rng: &mut R,
    ) -> Result<TrialOutcome, LatticeError> {
        let x = rng.next_index(lattice.width());
        let y = rng.next_index(lattice.height());
        let delta_e = energy::flip_energy_delta(lattice, x, y)?;
        let u = rng.next_unit();
        let accepted = self.rule.accepts(delta_e, temperature, u);
        if accepted {
            lattice.flip(x, y)?;
        }
        Ok(TrialOutcome {
            x,
            y,
            delta_e,
            accepted,
        })
    }

    /// Run one batch of `params.sweeps_per_tick()` trials.
    pub fn run_batch<R: RandomSource + ?Sized>(
        &self,
        lattice: &mut Lattice,
        params: &Parameters,
        rng: &mut R,
    ) -> Result<BatchReport, LatticeError> {
        let trials = params.sweeps_per_tick();
        let batch_temperature = params.temperature();
        let mut report = BatchReport::default();
        for _ in 0..trials {
            let temperature = match self.sampling {
                ParameterSampling::PerTrial => params.temperature(),
                ParameterSampling::PerTick => batch_temperature,
            };
            if self.trial(lattice, temperature, rng)?.accepted {
                report.accepted += 1;
            }
            report.trials += 1;
        }
        Ok(report)
    }
}
