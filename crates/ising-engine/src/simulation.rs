//! Lockstep (synchronous) simulation session.
//!
//! [`Simulation`] owns the lattice, the shared parameters, the engine and
//! the random source. Each call to [`tick()`](Simulation::tick) runs one
//! Metropolis batch and then hands the lattice to a renderer.
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`, so a second tick cannot start
//! while one is in progress and a renderer never observes a lattice
//! mid-batch. There is no internal timer: an external tick source
//! decides when the next tick runs.

use std::time::Instant;

use ising_core::{RandomSource, Renderer, StepError, TickId};
use ising_lattice::Lattice;

use crate::config::{ConfigError, SimulationConfig};
use crate::metrics::TickMetrics;
use crate::metropolis::{BatchReport, MetropolisEngine};
use crate::observables::{ObservableStats, Observables};
use crate::params::ParameterHandle;
use crate::rng::ChaChaSource;

// Compile-time assertion: the default Simulation can move to a tick thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── TickReport ──────────────────────────────────────────────────

/// Result of a successful tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Identifier of the tick just completed (the first tick is 1).
    pub tick_id: TickId,
    /// Trial counters for this tick's batch.
    pub batch: BatchReport,
    /// Timing for this tick.
    pub metrics: TickMetrics,
    /// Observables after the batch, when tracking is enabled.
    pub observables: Option<Observables>,
}

// ── Simulation ──────────────────────────────────────────────────

/// A single-threaded Ising simulation session.
///
/// # Example
///
/// ```
/// use ising_engine::{AsciiRenderer, Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     width: 8,
///     height: 8,
///     seed: 42,
///     sweeps_per_tick: 64,
///     ..Default::default()
/// };
/// let mut sim = Simulation::new(config).unwrap();
/// let mut renderer = AsciiRenderer::default();
///
/// let report = sim.tick(&mut renderer).unwrap();
/// assert_eq!(report.batch.trials, 64);
/// assert_eq!(renderer.frame().lines().count(), 8);
///
/// // Input collaborators write through a cloned handle.
/// let params = sim.parameters().clone();
/// params.set_temperature(1.5).unwrap();
/// ```
#[derive(Debug)]
pub struct Simulation<R: RandomSource = ChaChaSource> {
    config: SimulationConfig,
    lattice: Lattice,
    params: ParameterHandle,
    engine: MetropolisEngine,
    rng: R,
    tick_id: TickId,
    last_metrics: TickMetrics,
    stats: ObservableStats,
}

impl Simulation {
    /// Create a session seeded from `config.seed`.
    ///
    /// Validates the configuration, then randomizes the lattice from the
    /// seeded ChaCha8 source. The same source drives every later trial.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let rng = ChaChaSource::seeded(config.seed);
        Self::with_source(config, rng)
    }

    /// Re-randomize the lattice from a fresh `seed`.
    ///
    /// Resets the tick counter, metrics and accumulated observables.
    /// Current parameter values are kept. After `reset(s)` the session
    /// behaves exactly like one created with `seed: s`.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.reset_with(ChaChaSource::seeded(seed));
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Create a session that draws from `rng`.
    ///
    /// `config.seed` is kept for reference but not used.
    pub fn with_source(config: SimulationConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let lattice = Lattice::random(config.width, config.height, &mut rng)?;
        let params = ParameterHandle::new(config.temperature, config.sweeps_per_tick)?;
        let engine = MetropolisEngine::new(config.acceptance, config.sampling);
        Ok(Self {
            config,
            lattice,
            params,
            engine,
            rng,
            tick_id: TickId::default(),
            last_metrics: TickMetrics::default(),
            stats: ObservableStats::new(),
        })
    }

    /// Replace the random source and re-randomize the lattice from it.
    pub fn reset_with(&mut self, rng: R) {
        self.rng = rng;
        self.lattice.randomize(&mut self.rng);
        self.tick_id = TickId::default();
        self.last_metrics = TickMetrics::default();
        self.stats.clear();
    }

    /// Run one batch without rendering.
    pub fn step(&mut self) -> Result<TickReport, StepError> {
        let start = Instant::now();
        let mut report = self.advance()?;
        report.metrics.total_us = start.elapsed().as_micros() as u64;
        self.last_metrics = report.metrics;
        Ok(report)
    }

    /// Run one batch, then render the resulting lattice.
    ///
    /// On error the tick counter is not advanced and the renderer is not
    /// called; trials applied before the failure stay applied.
    pub fn tick<T: Renderer + ?Sized>(
        &mut self,
        renderer: &mut T,
    ) -> Result<TickReport, StepError> {
        let start = Instant::now();
        let mut report = self.advance()?;

        let render_start = Instant::now();
        renderer.render(report.tick_id, &self.lattice);
        report.metrics.render_us = render_start.elapsed().as_micros() as u64;
        report.metrics.total_us = start.elapsed().as_micros() as u64;

        self.last_metrics = report.metrics;
        Ok(report)
    }

    /// Run `ticks` ticks back to back, rendering after each.
    ///
    /// Returns the trial counters summed over all ticks.
    pub fn run<T: Renderer + ?Sized>(
        &mut self,
        ticks: usize,
        renderer: &mut T,
    ) -> Result<BatchReport, StepError> {
        let mut total = BatchReport::default();
        for _ in 0..ticks {
            total.merge(self.tick(renderer)?.batch);
        }
        Ok(total)
    }

    fn advance(&mut self) -> Result<TickReport, StepError> {
        let batch_start = Instant::now();
        let batch = self
            .engine
            .run_batch(&mut self.lattice, &self.params, &mut self.rng)?;
        let batch_us = batch_start.elapsed().as_micros() as u64;

        self.tick_id = self.tick_id.next();
        let observables = if self.config.track_observables {
            let obs = Observables::measure(&self.lattice);
            self.stats.record(&obs);
            Some(obs)
        } else {
            None
        };

        Ok(TickReport {
            tick_id: self.tick_id,
            batch,
            metrics: TickMetrics {
                batch_us,
                trials: batch.trials,
                accepted: batch.accepted,
                ..Default::default()
            },
            observables,
        })
    }

    /// The live lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The shared parameter handle. Clone it to hand to an input thread.
    pub fn parameters(&self) -> &ParameterHandle {
        &self.params
    }

    /// Number of ticks completed since creation or the last reset.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The engine driving the trials.
    pub fn engine(&self) -> &MetropolisEngine {
        &self.engine
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Observables accumulated since creation or the last reset.
    ///
    /// Empty unless `track_observables` is set.
    pub fn stats(&self) -> &ObservableStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::lattice_hash;
    use crate::metropolis::{AcceptanceRule, ParameterSampling};
    use crate::render::NullRenderer;
    use ising_core::Spin;
    use ising_test_utils::{RecordingRenderer, ScriptedSource};

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            width: 8,
            height: 8,
            seed: 7,
            sweeps_per_tick: 100,
            ..Default::default()
        }
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = SimulationConfig {
            height: 0,
            ..small_config()
        };
        assert!(Simulation::new(cfg).is_err());
    }

    #[test]
    fn new_clamps_negative_temperature() {
        let cfg = SimulationConfig {
            temperature: -1.0,
            ..small_config()
        };
        let sim = Simulation::new(cfg).unwrap();
        assert!(sim.parameters().temperature() > 0.0);
    }

    #[test]
    fn scripted_source_sets_initial_lattice() {
        // Draws alternate below/above one half: row-major down, up, down, ...
        let rng = ScriptedSource::new(vec![0.1, 0.9]);
        let cfg = SimulationConfig {
            width: 2,
            height: 2,
            ..small_config()
        };
        let sim = Simulation::with_source(cfg, rng).unwrap();
        let spins = sim.lattice().as_slice();
        assert_eq!(spins, &[Spin::Down, Spin::Up, Spin::Down, Spin::Up]);
        assert_eq!(sim.tick_id(), TickId(0));
    }

    #[test]
    fn engine_follows_config() {
        let cfg = SimulationConfig {
            acceptance: AcceptanceRule::Standard,
            sampling: ParameterSampling::PerTick,
            ..small_config()
        };
        let sim = Simulation::new(cfg).unwrap();
        assert_eq!(sim.engine().rule(), AcceptanceRule::Standard);
        assert_eq!(sim.engine().sampling(), ParameterSampling::PerTick);
        let sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.engine().rule(), AcceptanceRule::ClampedExponent);
        assert_eq!(sim.engine().sampling(), ParameterSampling::PerTrial);
    }

    // ── Ticking ─────────────────────────────────────────────────

    #[test]
    fn tick_renders_after_batch() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        let report = sim.tick(&mut renderer).unwrap();
        assert_eq!(report.tick_id, TickId(1));
        assert_eq!(report.batch.trials, 100);
        assert_eq!(report.metrics.trials, 100);
        let frame = renderer.last().unwrap();
        assert_eq!(frame.tick, TickId(1));
        assert_eq!(frame.spins.as_slice(), sim.lattice().as_slice());
        assert_eq!((frame.width, frame.height), (8, 8));
    }

    #[test]
    fn step_does_not_render_but_advances() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.tick_id(), TickId(2));
        assert_eq!(sim.last_metrics().render_us, 0);
    }

    #[test]
    fn run_aggregates_batches() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        let total = sim.run(5, &mut renderer).unwrap();
        assert_eq!(total.trials, 500);
        assert_eq!(renderer.frames().len(), 5);
        assert_eq!(sim.tick_id(), TickId(5));
    }

    #[test]
    fn dyn_renderer_accepted() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let mut renderer: Box<dyn Renderer> = Box::new(NullRenderer);
        sim.tick(renderer.as_mut()).unwrap();
    }

    #[test]
    fn sweep_rate_update_applies_next_tick() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let handle = sim.parameters().clone();
        handle.set_sweep_rate(17.9).unwrap();
        assert_eq!(sim.step().unwrap().batch.trials, 17);
    }

    #[test]
    fn observables_tracked_when_enabled() {
        let cfg = SimulationConfig {
            track_observables: true,
            ..small_config()
        };
        let mut sim = Simulation::new(cfg).unwrap();
        let report = sim.step().unwrap();
        let obs = report.observables.unwrap();
        assert!((-1.0..=1.0).contains(&obs.magnetization));
        sim.step().unwrap();
        assert_eq!(sim.stats().count(), 2);
    }

    #[test]
    fn observables_absent_by_default() {
        let mut sim = Simulation::new(small_config()).unwrap();
        assert!(sim.step().unwrap().observables.is_none());
        assert_eq!(sim.stats().count(), 0);
    }

    // ── Reset ───────────────────────────────────────────────────

    #[test]
    fn reset_matches_fresh_session() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.run(3, &mut NullRenderer).unwrap();
        sim.reset(99);
        let fresh = Simulation::new(SimulationConfig {
            seed: 99,
            ..small_config()
        })
        .unwrap();
        assert_eq!(sim.tick_id(), TickId(0));
        assert_eq!(sim.config().seed, 99);
        assert_eq!(lattice_hash(sim.lattice()), lattice_hash(fresh.lattice()));

        let a = sim.step().unwrap();
        let mut fresh = fresh;
        let b = fresh.step().unwrap();
        assert_eq!(a.batch, b.batch);
        assert_eq!(sim.lattice(), fresh.lattice());
    }

    #[test]
    fn reset_keeps_parameters() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.parameters().set_temperature(0.5).unwrap();
        sim.reset(1);
        assert_eq!(sim.parameters().temperature(), 0.5);
    }
}
