//! Threaded simulation driver for externally paced ticks.
//!
//! [`RealtimeSimulation`] moves a [`Simulation`] onto a dedicated tick
//! thread. The tick source calls [`tick()`](RealtimeSimulation::tick)
//! from any pace it likes (a display refresh, a timer, a key press); the
//! thread runs one batch per signal and publishes an owned [`Frame`] for
//! the rendering side.
//!
//! # Single flight
//!
//! The tick channel holds at most one signal. While a batch runs, one
//! further tick may wait behind it; any more are refused with
//! [`SubmitError::TickPending`] rather than queued, so a slow batch never
//! builds a backlog.
//!
//! # Frames
//!
//! Frames travel over a bounded channel of `frame_buffer` slots. When the
//! consumer falls behind, new frames are dropped and counted rather than
//! blocking the tick thread.
//!
//! # Shutdown
//!
//! [`shutdown()`](RealtimeSimulation::shutdown) closes the tick channel,
//! lets the thread finish any queued tick, joins it and hands back the
//! `Simulation`. Dropping the driver does the same and discards it.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};

use ising_core::{LatticeError, LatticeView, RandomSource, Renderer, Spin, TickId};
use ising_lattice::Lattice;

use crate::config::{ConfigError, SimulationConfig};
use crate::params::ParameterHandle;
use crate::rng::ChaChaSource;
use crate::simulation::{Simulation, TickReport};

// ── SubmitError ─────────────────────────────────────────────────

/// Why a tick signal was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// A tick is already waiting to run.
    TickPending,
    /// The tick thread has stopped.
    Shutdown,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickPending => write!(f, "a tick is already pending"),
            Self::Shutdown => write!(f, "tick thread has shut down"),
        }
    }
}

impl Error for SubmitError {}

// ── Frame ───────────────────────────────────────────────────────

/// An owned copy of the lattice taken right after a tick.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The tick that produced this state.
    pub tick_id: TickId,
    /// Lattice state after the tick's batch.
    pub lattice: Lattice,
    /// The tick's report.
    pub report: TickReport,
}

impl LatticeView for Frame {
    fn width(&self) -> usize {
        self.lattice.width()
    }

    fn height(&self) -> usize {
        self.lattice.height()
    }

    fn spin(&self, x: usize, y: usize) -> Result<Spin, LatticeError> {
        self.lattice.get(x, y)
    }

    fn spins(&self) -> &[Spin] {
        self.lattice.as_slice()
    }
}

// ── RealtimeSimulation ──────────────────────────────────────────

/// A [`Simulation`] running on its own tick thread.
pub struct RealtimeSimulation<R: RandomSource + Send + 'static = ChaChaSource> {
    tick_tx: Option<Sender<()>>,
    frame_rx: Receiver<Frame>,
    params: ParameterHandle,
    dropped_frames: Arc<AtomicU64>,
    latest: Option<Frame>,
    tick_thread: Option<JoinHandle<Simulation<R>>>,
}

impl RealtimeSimulation {
    /// Build a seeded [`Simulation`] from `config` and spawn it.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::spawn(Simulation::new(config)?)
    }
}

impl<R: RandomSource + Send + 'static> RealtimeSimulation<R> {
    /// Move `sim` onto a new tick thread.
    pub fn spawn(mut sim: Simulation<R>) -> Result<Self, ConfigError> {
        let frame_buffer = sim.config().frame_buffer;
        let params = sim.parameters().clone();

        // Tick channel: bounded(1) so at most one tick waits.
        let (tick_tx, tick_rx) = crossbeam_channel::bounded::<()>(1);
        let (frame_tx, frame_rx) = crossbeam_channel::bounded(frame_buffer);
        let dropped_frames = Arc::new(AtomicU64::new(0));

        let thread_dropped = Arc::clone(&dropped_frames);
        let tick_thread = thread::Builder::new()
            .name("ising-tick".into())
            .spawn(move || {
                // Exits once every sender is gone and the queue is drained.
                for () in tick_rx.iter() {
                    let report = match sim.step() {
                        Ok(report) => report,
                        Err(e) => {
                            eprintln!("ising-tick: tick {} failed: {e}", sim.tick_id().next());
                            break;
                        }
                    };
                    let frame = Frame {
                        tick_id: report.tick_id,
                        lattice: sim.lattice().clone(),
                        report,
                    };
                    if let Err(TrySendError::Full(_)) = frame_tx.try_send(frame) {
                        thread_dropped.fetch_add(1, Ordering::Relaxed);
                    }
                }
                sim
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("tick thread: {e}"),
            })?;

        Ok(Self {
            tick_tx: Some(tick_tx),
            frame_rx,
            params,
            dropped_frames,
            latest: None,
            tick_thread: Some(tick_thread),
        })
    }

    /// Signal the tick thread to run one batch.
    pub fn tick(&self) -> Result<(), SubmitError> {
        let tx = self.tick_tx.as_ref().ok_or(SubmitError::Shutdown)?;
        match tx.try_send(()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(())) => Err(SubmitError::TickPending),
            Err(TrySendError::Disconnected(())) => Err(SubmitError::Shutdown),
        }
    }

    /// The next published frame, if one is ready.
    pub fn try_recv_frame(&self) -> Option<Frame> {
        self.frame_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next published frame.
    ///
    /// Returns `None` on timeout or once the tick thread has stopped and
    /// every frame has been received.
    pub fn recv_frame(&self, timeout: Duration) -> Option<Frame> {
        self.frame_rx.recv_timeout(timeout).ok()
    }

    /// Drain pending frames and return the newest one seen so far.
    pub fn latest_frame(&mut self) -> Option<&Frame> {
        if let Some(frame) = self.frame_rx.try_iter().last() {
            self.latest = Some(frame);
        }
        self.latest.as_ref()
    }

    /// Render the newest frame, if any. Returns its tick.
    pub fn render_latest<T: Renderer + ?Sized>(&mut self, renderer: &mut T) -> Option<TickId> {
        let frame = self.latest_frame()?;
        renderer.render(frame.tick_id, frame);
        Some(frame.tick_id)
    }

    /// Shared parameters; clone to hand to an input thread.
    pub fn parameters(&self) -> &ParameterHandle {
        &self.params
    }

    /// Frames discarded because the frame channel was full.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }

    /// Whether the tick thread has exited (shutdown or a failed tick).
    pub fn is_finished(&self) -> bool {
        self.tick_thread
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Stop the tick thread and recover the simulation.
    ///
    /// Any tick already queued runs to completion first.
    pub fn shutdown(mut self) -> Result<Simulation<R>, ConfigError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<Simulation<R>, ConfigError> {
        self.tick_tx.take();
        let handle = self
            .tick_thread
            .take()
            .ok_or(ConfigError::EngineRecoveryFailed)?;
        handle.join().map_err(|_| ConfigError::EngineRecoveryFailed)
    }
}

impl<R: RandomSource + Send + 'static> Drop for RealtimeSimulation<R> {
    fn drop(&mut self) {
        if self.tick_thread.is_some() {
            let _ = self.stop();
        }
    }
}

impl<R: RandomSource + Send + 'static> fmt::Debug for RealtimeSimulation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeSimulation")
            .field("running", &!self.is_finished())
            .field("dropped_frames", &self.dropped_frames())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AsciiRenderer;
    use std::time::Instant;

    fn test_config() -> SimulationConfig {
        SimulationConfig {
            width: 16,
            height: 16,
            seed: 3,
            sweeps_per_tick: 256,
            frame_buffer: 8,
            ..Default::default()
        }
    }

    fn submit(rt: &RealtimeSimulation) {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match rt.tick() {
                Ok(()) => return,
                Err(SubmitError::TickPending) if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(1));
                }
                Err(e) => panic!("tick submission failed: {e}"),
            }
        }
    }

    #[test]
    fn tick_publishes_frame() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        rt.tick().unwrap();
        let frame = rt.recv_frame(Duration::from_secs(10)).unwrap();
        assert_eq!(frame.tick_id, TickId(1));
        assert_eq!(frame.report.batch.trials, 256);
        assert_eq!(frame.cell_count(), 256);
        rt.shutdown().unwrap();
    }

    #[test]
    fn no_tick_no_frame() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        assert!(rt.recv_frame(Duration::from_millis(50)).is_none());
        assert!(rt.try_recv_frame().is_none());
    }

    #[test]
    fn shutdown_recovers_simulation() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        for i in 1..=5 {
            rt.tick().unwrap();
            let frame = rt.recv_frame(Duration::from_secs(10)).unwrap();
            assert_eq!(frame.tick_id, TickId(i));
        }
        let sim = rt.shutdown().unwrap();
        assert_eq!(sim.tick_id(), TickId(5));
    }

    #[test]
    fn frame_matches_recovered_lattice() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        rt.tick().unwrap();
        let frame = rt.recv_frame(Duration::from_secs(10)).unwrap();
        let sim = rt.shutdown().unwrap();
        assert_eq!(&frame.lattice, sim.lattice());
    }

    #[test]
    fn excess_ticks_are_refused_while_busy() {
        let cfg = SimulationConfig {
            width: 64,
            height: 64,
            sweeps_per_tick: 2_000_000,
            ..test_config()
        };
        let rt = RealtimeSimulation::new(cfg).unwrap();
        // The thread takes at most one signal per batch, and the channel
        // holds one more, so three quick submissions cannot all succeed.
        let results = [rt.tick(), rt.tick(), rt.tick()];
        assert!(results[0].is_ok());
        assert!(results.contains(&Err(SubmitError::TickPending)));
        rt.shutdown().unwrap();
    }

    #[test]
    fn full_frame_channel_drops_frames() {
        let cfg = SimulationConfig {
            frame_buffer: 1,
            ..test_config()
        };
        let rt = RealtimeSimulation::new(cfg).unwrap();
        for _ in 0..3 {
            submit(&rt);
        }
        let deadline = Instant::now() + Duration::from_secs(10);
        while rt.dropped_frames() < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(rt.dropped_frames(), 2);
        let frame = rt.try_recv_frame().unwrap();
        assert_eq!(frame.tick_id, TickId(1));
    }

    #[test]
    fn parameter_updates_reach_tick_thread() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        rt.parameters().set_sweep_rate(10.0).unwrap();
        rt.tick().unwrap();
        let frame = rt.recv_frame(Duration::from_secs(10)).unwrap();
        assert_eq!(frame.report.batch.trials, 10);
    }

    #[test]
    fn render_latest_uses_newest_frame() {
        let mut rt = RealtimeSimulation::new(test_config()).unwrap();
        let mut renderer = AsciiRenderer::default();
        assert_eq!(rt.render_latest(&mut renderer), None);
        for _ in 0..3 {
            submit(&rt);
        }
        let newest = {
            let deadline = Instant::now() + Duration::from_secs(10);
            loop {
                if let Some(frame) = rt.latest_frame() {
                    if frame.tick_id == TickId(3) {
                        break frame.tick_id;
                    }
                }
                assert!(Instant::now() < deadline, "frames never arrived");
                thread::sleep(Duration::from_millis(1));
            }
        };
        assert_eq!(rt.render_latest(&mut renderer), Some(newest));
        assert_eq!(renderer.last_tick(), Some(TickId(3)));
        assert_eq!(renderer.frame().lines().count(), 16);
    }

    #[test]
    fn zero_frame_buffer_rejected() {
        let cfg = SimulationConfig {
            frame_buffer: 0,
            ..test_config()
        };
        assert_eq!(
            RealtimeSimulation::new(cfg).err(),
            Some(ConfigError::FrameBufferZero)
        );
    }

    #[test]
    fn spawn_accepts_custom_source() {
        let sim = Simulation::with_source(test_config(), ChaChaSource::seeded(8)).unwrap();
        let rt = RealtimeSimulation::spawn(sim).unwrap();
        rt.tick().unwrap();
        assert!(rt.recv_frame(Duration::from_secs(10)).is_some());
    }

    /// Picks coordinates one past the edge, so every trial fails.
    struct OffGridSource;

    impl RandomSource for OffGridSource {
        fn next_unit(&mut self) -> f64 {
            0.3
        }

        fn next_index(&mut self, n: usize) -> usize {
            n
        }
    }

    fn wait_finished<R: RandomSource + Send + 'static>(rt: &RealtimeSimulation<R>) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !rt.is_finished() {
            assert!(Instant::now() < deadline, "tick thread never exited");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn tick_after_sender_closed_reports_shutdown() {
        let mut rt = RealtimeSimulation::new(test_config()).unwrap();
        rt.tick_tx.take();
        wait_finished(&rt);
        assert_eq!(rt.tick(), Err(SubmitError::Shutdown));
    }

    #[test]
    fn failed_tick_stops_thread_and_refuses_ticks() {
        let sim = Simulation::with_source(test_config(), OffGridSource).unwrap();
        let rt = RealtimeSimulation::spawn(sim).unwrap();
        rt.tick().unwrap();
        wait_finished(&rt);
        // The sender is still held; the closed receiver is what refuses.
        assert!(rt.tick_tx.is_some());
        assert_eq!(rt.tick(), Err(SubmitError::Shutdown));
        assert!(rt.recv_frame(Duration::from_millis(50)).is_none());
        let sim = rt.shutdown().unwrap();
        assert_eq!(sim.tick_id(), TickId(0));
    }

    #[test]
    fn drop_stops_thread() {
        let rt = RealtimeSimulation::new(test_config()).unwrap();
        rt.tick().unwrap();
        drop(rt);
        // If this doesn't hang, shutdown worked.
    }
}
