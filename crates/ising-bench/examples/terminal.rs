//! Terminal demo: realtime ticking with a temperature ramp.
//!
//! Demonstrates: spawn RealtimeSimulation → external tick source at a fixed
//! frame rate → input thread sweeping the temperature through the critical
//! point → render the newest frame as text each refresh → shutdown.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use ising_bench::{sweeps, CRITICAL_TEMPERATURE};
use ising_core::{LatticeView, Renderer, TickId};
use ising_engine::{
    energy, lattice_hash, AsciiRenderer, RealtimeSimulation, SimulationConfig, SubmitError,
};
use ising_lattice::Lattice;

const WIDTH: usize = 64;
const HEIGHT: usize = 32;
const FRAMES: usize = 300;
const FRAME_TIME: Duration = Duration::from_millis(33);

/// Wraps [`AsciiRenderer`] and writes each frame to stdout.
struct TerminalRenderer {
    ascii: AsciiRenderer,
    temperature: f64,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, tick: TickId, view: &dyn LatticeView) {
        self.ascii.render(tick, view);
        let m = view.spins().iter().map(|s| s.value() as i64).sum::<i64>() as f64
            / view.cell_count() as f64;
        let mut out = io::stdout().lock();
        // Home the cursor and redraw in place.
        let _ = writeln!(out, "\x1b[H{}", self.ascii.frame());
        let _ = writeln!(
            out,
            "tick {:>5}  T={:>6.3}  m={:>+6.3}\x1b[K",
            tick, self.temperature, m
        );
        let _ = out.flush();
    }
}

fn main() {
    let config = SimulationConfig {
        width: WIDTH,
        height: HEIGHT,
        seed: 42,
        temperature: 4.0,
        sweeps_per_tick: sweeps(WIDTH, HEIGHT, 1),
        frame_buffer: 2,
        ..Default::default()
    };
    let mut rt = RealtimeSimulation::new(config).unwrap();

    // Input collaborator: ramp from hot, through T_c, to cold.
    let params = rt.parameters().clone();
    let input = thread::spawn(move || {
        for step in 0..=100 {
            let t = 4.0 - 3.0 * step as f64 / 100.0;
            params.set_temperature(t).unwrap();
            thread::sleep(Duration::from_millis(100));
        }
    });

    print!("\x1b[2J");
    let mut renderer = TerminalRenderer {
        ascii: AsciiRenderer::new('#', ' '),
        temperature: rt.parameters().temperature(),
    };

    let mut pending = 0u64;
    for _ in 0..FRAMES {
        let frame_start = Instant::now();
        match rt.tick() {
            Ok(()) => {}
            Err(SubmitError::TickPending) => pending += 1,
            Err(SubmitError::Shutdown) => break,
        }
        renderer.temperature = rt.parameters().temperature();
        rt.render_latest(&mut renderer);
        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    input.join().unwrap();
    let dropped = rt.dropped_frames();
    let sim = rt.shutdown().unwrap();
    let lattice: &Lattice = sim.lattice();

    println!();
    println!("=== Summary ===");
    println!("  ticks run:        {}", sim.tick_id());
    println!("  ticks coalesced:  {pending}");
    println!("  frames dropped:   {dropped}");
    println!(
        "  final T:          {:.3} (T_c = {CRITICAL_TEMPERATURE:.3})",
        sim.parameters().temperature()
    );
    println!("  energy per spin:  {:.4}", energy::energy_per_spin(lattice));
    println!("  lattice hash:     {:#018x}", lattice_hash(lattice));
}
