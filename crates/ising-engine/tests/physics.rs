//! Thermodynamic sanity checks on seeded runs.

use ising_engine::{
    energy, NullRenderer, Observables, Simulation, SimulationConfig, TEMPERATURE_FLOOR,
};
use ising_test_utils::checkerboard;

fn config(temperature: f64, seed: u64) -> SimulationConfig {
    SimulationConfig {
        width: 16,
        height: 16,
        seed,
        temperature,
        // One sweep of the lattice per tick.
        sweeps_per_tick: 256,
        track_observables: true,
        ..Default::default()
    }
}

#[test]
fn low_temperature_orders() {
    let mut sim = Simulation::new(config(1.0, 11)).unwrap();
    sim.run(2_000, &mut NullRenderer).unwrap();
    let obs = Observables::measure(sim.lattice());
    // Fully ordered is -2; two straight domain walls cost 0.25.
    assert!(obs.energy_per_spin < -1.5, "e = {}", obs.energy_per_spin);
}

#[test]
fn high_temperature_stays_disordered() {
    let mut sim = Simulation::new(config(100.0, 12)).unwrap();
    let total = sim.run(200, &mut NullRenderer).unwrap();
    assert!(total.acceptance_ratio() > 0.9);

    let stats = sim.stats();
    assert_eq!(stats.count(), 200);
    assert!(stats.mean_abs_magnetization() < 0.2);
    assert!(stats.mean_energy().abs() < 0.2);
}

#[test]
fn floor_temperature_never_climbs() {
    let mut sim = Simulation::new(config(TEMPERATURE_FLOOR, 13)).unwrap();
    let mut last = energy::total_energy(sim.lattice());
    for _ in 0..50 {
        sim.step().unwrap();
        let e = energy::total_energy(sim.lattice());
        assert!(e <= last);
        last = e;
    }
}

#[test]
fn checkerboard_melts_downhill_at_low_temperature() {
    // A checkerboard has every bond frustrated: each flip is downhill.
    let lattice = checkerboard(16, 16);
    assert_eq!(energy::energy_per_spin(&lattice), 2.0);
    let delta = energy::flip_energy_delta(&lattice, 3, 5).unwrap();
    assert_eq!(delta, -8.0);
}

#[test]
fn temperature_change_mid_run_takes_effect() {
    let mut sim = Simulation::new(config(100.0, 14)).unwrap();
    sim.run(20, &mut NullRenderer).unwrap();
    sim.parameters().set_temperature(TEMPERATURE_FLOOR).unwrap();
    // Only downhill or level flips remain possible.
    let before = energy::total_energy(sim.lattice());
    sim.run(20, &mut NullRenderer).unwrap();
    assert!(energy::total_energy(sim.lattice()) <= before);
}
