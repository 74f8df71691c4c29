//! Criterion micro-benchmarks for lattice and energy operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ising_engine::{energy, lattice_hash, ChaChaSource, Observables};
use ising_lattice::Lattice;
use ising_test_utils::checkerboard;

/// Benchmark: bond energy at all 16K cells of a 128x128 lattice.
fn bench_bond_energy_16k(c: &mut Criterion) {
    let mut rng = ChaChaSource::seeded(7);
    let lattice = Lattice::random(128, 128, &mut rng).unwrap();

    c.bench_function("bond_energy_16k", |b| {
        b.iter(|| {
            for y in 0..128 {
                for x in 0..128 {
                    let e = energy::bond_energy(&lattice, x, y).unwrap();
                    black_box(e);
                }
            }
        });
    });
}

/// Benchmark: total energy of a 128x128 checkerboard.
fn bench_total_energy_16k(c: &mut Criterion) {
    let lattice = checkerboard(128, 128);

    c.bench_function("total_energy_16k", |b| {
        b.iter(|| black_box(energy::total_energy(&lattice)));
    });
}

/// Benchmark: re-randomize a 128x128 lattice from a seeded source.
fn bench_randomize_16k(c: &mut Criterion) {
    let mut rng = ChaChaSource::seeded(7);
    let mut lattice = Lattice::new(128, 128).unwrap();

    c.bench_function("randomize_16k", |b| {
        b.iter(|| {
            lattice.randomize(&mut rng);
            black_box(&lattice);
        });
    });
}

/// Benchmark: measure observables and hash a 128x128 lattice.
fn bench_observe_and_hash_16k(c: &mut Criterion) {
    let mut rng = ChaChaSource::seeded(9);
    let lattice = Lattice::random(128, 128, &mut rng).unwrap();

    c.bench_function("observe_and_hash_16k", |b| {
        b.iter(|| {
            black_box(Observables::measure(&lattice));
            black_box(lattice_hash(&lattice));
        });
    });
}

criterion_group!(
    benches,
    bench_bond_energy_16k,
    bench_total_energy_16k,
    bench_randomize_16k,
    bench_observe_and_hash_16k
);
criterion_main!(benches);
