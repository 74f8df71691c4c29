//! Nearest-neighbour energy model with unit ferromagnetic coupling.
//!
//! All functions are pure: they read the lattice and never mutate it
//! or draw random numbers.

use ising_core::LatticeError;
use ising_lattice::{torus, Lattice};

/// Local bond energy of cell `(x, y)`: the sum over its four periodic
/// neighbours `n` of `-s(x, y) * s(n)`.
///
/// This is the per-site term the acceptance rule works with, not a
/// share of the total energy: it is not halved, and on narrow lattices
/// a neighbour listed twice contributes twice.
pub fn bond_energy(lattice: &Lattice, x: usize, y: usize) -> Result<f64, LatticeError> {
    let s = lattice.get(x, y)?.as_f64();
    let mut energy = 0.0;
    for (nx, ny) in lattice.neighbours(x, y)? {
        energy += -s * lattice.get(nx, ny)?.as_f64();
    }
    Ok(energy)
}

/// Energy change from flipping `(x, y)`: `-2 * bond_energy(x, y)`.
///
/// Flipping negates every term of the bond sum, so the change is
/// exactly twice the negated original sum.
pub fn flip_energy_delta(lattice: &Lattice, x: usize, y: usize) -> Result<f64, LatticeError> {
    Ok(-2.0 * bond_energy(lattice, x, y)?)
}

/// Total lattice energy `H = -Σ s_i s_j`, each nearest-neighbour bond
/// counted once (every cell's right and down bonds).
///
/// Summing [`bond_energy`] over all cells gives exactly twice this.
pub fn total_energy(lattice: &Lattice) -> f64 {
    let (w, h) = (lattice.width(), lattice.height());
    let cells = lattice.as_slice();
    let mut energy = 0i64;
    for y in 0..h {
        let down_row = torus::step_forward(y, h) * w;
        for x in 0..w {
            let s = cells[y * w + x].value() as i64;
            let right = cells[y * w + torus::step_forward(x, w)].value() as i64;
            let down = cells[down_row + x].value() as i64;
            energy -= s * (right + down);
        }
    }
    energy as f64
}

/// [`total_energy`] divided by the number of cells.
pub fn energy_per_spin(lattice: &Lattice) -> f64 {
    total_energy(lattice) / lattice.cell_count() as f64
}
