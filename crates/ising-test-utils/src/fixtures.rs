//! Reusable lattice fixtures.
//!
//! - [`checkerboard`]: neighbouring spins always disagree (maximum energy).
//! - [`stripes`]: alternating rows of up and down spins.

use ising_core::Spin;
use ising_lattice::Lattice;

/// `(x + y)` even is up, odd is down.
///
/// # Panics
///
/// Panics on a zero dimension.
pub fn checkerboard(width: usize, height: usize) -> Lattice {
    let mut lattice = Lattice::new(width, height).expect("non-empty fixture lattice");
    for y in 0..height {
        for x in 0..width {
            let spin = if (x + y) % 2 == 0 { Spin::Up } else { Spin::Down };
            lattice.set_spin(x, y, spin).expect("in range");
        }
    }
    lattice
}

/// Even rows up, odd rows down.
///
/// # Panics
///
/// Panics on a zero dimension.
pub fn stripes(width: usize, height: usize) -> Lattice {
    let mut lattice = Lattice::new(width, height).expect("non-empty fixture lattice");
    for y in (1..height).step_by(2) {
        for x in 0..width {
            lattice.set_spin(x, y, Spin::Down).expect("in range");
        }
    }
    lattice
}
