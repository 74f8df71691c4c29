//! Abstraction traits at the engine's collaborator seams.

use crate::error::LatticeError;
use crate::id::TickId;
use crate::spin::Spin;

/// Uniform random numbers for the Monte Carlo engine.
///
/// Injected into every operation that needs randomness so that trial
/// sequences are reproducible under a fixed seed and scriptable in
/// tests.
pub trait RandomSource {
    /// A uniform draw from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform integer from `[0, n)`, by scaling and truncating
    /// [`next_unit`](RandomSource::next_unit).
    ///
    /// The result is clamped to `n - 1` so float rounding near `1.0`
    /// cannot produce `n`. `n` must be non-zero.
    fn next_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "next_index requires a non-empty range");
        let scaled = (self.next_unit() * n as f64) as usize;
        scaled.min(n.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}

/// Read-only access to a spin lattice.
///
/// Renderers and observables read through `&dyn LatticeView` rather
/// than a concrete lattice type, so they work equally on the live
/// lattice and on owned frame copies.
pub trait LatticeView {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// The spin at `(x, y)`.
    ///
    /// Returns [`LatticeError::OutOfRange`] outside the lattice.
    fn spin(&self, x: usize, y: usize) -> Result<Spin, LatticeError>;

    /// All spins in row-major order (`index = y * width + x`).
    fn spins(&self) -> &[Spin];

    /// Total number of cells.
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// A write-only consumer of lattice state, invoked once per tick.
///
/// Renderers produce no feedback into the simulation. They run strictly
/// after the tick's batch has completed.
pub trait Renderer {
    /// Consume the lattice state produced by `tick`.
    fn render(&mut self, tick: TickId, view: &dyn LatticeView);
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn render(&mut self, tick: TickId, view: &dyn LatticeView) {
        (**self).render(tick, view)
    }
}
