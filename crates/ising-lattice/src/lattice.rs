//! Rectangular spin lattice with periodic (torus) boundaries.

use ising_core::{LatticeError, LatticeView, RandomSource, Spin};

use crate::torus;

/// A `width x height` grid of spins under periodic boundary conditions.
///
/// Cell `(x, y)` has column `x` in `[0, width)` and row `y` in
/// `[0, height)`, stored row-major at index `y * width + x`. Its four
/// neighbours are `(x±1 mod width, y)` and `(x, y±1 mod height)`.
///
/// Dimensions are fixed at construction. Every cell always holds a
/// [`Spin`], so the `±1` invariant cannot be broken through this API.
///
/// # Examples
///
/// ```
/// use ising_core::Spin;
/// use ising_lattice::Lattice;
///
/// let mut lattice = Lattice::new(4, 3).unwrap();
/// assert_eq!(lattice.cell_count(), 12);
/// assert_eq!(lattice.get(0, 0).unwrap(), Spin::Up);
///
/// lattice.set(3, 2, -1).unwrap();
/// assert_eq!(lattice.get(3, 2).unwrap(), Spin::Down);
/// assert!(lattice.set(0, 0, 0).is_err());
///
/// // Corner neighbours wrap around both axes.
/// assert_eq!(lattice.neighbours(0, 0).unwrap(), [(3, 0), (1, 0), (0, 2), (0, 1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    width: usize,
    height: usize,
    cells: Vec<Spin>,
}

impl Lattice {
    /// Create a lattice with every spin up.
    ///
    /// Returns `Err(LatticeError::EmptyLattice)` if either dimension is 0,
    /// or `Err(LatticeError::DimensionTooLarge)` if `width * height`
    /// overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, LatticeError> {
        Self::uniform(width, height, Spin::Up)
    }

    /// Create a lattice with every cell set to `spin`.
    pub fn uniform(width: usize, height: usize, spin: Spin) -> Result<Self, LatticeError> {
        let count = Self::checked_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![spin; count],
        })
    }

    /// Create a lattice with every cell drawn independently from `rng`.
    ///
    /// See [`randomize`](Lattice::randomize) for the draw rule.
    pub fn random<R: RandomSource + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, LatticeError> {
        let mut lattice = Self::new(width, height)?;
        lattice.randomize(rng);
        Ok(lattice)
    }

    /// Build a lattice from raw row-major values.
    ///
    /// Every value must be `+1` or `-1` and `values.len()` must equal
    /// `width * height`.
    pub fn from_values(width: usize, height: usize, values: &[i8]) -> Result<Self, LatticeError> {
        let count = Self::checked_count(width, height)?;
        if values.len() != count {
            return Err(LatticeError::LengthMismatch {
                expected: count,
                actual: values.len(),
            });
        }
        let cells = values
            .iter()
            .map(|&v| Spin::try_from(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn checked_count(width: usize, height: usize) -> Result<usize, LatticeError> {
        if width == 0 || height == 0 {
            return Err(LatticeError::EmptyLattice);
        }
        width
            .checked_mul(height)
            .ok_or(LatticeError::DimensionTooLarge { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major index of `(x, y)`, or `OutOfRange`.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize, LatticeError> {
        if x >= self.width || y >= self.height {
            return Err(LatticeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// The spin at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Result<Spin, LatticeError> {
        let i = self.index_of(x, y)?;
        Ok(self.cells[i])
    }

    /// Set `(x, y)` from a raw value, which must be `+1` or `-1`.
    ///
    /// Coordinates are checked before the value, so an out-of-range
    /// write reports `OutOfRange` regardless of the value.
    pub fn set(&mut self, x: usize, y: usize, value: i8) -> Result<(), LatticeError> {
        let i = self.index_of(x, y)?;
        self.cells[i] = Spin::try_from(value)?;
        Ok(())
    }

    /// Set `(x, y)` to a typed spin.
    pub fn set_spin(&mut self, x: usize, y: usize, spin: Spin) -> Result<(), LatticeError> {
        let i = self.index_of(x, y)?;
        self.cells[i] = spin;
        Ok(())
    }

    /// Negate the spin at `(x, y)` in place, returning the new value.
    #[inline]
    pub fn flip(&mut self, x: usize, y: usize) -> Result<Spin, LatticeError> {
        let i = self.index_of(x, y)?;
        let flipped = self.cells[i].flipped();
        self.cells[i] = flipped;
        Ok(flipped)
    }

    /// Re-draw every cell independently: a uniform draw below `0.5`
    /// gives [`Spin::Down`], otherwise [`Spin::Up`].
    ///
    /// Cells are drawn in row-major order, one draw per cell, so a
    /// seeded source always yields the same lattice.
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.next_unit() < 0.5 {
                Spin::Down
            } else {
                Spin::Up
            };
        }
    }

    /// The four periodic neighbours of `(x, y)`, in the order
    /// left, right, up, down.
    ///
    /// Exactly four entries are always returned. On lattices with a
    /// dimension of 1 or 2, some entries coincide (or equal the cell
    /// itself); they are still listed separately.
    #[inline]
    pub fn neighbours(&self, x: usize, y: usize) -> Result<[(usize, usize); 4], LatticeError> {
        self.index_of(x, y)?;
        Ok([
            (torus::step_back(x, self.width), y),
            (torus::step_forward(x, self.width), y),
            (x, torus::step_back(y, self.height)),
            (x, torus::step_forward(y, self.height)),
        ])
    }

    /// All spins in row-major order.
    pub fn as_slice(&self) -> &[Spin] {
        &self.cells
    }

    /// Iterate `((x, y), spin)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Spin)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &s)| ((i % w, i / w), s))
    }

    /// Sum of all spins.
    pub fn spin_sum(&self) -> i64 {
        self.cells.iter().map(|s| s.value() as i64).sum()
    }
}

impl LatticeView for Lattice {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn spin(&self, x: usize, y: usize) -> Result<Spin, LatticeError> {
        self.get(x, y)
    }

    fn spins(&self) -> &[Spin] {
        &self.cells
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
