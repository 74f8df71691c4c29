//! Per-tick observables and their running averages.
//!
//! [`Observables`] is a snapshot of one lattice state. [`ObservableStats`]
//! accumulates snapshots and derives the usual thermodynamic estimators
//! from the raw moments.

use ising_lattice::Lattice;

use crate::energy;

/// Intensive observables of a single lattice state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observables {
    /// Mean spin, in `[-1, 1]`.
    pub magnetization: f64,
    /// `|magnetization|`.
    pub abs_magnetization: f64,
    /// Total energy divided by cell count.
    pub energy_per_spin: f64,
}

impl Observables {
    /// Measure `lattice`.
    pub fn measure(lattice: &Lattice) -> Self {
        let m = lattice.spin_sum() as f64 / lattice.cell_count() as f64;
        Self {
            magnetization: m,
            abs_magnetization: m.abs(),
            energy_per_spin: energy::energy_per_spin(lattice),
        }
    }
}

/// Running sums of observable moments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObservableStats {
    count: usize,
    m: f64,
    abs_m: f64,
    m2: f64,
    m4: f64,
    e: f64,
    e2: f64,
}

impl ObservableStats {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample.
    pub fn record(&mut self, obs: &Observables) {
        let m2 = obs.magnetization * obs.magnetization;
        self.count += 1;
        self.m += obs.magnetization;
        self.abs_m += obs.abs_magnetization;
        self.m2 += m2;
        self.m4 += m2 * m2;
        self.e += obs.energy_per_spin;
        self.e2 += obs.energy_per_spin * obs.energy_per_spin;
    }

    /// Number of samples recorded.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        }
    }

    /// `<m>`.
    pub fn mean_magnetization(&self) -> f64 {
        self.mean(self.m)
    }

    /// `<|m|>`.
    pub fn mean_abs_magnetization(&self) -> f64 {
        self.mean(self.abs_m)
    }

    /// `<m²>`.
    pub fn mean_magnetization_sq(&self) -> f64 {
        self.mean(self.m2)
    }

    /// `<m⁴>`.
    pub fn mean_magnetization_quartic(&self) -> f64 {
        self.mean(self.m4)
    }

    /// `<e>`, energy per spin.
    pub fn mean_energy(&self) -> f64 {
        self.mean(self.e)
    }

    /// `<e²>`.
    pub fn mean_energy_sq(&self) -> f64 {
        self.mean(self.e2)
    }

    /// Binder cumulant `1 - <m⁴> / (3 <m²>²)`.
    ///
    /// `None` until a sample with non-zero magnetization is recorded.
    pub fn binder_cumulant(&self) -> Option<f64> {
        let m2 = self.mean_magnetization_sq();
        if m2 == 0.0 {
            return None;
        }
        Some(1.0 - self.mean_magnetization_quartic() / (3.0 * m2 * m2))
    }

    /// Specific heat per spin `N (<e²> - <e>²) / T²`.
    pub fn specific_heat(&self, temperature: f64, cells: usize) -> f64 {
        let e = self.mean_energy();
        let var = (self.mean_energy_sq() - e * e).max(0.0);
        cells as f64 * var / (temperature * temperature)
    }

    /// Susceptibility per spin `N (<m²> - <|m|>²) / T`.
    pub fn susceptibility(&self, temperature: f64, cells: usize) -> f64 {
        let m = self.mean_abs_magnetization();
        let var = (self.mean_magnetization_sq() - m * m).max(0.0);
        cells as f64 * var / temperature
    }
}
