//! Per-tick performance metrics for the simulation loop.
//!
//! [`TickMetrics`] captures timing and acceptance counts for a single
//! tick, for telemetry and for pacing decisions in drivers.

/// Timing and acceptance metrics collected during a single tick.
///
/// All durations are in microseconds. The loop populates these fields
/// after each tick; consumers read them from the most recent tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the Metropolis batch, in microseconds.
    pub batch_us: u64,
    /// Time spent in the renderer, in microseconds.
    pub render_us: u64,
    /// Trials performed this tick.
    pub trials: usize,
    /// Trials accepted this tick.
    pub accepted: usize,
}

impl TickMetrics {
    /// Fraction of this tick's trials that flipped a spin.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.accepted as f64 / self.trials as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.batch_us, 0);
        assert_eq!(m.render_us, 0);
        assert_eq!(m.trials, 0);
        assert_eq!(m.accepted, 0);
        assert_eq!(m.acceptance_ratio(), 0.0);
    }

    #[test]
    fn acceptance_ratio_from_counts() {
        let m = TickMetrics {
            total_us: 120,
            batch_us: 100,
            render_us: 15,
            trials: 200,
            accepted: 50,
        };
        assert_eq!(m.acceptance_ratio(), 0.25);
    }
}
