//! Metropolis Monte Carlo engine and simulation loop for the Ising lattice.
//!
//! Layered leaf-first: the [`energy`] model reads a lattice, the
//! [`metropolis`] engine runs trials gated by shared [`params`], and the
//! [`simulation`] session drives one batch per external tick before
//! handing the lattice to a renderer. [`realtime`] moves a session onto
//! its own thread for externally paced ticks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod energy;
pub mod hash;
pub mod metrics;
pub mod metropolis;
pub mod observables;
pub mod params;
pub mod realtime;
pub mod render;
pub mod rng;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use hash::lattice_hash;
pub use metrics::TickMetrics;
pub use metropolis::{
    AcceptanceRule, BatchReport, MetropolisEngine, ParameterSampling, TrialOutcome,
};
pub use observables::{ObservableStats, Observables};
pub use params::{ParameterHandle, Parameters, TEMPERATURE_FLOOR};
pub use realtime::{Frame, RealtimeSimulation, SubmitError};
pub use render::{AsciiRenderer, NullRenderer, PixelRenderer};
pub use rng::ChaChaSource;
pub use simulation::{Simulation, TickReport};
