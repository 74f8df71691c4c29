//! Ising: a 2D Ising model simulation driven by single-spin-flip Metropolis.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Ising sub-crates. For most users, adding `ising` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ising::prelude::*;
//!
//! // A 32×32 lattice just below the critical temperature.
//! let config = SimulationConfig {
//!     width: 32,
//!     height: 32,
//!     seed: 42,
//!     temperature: 2.0,
//!     sweeps_per_tick: 32 * 32,
//!     track_observables: true,
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//!
//! // The input side holds a cloned handle; the renderer only reads.
//! let params = sim.parameters().clone();
//! let mut renderer = AsciiRenderer::default();
//!
//! for _ in 0..10 {
//!     sim.tick(&mut renderer).unwrap();
//! }
//! params.set_temperature(3.5).unwrap();
//! let report = sim.tick(&mut renderer).unwrap();
//!
//! assert_eq!(report.tick_id, TickId(11));
//! assert_eq!(sim.stats().count(), 11);
//! assert_eq!(renderer.frame().lines().count(), 32);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ising-core` | `Spin`, `TickId`, errors, collaborator traits |
//! | [`lattice`] | `ising-lattice` | Toroidal spin storage and neighbour indexing |
//! | [`engine`] | `ising-engine` | Energy model, Metropolis engine, simulation loops, renderers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`ising-core`).
///
/// Contains [`types::Spin`], error types, and the collaborator traits
/// ([`types::RandomSource`], [`types::LatticeView`], [`types::Renderer`]).
pub use ising_core as types;

/// Spin lattice storage (`ising-lattice`).
///
/// [`lattice::Lattice`] plus the [`lattice::torus`] wraparound helpers.
pub use ising_lattice as lattice;

/// Simulation engine (`ising-engine`).
///
/// [`engine::Simulation`] for ticks driven on the caller's thread,
/// [`engine::RealtimeSimulation`] for a dedicated tick thread.
pub use ising_engine as engine;

/// Common imports for typical Ising usage.
///
/// ```rust
/// use ising::prelude::*;
/// ```
///
/// This imports the session types, configuration, parameters, stock
/// renderers, and the core traits needed to plug in custom collaborators.
pub mod prelude {
    // Core types and traits
    pub use ising_core::{LatticeView, RandomSource, Renderer, Spin, TickId};

    // Errors
    pub use ising_core::{LatticeError, ParameterError, StepError};

    // Lattice
    pub use ising_lattice::Lattice;

    // Engine
    pub use ising_engine::{
        AcceptanceRule, AsciiRenderer, ChaChaSource, ConfigError, Frame, NullRenderer,
        ObservableStats, Observables, ParameterHandle, ParameterSampling, PixelRenderer,
        RealtimeSimulation, Simulation, SimulationConfig, SubmitError, TickMetrics, TickReport,
    };
}
