//! Core types and traits for the Ising lattice simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: the
//! [`Spin`] value type, tick identifiers, error types, and the traits
//! at the seams between the engine and its collaborators (random
//! source, lattice read view, renderer).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod spin;
pub mod traits;

pub use error::{LatticeError, ParameterError, StepError};
pub use id::TickId;
pub use spin::Spin;
pub use traits::{LatticeView, RandomSource, Renderer};
