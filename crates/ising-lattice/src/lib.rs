//! Toroidal spin lattice storage for the Ising simulator.
//!
//! [`Lattice`] owns a rectangular grid of [`Spin`](ising_core::Spin)
//! values under periodic boundary conditions: every cell has exactly
//! four neighbours, with edges wrapping around to the opposite side.
//! Neighbour relations are computed on the fly and never stored.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod lattice;
pub mod torus;

pub use lattice::Lattice;
