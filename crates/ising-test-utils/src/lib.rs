//! Test utilities and mock collaborators for Ising development.
//!
//! Provides a scripted [`RandomSource`] that replays a fixed sequence
//! of uniforms, a [`RecordingRenderer`] that captures what the engine
//! hands to its rendering collaborator, and lattice [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{checkerboard, stripes};

use ising_core::{LatticeView, RandomSource, Renderer, Spin, TickId};

/// A [`RandomSource`] that replays a fixed list of uniforms, cycling
/// back to the start when exhausted.
///
/// Useful for driving the Metropolis engine through an exact sequence
/// of coordinate and acceptance draws.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    pos: usize,
    draws: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "ScriptedSource needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted uniforms must lie in [0, 1)"
        );
        Self {
            values,
            pos: 0,
            draws: 0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Total number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos];
        self.pos = (self.pos + 1) % self.values.len();
        self.draws += 1;
        v
    }
}

/// One frame captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFrame {
    pub tick: TickId,
    pub width: usize,
    pub height: usize,
    pub spins: Vec<Spin>,
}

/// A [`Renderer`] that copies every frame it is handed.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, tick: TickId, view: &dyn LatticeView) {
        self.frames.push(RecordedFrame {
            tick,
            width: view.width(),
            height: view.height(),
            spins: view.spins().to_vec(),
        });
    }
}
