//! Error types for the Ising simulator.
//!
//! Organized by subsystem: lattice access, parameter updates, and tick
//! execution. Every failure here is local and synchronous; none of them
//! is transient, so none carries retry semantics.

use std::error::Error;
use std::fmt;

/// Errors from lattice construction and cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    OutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Lattice width.
        width: usize,
        /// Lattice height.
        height: usize,
    },
    /// A spin value other than `+1` or `-1` was supplied.
    InvalidSpin {
        /// The offending value.
        value: i64,
    },
    /// Attempted to construct a lattice with a zero dimension.
    EmptyLattice,
    /// `width * height` does not fit in `usize`.
    DimensionTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// Raw spin data does not match the lattice dimensions.
    LengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) out of range for {width}x{height} lattice"
            ),
            Self::InvalidSpin { value } => {
                write!(f, "invalid spin {value}: must be +1 or -1")
            }
            Self::EmptyLattice => write!(f, "lattice must have at least one cell"),
            Self::DimensionTooLarge { width, height } => {
                write!(f, "lattice dimensions {width}x{height} overflow usize")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} spins, got {actual}")
            }
        }
    }
}

impl Error for LatticeError {}

/// Errors from parameter updates.
///
/// A rejected update leaves the previously stored value in place.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterError {
    /// The supplied value cannot be turned into a valid parameter.
    InvalidParameter {
        /// Parameter name (`"temperature"` or `"sweep_rate"`).
        name: &'static str,
        /// The rejected input.
        value: f64,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid {name}: {value}")
            }
        }
    }
}

impl Error for ParameterError {}

/// Errors from executing a tick.
///
/// Lattice failures inside a tick indicate a programming error (the
/// engine draws coordinates within bounds), so they abort the tick
/// instead of being clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A lattice access failed during the Metropolis batch.
    Lattice(LatticeError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice access failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
        }
    }
}

impl From<LatticeError> for StepError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}
