//! The two-valued spin carried by every lattice cell.

use std::fmt;

use crate::error::LatticeError;

/// A single Ising spin: `+1` (up) or `-1` (down).
///
/// Lattices store `Spin` values directly, so a cell can never hold
/// anything other than `±1`. Conversions from raw integers go through
/// [`TryFrom<i8>`], which rejects every other value with
/// [`LatticeError::InvalidSpin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Spin {
    /// `-1`.
    Down = -1,
    /// `+1`.
    Up = 1,
}

impl Spin {
    /// The signed integer value, `-1` or `+1`.
    #[inline]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// The value as `f64`, for energy arithmetic.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.value() as f64
    }

    /// The opposite spin.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    /// Whether this is [`Spin::Up`].
    #[inline]
    pub fn is_up(self) -> bool {
        self == Self::Up
    }
}

impl std::ops::Neg for Spin {
    type Output = Spin;

    fn neg(self) -> Spin {
        self.flipped()
    }
}

impl TryFrom<i8> for Spin {
    type Error = LatticeError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(LatticeError::InvalidSpin {
                value: other as i64,
            }),
        }
    }
}

impl TryFrom<i64> for Spin {
    type Error = LatticeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(LatticeError::InvalidSpin { value: other }),
        }
    }
}

impl From<Spin> for i8 {
    fn from(s: Spin) -> i8 {
        s.value()
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "+1"),
            Self::Down => write!(f, "-1"),
        }
    }
}
