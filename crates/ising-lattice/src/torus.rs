//! Periodic axis arithmetic shared by lattice indexing.

/// The coordinate one step backward along an axis of length `len`,
/// wrapping `0` to `len - 1`.
#[inline]
pub fn step_back(coord: usize, len: usize) -> usize {
    if coord == 0 {
        len - 1
    } else {
        coord - 1
    }
}

/// The coordinate one step forward along an axis of length `len`,
/// wrapping `len - 1` to `0`.
#[inline]
pub fn step_forward(coord: usize, len: usize) -> usize {
    if coord + 1 == len {
        0
    } else {
        coord + 1
    }
}
