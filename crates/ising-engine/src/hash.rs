//! Lattice hashing for determinism checks.
//!
//! Uses FNV-1a for fast, deterministic hashing of lattice state. Not
//! cryptographically secure; intended for equality checks between runs.

use ising_core::LatticeView;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash a lattice's dimensions and every spin in row-major order.
///
/// Dimensions are folded in first, so a 2x8 and a 4x4 lattice with the
/// same spin sequence hash differently.
pub fn lattice_hash(view: &dyn LatticeView) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, view.width() as u64);
    hash = fnv1a_u64(hash, view.height() as u64);
    for &spin in view.spins() {
        hash = fnv1a_byte(hash, spin.value() as u8);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising_lattice::Lattice;

    #[test]
    fn identical_lattices_hash_equal() {
        let a = Lattice::new(5, 5).unwrap();
        let b = Lattice::new(5, 5).unwrap();
        assert_eq!(lattice_hash(&a), lattice_hash(&b));
    }

    #[test]
    fn single_flip_changes_hash() {
        let a = Lattice::new(5, 5).unwrap();
        let mut b = a.clone();
        b.flip(3, 4).unwrap();
        assert_ne!(lattice_hash(&a), lattice_hash(&b));
    }

    #[test]
    fn shape_is_part_of_hash() {
        let a = Lattice::new(2, 8).unwrap();
        let b = Lattice::new(4, 4).unwrap();
        assert_ne!(lattice_hash(&a), lattice_hash(&b));
    }
}
