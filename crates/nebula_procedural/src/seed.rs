//! # Seeds
//!
//! Every generated thing in the universe descends from one root seed.
//!
//! ## Determinism Guarantee
//!
//! Given the same root `Seed`, cell seeds, planet seeds and every derived
//! stream are identical on any platform, in any visit order.

use nebula_shared::constants::RANDOM_SEED_RANGE;

use crate::cell::CellCoord;

/// Purposes for [`Seed::derive`], one per independent stream.
pub mod purpose {
    /// Initial moon angles of an orbit view.
    pub const ORBIT_PHASE: u64 = 100;
    /// Backdrop stars of an orbit view.
    pub const ORBIT_BACKDROP: u64 = 101;
    /// Land height noise.
    pub const LAND_HEIGHT: u64 = 102;
    /// Land palette choice.
    pub const LAND_PALETTE: u64 = 103;
}

/// Seed for deterministic generation.
///
/// Every integer is a legal seed; signed values are bit-cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seed(u64);

impl Seed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Creates a seed from a signed integer.
    #[inline]
    #[must_use]
    pub const fn from_signed(seed: i64) -> Self {
        Self(seed as u64)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., orbit phases).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(mix64(hash))
    }

    /// Derives the seed of the cell at `coord`.
    ///
    /// A pure function of `(self, coord)`: the order in which cells are first
    /// visited cannot change the result.
    #[inline]
    #[must_use]
    pub const fn for_cell(self, coord: CellCoord) -> Self {
        let packed = ((coord.x as u32 as u64) << 32) | (coord.y as u32 as u64);
        Self(mix64(self.0 ^ mix64(packed.wrapping_add(0x9e37_79b9_7f4a_7c15))))
    }

    /// Interprets user-entered seed text.
    ///
    /// Integer text is used directly. Any other text becomes the sum of its
    /// character codes, so a phrase always maps to the same universe.
    /// Blank text yields `None`.
    #[must_use]
    pub fn from_phrase(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(value) = text.parse::<i64>() {
            return Some(Self::from_signed(value));
        }
        Some(Self(text.chars().map(u64::from).sum()))
    }

    /// Picks a fresh seed from OS entropy.
    ///
    /// The value is reduced to `[0, 100000)` so it stays short enough to
    /// share.
    ///
    /// # Errors
    ///
    /// Returns the OS error if no entropy source is available.
    pub fn random() -> Result<Self, getrandom::Error> {
        Ok(Self(getrandom::u64()? % RANDOM_SEED_RANGE))
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self::from_signed(value)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SplitMix64 finalizer.
#[inline]
const fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_derivation() {
        let base = Seed::new(42);
        let derived1 = base.derive(1);
        let derived2 = base.derive(2);

        assert_ne!(derived1, derived2, "Different purposes should give different seeds");
        assert_eq!(derived1, base.derive(1), "Same purpose should give same seed");
        assert_ne!(derived1, base, "Derived seed should differ from base");
    }

    #[test]
    fn test_cell_seeds_are_order_independent() {
        let universe = Seed::new(4324);
        let forward: Vec<Seed> = (-3..=3)
            .map(|x| universe.for_cell(CellCoord::new(x, 1)))
            .collect();
        let backward: Vec<Seed> = (-3..=3)
            .rev()
            .map(|x| universe.for_cell(CellCoord::new(x, 1)))
            .collect();

        assert!(forward.iter().eq(backward.iter().rev()));
    }

    #[test]
    fn test_cell_seeds_differ_by_coordinate() {
        let universe = Seed::new(7);
        let a = universe.for_cell(CellCoord::new(1, 2));
        let b = universe.for_cell(CellCoord::new(2, 1));
        let c = universe.for_cell(CellCoord::new(-1, -2));

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(universe.for_cell(CellCoord::new(0, 0)), Seed::new(8).for_cell(CellCoord::new(0, 0)));
    }

    #[test]
    fn test_signed_seeds() {
        assert_eq!(Seed::from_signed(-1).value(), u64::MAX);
        assert_eq!(Seed::from(5_i64), Seed::new(5));
    }

    #[test]
    fn test_from_phrase() {
        assert_eq!(Seed::from_phrase("  4324 "), Some(Seed::new(4324)));
        assert_eq!(Seed::from_phrase("-2"), Some(Seed::from_signed(-2)));
        // 'a' + 'b' = 97 + 98
        assert_eq!(Seed::from_phrase("ab"), Some(Seed::new(195)));
        assert_eq!(Seed::from_phrase("   "), None);
    }

    #[test]
    fn test_random_seed_range() {
        if let Ok(seed) = Seed::random() {
            assert!(seed.value() < RANDOM_SEED_RANGE);
        }
    }
}
