//! # Simplex Noise Implementation
//!
//! Deterministic height noise for the land view.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`Seed`], this implementation will produce
//! **exactly** the same values on any platform, any time.

use crate::rng::SeededRng;
use crate::seed::Seed;
use crate::terrain::HeightSource;

/// Pre-computed permutation table for noise.
///
/// This is computed once from the seed and reused.
#[derive(Clone, Debug)]
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
}

/// 12 gradient vectors for 2D simplex.
const GRADIENTS: [[i8; 2]; 12] = [
    [1, 0],
    [1, 1],
    [0, 1],
    [-1, 1],
    [-1, 0],
    [-1, -1],
    [0, -1],
    [1, -1],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
];

impl PermutationTable {
    /// Creates a new permutation table from a seed.
    fn new(seed: Seed) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates shuffle
        let mut rng = SeededRng::new(seed);
        for i in (1..256u32).rev() {
            let j = rng.next_int(i + 1) as usize;
            perm.swap(i as usize, j);
        }

        // Double the table to avoid index wrapping
        perm.copy_within(0..256, 256);

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(hash: u8) -> [i8; 2] {
        GRADIENTS[(hash % 12) as usize]
    }
}

/// 2D Simplex noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
///
/// As a [`HeightSource`] it samples integer pixel coordinates scaled by
/// `frequency` and summed over `octaves` layers.
///
/// # Example
///
/// ```rust,ignore
/// let noise = SimplexNoise::new(Seed::new(42)).with_octaves(4);
///
/// let value = noise.sample(100.5, 200.3);
/// assert!(value >= -1.0 && value <= 1.0);
///
/// let height = noise.height_at(12, 40);
/// ```
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    /// The permutation table.
    perm_table: PermutationTable,
    /// Pixel to noise-space scale.
    frequency: f64,
    /// Layers summed by `height_at`.
    octaves: u32,
    /// Amplitude decay per octave.
    persistence: f64,
    /// Frequency increase per octave.
    lacunarity: f64,
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid.
    const F2: f64 = 0.366_025_403_784_439; // (sqrt(3) - 1) / 2
    /// Unskewing factor for 2D simplex grid.
    const G2: f64 = 0.211_324_865_405_187; // (3 - sqrt(3)) / 6

    /// Default pixel to noise-space scale.
    pub const DEFAULT_FREQUENCY: f64 = 0.01;
    /// Default octave count.
    pub const DEFAULT_OCTAVES: u32 = 4;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
            frequency: Self::DEFAULT_FREQUENCY,
            octaves: Self::DEFAULT_OCTAVES,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// Sets the pixel to noise-space scale.
    #[must_use]
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the octave count used by `height_at` (at least 1).
    #[must_use]
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = if octaves == 0 { 1 } else { octaves };
        self
    }

    /// Samples 2D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew input coordinates to simplex grid
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        // Unskew to get first corner in simplex
        let unskew = f64::from(i.wrapping_add(j)) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let i1 = i1 as usize;
        let j1 = j1 as usize;

        let table = &self.perm_table;
        let gi0 = table.get(ii + table.get(jj) as usize);
        let gi1 = table.get(ii + i1 + table.get(jj + j1) as usize);
        let gi2 = table.get(ii + 1 + table.get(jj + 1) as usize);

        let n0 = contribution(x0, y0, gi0);
        let n1 = contribution(x1, y1, gi1);
        let n2 = contribution(x2, y2, gi2);

        // 70.0 normalizes the output to [-1, 1]
        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Generates octaved (fractal) noise.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Coordinates
    /// * `octaves` - Number of noise layers (typically 4-8)
    /// * `persistence` - Amplitude decay per octave (typically 0.5)
    /// * `lacunarity` - Frequency increase per octave (typically 2.0)
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total / max_amplitude
    }
}

impl HeightSource for SimplexNoise {
    fn height_at(&self, x: i32, y: i32) -> f64 {
        self.octaved(
            f64::from(x) * self.frequency,
            f64::from(y) * self.frequency,
            self.octaves,
            self.persistence,
            self.lacunarity,
        )
    }
}

/// Calculates the contribution from one corner of the simplex.
#[inline]
fn contribution(x: f64, y: f64, gradient_index: u8) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let grad = PermutationTable::gradient(gradient_index);
        let t2 = t * t;
        t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
    }
}

/// Floor to `i32`, saturating far outside the noise domain.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi.saturating_sub(1)
    } else {
        xi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = Seed::new(12345);
        let noise1 = SimplexNoise::new(seed);
        let noise2 = SimplexNoise::new(seed);

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(
                noise1.sample(x, y).to_bits(),
                noise2.sample(x, y).to_bits(),
                "Noise should be deterministic"
            );
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = SimplexNoise::new(Seed::new(1));
        let noise2 = SimplexNoise::new(Seed::new(2));

        let differs = (0..64).any(|i| {
            let x = f64::from(i) * 0.37 + 0.1;
            noise1.sample(x, x * 0.5) != noise2.sample(x, x * 0.5)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_range() {
        let noise = SimplexNoise::new(Seed::new(42));

        for i in 0..10_000 {
            let x = f64::from(i) * 0.1 - 500.0;
            let y = f64::from(i) * 0.13 - 650.0;
            let value = noise.sample(x, y);

            assert!(
                (-1.0..=1.0).contains(&value),
                "Value {value} out of range at ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_continuity() {
        let noise = SimplexNoise::new(Seed::new(42));

        let v1 = noise.sample(100.0, 100.0);
        let v2 = noise.sample(100.001, 100.0);
        let v3 = noise.sample(100.0, 100.001);

        assert!((v1 - v2).abs() < 0.01, "Noise should be continuous");
        assert!((v1 - v3).abs() < 0.01, "Noise should be continuous");
    }

    #[test]
    fn test_height_source() {
        let noise = SimplexNoise::new(Seed::new(7)).with_octaves(6).with_frequency(0.02);
        for y in -20..20 {
            for x in -20..20 {
                let h = noise.height_at(x, y);
                assert!((-1.0..=1.0).contains(&h));
                assert_eq!(h.to_bits(), noise.height_at(x, y).to_bits());
            }
        }
    }

    #[test]
    fn test_zero_octaves_is_one_layer() {
        let noise = SimplexNoise::new(Seed::new(3)).with_octaves(0);
        let direct = noise.sample(0.05, 0.07);
        assert!((noise.height_at(5, 7) - direct).abs() < 1e-12);
    }
}
