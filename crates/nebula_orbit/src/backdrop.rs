//! Decorative stars behind the orbit view.

use bytemuck::{Pod, Zeroable};
use nebula_procedural::seed::purpose::ORBIT_BACKDROP;
use nebula_procedural::{Seed, SeededRng};

/// Star count is drawn from `[0, MAX_BACKDROP_STARS)`.
const MAX_BACKDROP_STARS: u32 = 1000;

/// Star diameter is drawn from `[0, MAX_BACKDROP_DIAMETER)`.
const MAX_BACKDROP_DIAMETER: u32 = 3;

/// One backdrop star in view coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct BackdropStar {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Diameter, possibly zero.
    pub diameter: u32,
}

/// Backdrop for the planet with `seed`, filling a `width x height` view.
#[must_use]
pub fn generate_backdrop(seed: Seed, (width, height): (u32, u32)) -> Vec<BackdropStar> {
    let mut rng = SeededRng::new(seed.derive(ORBIT_BACKDROP));
    let total = rng.next_int(MAX_BACKDROP_STARS);
    (0..total)
        .map(|_| {
            let diameter = rng.next_int(MAX_BACKDROP_DIAMETER);
            let x = rng.next_int(width);
            let y = rng.next_int(height);
            BackdropStar { x, y, diameter }
        })
        .collect()
}
