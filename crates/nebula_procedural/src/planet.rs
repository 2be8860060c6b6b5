//! Planets and the data derived from their seeds.

use nebula_shared::{Rgb, Vec2};

use crate::rng::SeededRng;
use crate::seed::Seed;

/// Moon count is `radius * next_int(MOON_COUNT_DRAW) / MOON_COUNT_NORMALIZER`.
const MOON_COUNT_DRAW: u32 = 10;
const MOON_COUNT_NORMALIZER: u32 = 50;

/// Every moon is at least this large.
const MIN_MOON_RADIUS: u32 = 5;

/// A planet placed in a cell.
///
/// `x`/`y` are the world-space top-left of the bounding box; the circle's
/// centre is offset by `radius` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Planet {
    /// World X of the bounding box's left edge.
    pub x: i64,
    /// World Y of the bounding box's top edge.
    pub y: i64,
    /// Radius in world units.
    pub radius: u32,
    /// Surface colour.
    pub color: Rgb,
    /// Seed for moons, land and the orbit backdrop.
    pub seed: Seed,
}

impl Planet {
    /// World X of the centre.
    #[inline]
    #[must_use]
    pub const fn center_x(&self) -> i64 {
        self.x + self.radius as i64
    }

    /// World Y of the centre.
    #[inline]
    #[must_use]
    pub const fn center_y(&self) -> i64 {
        self.y + self.radius as i64
    }

    /// Centre as a point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x() as f64, self.center_y() as f64)
    }

    /// Width of the bounding box.
    #[inline]
    #[must_use]
    pub const fn diameter(&self) -> i64 {
        2 * self.radius as i64
    }

    /// True if the world point lies strictly inside the circle.
    #[must_use]
    pub fn contains_point(&self, x: i64, y: i64) -> bool {
        let dx = i128::from(x - self.center_x());
        let dy = i128::from(y - self.center_y());
        let r = i128::from(self.radius);
        dx * dx + dy * dy < r * r
    }

    /// Radii of this planet's moons, innermost orbit first.
    ///
    /// A pure function of the planet's seed and radius: larger planets
    /// tend to carry more, larger moons.
    #[must_use]
    pub fn moon_radii(&self) -> Vec<u32> {
        let mut rng = SeededRng::new(self.seed);
        let draw = rng.next_int(MOON_COUNT_DRAW);
        let total = self.radius * draw / MOON_COUNT_NORMALIZER;
        (0..total)
            .map(|_| rng.next_int(self.radius / 2) + MIN_MOON_RADIUS)
            .collect()
    }
}
