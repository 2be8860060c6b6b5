//! # Placement Index
//!
//! Planets of one cell, kept sorted by `x`, answering "does this circle
//! overlap anything already placed" without scanning the whole list.
//!
//! ## Range Scan
//!
//! Sorting by `x` alone says nothing about `y`, so a midpoint search can
//! step past a planet that overlaps in 2-D. Instead every planet whose
//! x-extent can reach the candidate is examined:
//!
//! ```text
//! overlap needs |cx_a - cx_b| < r_a + r_b
//!   => candidate.x - 2 * max_radius < other.x < candidate.x + 2 * candidate.radius
//! ```
//!
//! Two binary searches bound that window; only planets inside it are
//! distance-checked.

use crate::planet::Planet;

/// Sorted planets of one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementIndex {
    /// Ascending by `x`; equal `x` keeps insertion order.
    planets: Vec<Planet>,
    /// Largest radius inserted so far.
    max_radius: u32,
}

impl PlacementIndex {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            planets: Vec::new(),
            max_radius: 0,
        }
    }

    /// Creates an empty index with room for `capacity` planets.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            planets: Vec::with_capacity(capacity),
            max_radius: 0,
        }
    }

    /// Number of placed planets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// True if nothing is placed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Placed planets in ascending `x`.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Planet] {
        &self.planets
    }

    /// Inserts keeping ascending `x`. Returns the insertion index.
    ///
    /// O(log n) search + O(n) shift.
    pub fn insert_sorted(&mut self, planet: Planet) -> usize {
        let index = self.planets.partition_point(|p| p.x <= planet.x);
        self.planets.insert(index, planet);
        self.max_radius = self.max_radius.max(planet.radius);
        index
    }

    /// True if `candidate` overlaps any placed planet.
    ///
    /// Touching circles (centre distance equal to the radius sum) do not
    /// overlap.
    #[must_use]
    pub fn overlaps_any(&self, candidate: &Planet) -> bool {
        self.window(candidate).iter().any(|p| overlaps(p, candidate))
    }

    /// Deepest penetration of `candidate` into any placed planet, or `None`
    /// when it overlaps nothing.
    #[must_use]
    pub fn max_penetration(&self, candidate: &Planet) -> Option<f64> {
        self.window(candidate)
            .iter()
            .filter(|p| overlaps(p, candidate))
            .map(|p| {
                let reach = f64::from(p.radius) + f64::from(candidate.radius);
                reach - p.center().distance(candidate.center())
            })
            .reduce(f64::max)
    }

    /// Planet containing the world point, nearest centre first.
    #[must_use]
    pub fn planet_at(&self, x: i64, y: i64) -> Option<&Planet> {
        let reach = 2 * i64::from(self.max_radius);
        self.between(x - reach, x)
            .iter()
            .filter(|p| p.contains_point(x, y))
            .min_by_key(|p| {
                let dx = i128::from(x - p.center_x());
                let dy = i128::from(y - p.center_y());
                dx * dx + dy * dy
            })
    }

    /// Planets whose x-extent can reach `candidate`.
    fn window(&self, candidate: &Planet) -> &[Planet] {
        if self.planets.is_empty() {
            return &[];
        }
        let low = candidate.x - 2 * i64::from(self.max_radius);
        let high = candidate.x + candidate.diameter();
        self.between(low, high)
    }

    /// Planets with `low <= x <= high`.
    fn between(&self, low: i64, high: i64) -> &[Planet] {
        let start = self.planets.partition_point(|p| p.x < low);
        let end = self.planets.partition_point(|p| p.x <= high);
        if start >= end {
            &[]
        } else {
            &self.planets[start..end]
        }
    }
}

/// Strict circle overlap in exact integer arithmetic.
fn overlaps(a: &Planet, b: &Planet) -> bool {
    let dx = i128::from(a.center_x() - b.center_x());
    let dy = i128::from(a.center_y() - b.center_y());
    let reach = i128::from(a.radius) + i128::from(b.radius);
    dx * dx + dy * dy < reach * reach
}
