//! # Cell System
//!
//! World space is organized into fixed-size cells for:
//! - Memory efficiency (only visible cells are held)
//! - Fast paging (generate/discard on demand)
//! - Reproducibility (a cell is a pure function of its seed)
//!
//! ## Cell Content
//!
//! Each cell holds a star field and a set of planets that never overlap
//! one another. The same seed at a different coordinate yields the same
//! shapes, shifted into that cell's world-space bounds.
//!
//! ## Draw Order
//!
//! The random stream is consumed in a fixed order: planet count, then per
//! candidate `radius, x, y, r, g, b, seed`, then star count, then per star
//! `radius, x, y`. Rejected candidates still consume their draws.

use bytemuck::{Pod, Zeroable};
use nebula_shared::constants::COLOR_CHANNEL_RANGE;
use nebula_shared::{GenerationConfig, GridConfig, Rgb};
use tracing::{debug, warn};

use crate::placement::PlacementIndex;
use crate::planet::Planet;
use crate::rng::SeededRng;
use crate::seed::Seed;

/// Cell coordinate (identifies a cell in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// X coordinate (in cells, not world units).
    pub x: i32,
    /// Y coordinate (in cells, not world units).
    pub y: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts a world position to the cell containing it.
    #[inline]
    #[must_use]
    pub fn from_world_pos(world_x: i64, world_y: i64, size: CellSize) -> Self {
        Self {
            x: floor_cell_coordinate(world_x, size.width),
            y: floor_cell_coordinate(world_y, size.height),
        }
    }

    /// World position of the cell's top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(self, size: CellSize) -> (i64, i64) {
        (
            self.x as i64 * size.width as i64,
            self.y as i64 * size.height as i64,
        )
    }
}

/// Cell index of world coordinate `x` for cells `size` wide.
///
/// Floor division, so negative coordinates land in negative cells:
/// with `size = 800`, `-1 -> -1`, `0 -> 0`, `799 -> 0`, `800 -> 1`.
/// Indices beyond the `i32` range saturate.
#[inline]
#[must_use]
pub fn floor_cell_coordinate(x: i64, size: u32) -> i32 {
    let cell = x.div_euclid(i64::from(size.max(1)));
    i32::try_from(cell).unwrap_or(if cell < 0 { i32::MIN } else { i32::MAX })
}

/// Width and height of every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSize {
    /// Width in world units.
    pub width: u32,
    /// Height in world units.
    pub height: u32,
}

impl CellSize {
    /// Creates a cell size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<GridConfig> for CellSize {
    fn from(grid: GridConfig) -> Self {
        Self::new(grid.cell_width, grid.cell_height)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        GridConfig::default().into()
    }
}

/// A decorative star. `x`/`y` are the world-space top-left of its box.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Star {
    /// World X of the bounding box's left edge.
    pub x: i64,
    /// World Y of the bounding box's top edge.
    pub y: i64,
    /// Radius in world units.
    pub radius: i64,
}

/// A generated cell of the universe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Cell position in the world.
    coord: CellCoord,
    /// Seed every piece of content was drawn from.
    seed: Seed,
    /// Geometry the content was generated for.
    size: CellSize,
    /// Star field.
    stars: Vec<Star>,
    /// Planets sorted by `x`.
    planets: PlacementIndex,
    /// Planets accepted after the retry budget ran out.
    degraded_placements: u32,
}

impl Cell {
    /// Cell position in the grid.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Seed the cell was generated from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Cell geometry.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> CellSize {
        self.size
    }

    /// World position of the top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> (i64, i64) {
        self.coord.origin(self.size)
    }

    /// World-space bounds as `(min_x, min_y, max_x, max_y)`, max exclusive.
    #[must_use]
    pub const fn bounds(&self) -> (i64, i64, i64, i64) {
        let (x, y) = self.origin();
        (
            x,
            y,
            x + self.size.width as i64,
            y + self.size.height as i64,
        )
    }

    /// True if the world point falls inside this cell.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        CellCoord::from_world_pos(x, y, self.size) == self.coord
    }

    /// Star field.
    #[inline]
    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Star field as raw bytes for upload to a renderer.
    #[must_use]
    pub fn star_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stars)
    }

    /// Planets in ascending `x`.
    #[inline]
    #[must_use]
    pub fn planets(&self) -> &[Planet] {
        self.planets.as_slice()
    }

    /// Planet under the world point, if any.
    #[must_use]
    pub fn planet_at(&self, x: i64, y: i64) -> Option<&Planet> {
        self.planets.planet_at(x, y)
    }

    /// Planets that had to be accepted while overlapping.
    #[inline]
    #[must_use]
    pub const fn degraded_placements(&self) -> u32 {
        self.degraded_placements
    }
}

/// Cell generator.
///
/// Holds only read-only tunables, so disjoint cells can be generated in
/// any order, or in parallel, with identical results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGenerator {
    /// Content tunables.
    config: GenerationConfig,
    /// Cell geometry.
    size: CellSize,
}

impl CellGenerator {
    /// Creates a generator.
    ///
    /// The config should have passed `GenerationConfig::validate`; bodies
    /// too large for the cell are still clamped to fit rather than panic.
    #[must_use]
    pub fn new(config: GenerationConfig, size: CellSize) -> Self {
        Self { config, size }
    }

    /// Generator with default tunables and 800x800 cells.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(GenerationConfig::default(), CellSize::default())
    }

    /// Cell geometry.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> CellSize {
        self.size
    }

    /// Content tunables.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates the cell at `coord` from `seed`.
    #[must_use]
    pub fn generate(&self, seed: Seed, coord: CellCoord) -> Cell {
        let mut rng = SeededRng::new(seed);
        let origin = coord.origin(self.size);

        let total_planets = self.config.min_planets + rng.next_int(self.config.planet_count_range);
        let mut planets = PlacementIndex::with_capacity(total_planets as usize);
        let mut degraded_placements = 0;

        for _ in 0..total_planets {
            if !self.place_planet(&mut rng, origin, &mut planets) {
                degraded_placements += 1;
            }
        }

        let stars = self.generate_stars(&mut rng, origin);

        debug!(
            x = coord.x,
            y = coord.y,
            seed = seed.value(),
            planets = planets.len(),
            stars = stars.len(),
            "generated cell"
        );
        if degraded_placements > 0 {
            warn!(
                x = coord.x,
                y = coord.y,
                degraded_placements,
                "placement budget exhausted; accepted overlapping planets"
            );
        }

        Cell {
            coord,
            seed,
            size: self.size,
            stars,
            planets,
            degraded_placements,
        }
    }

    /// Draws candidates until one fits or the budget runs out.
    ///
    /// Returns `false` if the least-overlapping candidate had to be taken.
    fn place_planet(
        &self,
        rng: &mut SeededRng,
        origin: (i64, i64),
        planets: &mut PlacementIndex,
    ) -> bool {
        let mut best: Option<(Planet, f64)> = None;

        for _ in 0..self.config.max_placement_attempts.max(1) {
            let candidate = self.draw_planet(rng, origin);
            match planets.max_penetration(&candidate) {
                None => {
                    planets.insert_sorted(candidate);
                    return true;
                }
                Some(depth) => match best {
                    Some((_, best_depth)) if best_depth <= depth => {}
                    _ => best = Some((candidate, depth)),
                },
            }
        }

        if let Some((planet, _)) = best {
            planets.insert_sorted(planet);
        }
        false
    }

    /// Draws one planet candidate fully inside the cell.
    fn draw_planet(&self, rng: &mut SeededRng, (origin_x, origin_y): (i64, i64)) -> Planet {
        let radius = rng.next_inclusive(
            self.config.min_planet_radius,
            self.config.max_planet_radius.max(self.config.min_planet_radius),
        );
        let x = i64::from(rng.next_int(span(self.size.width, radius))) + origin_x;
        let y = i64::from(rng.next_int(span(self.size.height, radius))) + origin_y;
        let color = Rgb::new(
            channel(rng.next_int(COLOR_CHANNEL_RANGE)),
            channel(rng.next_int(COLOR_CHANNEL_RANGE)),
            channel(rng.next_int(COLOR_CHANNEL_RANGE)),
        );
        let seed = Seed::new(u64::from(rng.next_int(self.config.planet_seed_range)));

        Planet {
            x,
            y,
            radius,
            color,
            seed,
        }
    }

    /// Draws the star field.
    fn generate_stars(&self, rng: &mut SeededRng, (origin_x, origin_y): (i64, i64)) -> Vec<Star> {
        let total = self.config.min_stars + rng.next_int(self.config.star_count_range);
        let mut stars = Vec::with_capacity(total as usize);

        for _ in 0..total {
            let radius = rng.next_inclusive(
                self.config.min_star_radius,
                self.config.max_star_radius.max(self.config.min_star_radius),
            );
            let x = i64::from(rng.next_int(span(self.size.width, radius))) + origin_x;
            let y = i64::from(rng.next_int(span(self.size.height, radius))) + origin_y;
            stars.push(Star {
                x,
                y,
                radius: i64::from(radius),
            });
        }

        stars
    }
}

/// Exclusive bound for a box `2 * radius` wide inside `extent`.
#[inline]
fn span(extent: u32, radius: u32) -> u32 {
    extent.saturating_sub(radius.saturating_mul(2)).max(1)
}

#[inline]
fn channel(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
