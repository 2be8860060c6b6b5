//! # Universe Grid
//!
//! Registry mapping cell coordinates to cell seeds for one running
//! universe. A seed is derived the first time its coordinate is asked for
//! and never changes afterwards; the registry only grows.

use std::collections::HashMap;

use nebula_shared::NebulaConfig;

use crate::cell::{Cell, CellCoord, CellGenerator, CellSize};
use crate::seed::Seed;

/// Coordinate to seed registry plus the generator that fills cells.
#[derive(Clone, Debug)]
pub struct UniverseGrid {
    /// Root seed of this universe.
    universe_seed: Seed,
    /// Shared cell generator.
    generator: CellGenerator,
    /// Seeds of every coordinate requested so far.
    seeds: HashMap<CellCoord, Seed>,
}

impl UniverseGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(universe_seed: Seed, generator: CellGenerator) -> Self {
        Self {
            universe_seed,
            generator,
            seeds: HashMap::new(),
        }
    }

    /// Grid with default tunables and 800x800 cells.
    #[must_use]
    pub fn with_defaults(universe_seed: Seed) -> Self {
        Self::new(universe_seed, CellGenerator::with_defaults())
    }

    /// Grid using the generation and grid sections of `config`.
    #[must_use]
    pub fn from_config(universe_seed: Seed, config: &NebulaConfig) -> Self {
        let generator = CellGenerator::new(config.generation.clone(), config.grid.into());
        Self::new(universe_seed, generator)
    }

    /// Root seed.
    #[inline]
    #[must_use]
    pub const fn universe_seed(&self) -> Seed {
        self.universe_seed
    }

    /// Geometry shared by every cell.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> CellSize {
        self.generator.size()
    }

    /// Cell generator.
    #[inline]
    #[must_use]
    pub const fn generator(&self) -> &CellGenerator {
        &self.generator
    }

    /// Seed of the cell at `coord`, registering it on first access.
    pub fn seed_for(&mut self, coord: CellCoord) -> Seed {
        let universe_seed = self.universe_seed;
        *self
            .seeds
            .entry(coord)
            .or_insert_with(|| universe_seed.for_cell(coord))
    }

    /// Generates the cell at `coord` from its registered seed.
    pub fn get_or_create_cell(&mut self, coord: CellCoord) -> Cell {
        let seed = self.seed_for(coord);
        self.generator.generate(seed, coord)
    }

    /// Number of coordinates with a registered seed.
    #[inline]
    #[must_use]
    pub fn known_cells(&self) -> usize {
        self.seeds.len()
    }

    /// True if `coord` has been requested before.
    #[must_use]
    pub fn is_known(&self, coord: CellCoord) -> bool {
        self.seeds.contains_key(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable_across_visits() {
        let mut grid = UniverseGrid::with_defaults(Seed::new(4324));
        let first = grid.get_or_create_cell(CellCoord::new(2, 3));
        let second = grid.get_or_create_cell(CellCoord::new(2, 3));

        assert_eq!(first.seed(), second.seed());
        assert_eq!(first, second);
        assert_eq!(grid.known_cells(), 1);
    }

    #[test]
    fn test_visit_order_does_not_matter() {
        let coords: Vec<CellCoord> = (-2..=2)
            .flat_map(|x| (-2..=2).map(move |y| CellCoord::new(x, y)))
            .collect();

        let mut forward = UniverseGrid::with_defaults(Seed::new(99));
        let mut backward = UniverseGrid::with_defaults(Seed::new(99));
        let a: Vec<Seed> = coords.iter().map(|&c| forward.seed_for(c)).collect();
        let mut b: Vec<Seed> = coords.iter().rev().map(|&c| backward.seed_for(c)).collect();
        b.reverse();

        assert_eq!(a, b);
    }

    #[test]
    fn test_registry_only_grows() {
        let mut grid = UniverseGrid::with_defaults(Seed::new(1));
        assert!(!grid.is_known(CellCoord::new(0, 0)));
        for x in 0..10 {
            grid.seed_for(CellCoord::new(x, 0));
            grid.seed_for(CellCoord::new(0, 0));
        }
        assert_eq!(grid.known_cells(), 10);
        assert!(grid.is_known(CellCoord::new(9, 0)));
    }

    #[test]
    fn test_from_config_uses_grid_section() {
        let config = NebulaConfig::from_toml_str("[grid]\ncell_width = 400\ncell_height = 300\n")
            .expect("valid config");
        let grid = UniverseGrid::from_config(Seed::new(3), &config);
        assert_eq!(grid.cell_size(), CellSize::new(400, 300));
    }
}
