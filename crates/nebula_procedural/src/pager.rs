//! # Viewport Pager
//!
//! Holds exactly the cells under the observer's viewport.
//!
//! ## Visible Range
//!
//! The viewport is the closed rectangle `[x, x + width] x [y, y + height]`.
//! Its cell range is `floor(x / cw) ..= floor((x + width) / cw)` on each
//! axis. Only the viewport size decides how many cells are visible; the
//! cell size is a grid constant.
//!
//! A viewport never spans more than [`MAX_VISIBLE_SPAN`] cells per axis.
//! Larger sizes are clamped with a warning.
//!
//! ## Rebuilds
//!
//! Every move or resize recomputes the range. Cells still in range are
//! kept, cells that left it are dropped, and new coordinates are generated
//! through the grid.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cell::{Cell, CellCoord, CellSize};
use crate::grid::UniverseGrid;
use crate::planet::Planet;

/// Most cells a viewport may span on one axis.
pub const MAX_VISIBLE_SPAN: i64 = 32;

/// Observer position and viewport size in world units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// World X of the left edge.
    pub x: i64,
    /// World Y of the top edge.
    pub y: i64,
    /// Width, at least 1.
    pub width: i64,
    /// Height, at least 1.
    pub height: i64,
}

impl Viewport {
    /// Creates a viewport, clamping dimensions below 1 up to 1.
    #[must_use]
    pub fn new((x, y): (i64, i64), (width, height): (i64, i64)) -> Self {
        if width < 1 || height < 1 {
            warn!(width, height, "viewport dimensions below 1; clamping");
        }
        Self {
            x,
            y,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Cells whose bounds intersect this viewport.
    #[must_use]
    pub fn cell_range(&self, size: CellSize) -> CellRange {
        CellRange {
            min: CellCoord::from_world_pos(self.x, self.y, size),
            max: CellCoord::from_world_pos(
                self.x.saturating_add(self.width),
                self.y.saturating_add(self.height),
                size,
            ),
        }
    }
}

/// Inclusive rectangle of cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left cell.
    pub min: CellCoord,
    /// Bottom-right cell (inclusive).
    pub max: CellCoord,
}

impl CellRange {
    /// True if `coord` lies in the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.y..=self.max.y).contains(&coord.y)
    }

    /// Number of cells in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        let columns = i64::from(self.max.x) - i64::from(self.min.x) + 1;
        let rows = i64::from(self.max.y) - i64::from(self.min.y) + 1;
        usize::try_from(columns.max(0) * rows.max(0)).unwrap_or(usize::MAX)
    }

    /// True if the range holds no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coordinates column by column, top to bottom within a column.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| CellCoord::new(x, y)))
    }
}

/// Pages cells in and out as the viewport moves.
#[derive(Debug)]
pub struct ViewportPager {
    /// Seed registry and generator.
    grid: UniverseGrid,
    /// Current viewport.
    viewport: Viewport,
    /// Range the held cells cover.
    range: CellRange,
    /// Exactly the cells in `range`, in `range.iter()` order.
    cells: Vec<Cell>,
}

impl ViewportPager {
    /// Creates a pager and materializes the initial viewport.
    #[must_use]
    pub fn new(grid: UniverseGrid, position: (i64, i64), size: (i64, i64)) -> Self {
        let viewport = Viewport::new(position, size);
        let range = viewport.cell_range(grid.cell_size());
        let mut pager = Self {
            grid,
            viewport,
            range,
            cells: Vec::new(),
        };
        pager.set_viewport(viewport);
        pager
    }

    /// Moves and resizes in one rebuild.
    pub fn update(&mut self, position: (i64, i64), size: (i64, i64)) {
        self.set_viewport(Viewport::new(position, size));
    }

    /// Moves the observer to an absolute position.
    pub fn move_to(&mut self, position: (i64, i64)) {
        self.update(position, (self.viewport.width, self.viewport.height));
    }

    /// Moves the observer by a delta.
    pub fn pan(&mut self, dx: i64, dy: i64) {
        let position = (
            self.viewport.x.saturating_add(dx),
            self.viewport.y.saturating_add(dy),
        );
        self.move_to(position);
    }

    /// Changes the viewport size, keeping its position.
    pub fn resize(&mut self, size: (i64, i64)) {
        self.update((self.viewport.x, self.viewport.y), size);
    }

    /// Observer position (viewport top-left).
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (i64, i64) {
        (self.viewport.x, self.viewport.y)
    }

    /// Current viewport.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Range of the held cells.
    #[inline]
    #[must_use]
    pub const fn visible_range(&self) -> CellRange {
        self.range
    }

    /// The held cells.
    #[inline]
    #[must_use]
    pub fn visible_cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Held cell containing the world point, if it is visible.
    #[must_use]
    pub fn find_cell_at(&self, x: i64, y: i64) -> Option<&Cell> {
        let coord = CellCoord::from_world_pos(x, y, self.grid.cell_size());
        if !self.range.contains(coord) {
            return None;
        }
        self.cells.iter().find(|cell| cell.coord() == coord)
    }

    /// Planet under the world point among the visible cells.
    #[must_use]
    pub fn planet_at(&self, x: i64, y: i64) -> Option<&Planet> {
        self.find_cell_at(x, y)?.planet_at(x, y)
    }

    /// Seed registry.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &UniverseGrid {
        &self.grid
    }

    fn set_viewport(&mut self, mut viewport: Viewport) {
        let size = self.grid.cell_size();
        // w <= cw * (span - 1) keeps floor((x + w) / cw) - floor(x / cw) < span
        let max_width = i64::from(size.width) * (MAX_VISIBLE_SPAN - 1);
        let max_height = i64::from(size.height) * (MAX_VISIBLE_SPAN - 1);
        if viewport.width > max_width || viewport.height > max_height {
            warn!(
                width = viewport.width,
                height = viewport.height,
                max_width,
                max_height,
                "viewport spans too many cells; clamping"
            );
            viewport.width = viewport.width.min(max_width);
            viewport.height = viewport.height.min(max_height);
        }

        self.viewport = viewport;
        let range = viewport.cell_range(self.grid.cell_size());
        if range != self.range || self.cells.is_empty() {
            self.range = range;
            self.rebuild();
        }
    }

    /// Regenerates `cells` for `range`, keeping cells still in range.
    fn rebuild(&mut self) {
        let range = self.range;
        let mut previous: HashMap<CellCoord, Cell> = self
            .cells
            .drain(..)
            .filter(|cell| range.contains(cell.coord()))
            .map(|cell| (cell.coord(), cell))
            .collect();
        let reused = previous.len();

        let mut cells = Vec::with_capacity(range.len());
        for coord in range.iter() {
            match previous.remove(&coord) {
                Some(cell) => cells.push(cell),
                None => cells.push(self.grid.get_or_create_cell(coord)),
            }
        }
        self.cells = cells;

        debug!(
            min_x = range.min.x,
            min_y = range.min.y,
            max_x = range.max.x,
            max_y = range.max.y,
            cells = self.cells.len(),
            reused,
            "viewport rebuilt"
        );
    }
}
