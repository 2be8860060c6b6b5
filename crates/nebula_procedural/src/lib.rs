//! # NEBULA Procedural Generation
//!
//! Deterministic generation of an infinite 2-D universe.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same universe
//! 2. **Celled**: World space is tiled into fixed-size cells
//! 3. **Paged**: Only the cells under the viewport are held
//! 4. **Order independent**: Visiting cells in any order yields the same cells
//!
//! ## Core Components
//!
//! - `SeededRng`: The only source of randomness for generation
//! - `CellGenerator`: Produces stars and planets for one cell
//! - `PlacementIndex`: Sorted planets with range-scanned overlap queries
//! - `UniverseGrid`: Coordinate to seed registry
//! - `ViewportPager`: Materializes the visible cells
//! - `SimplexNoise` / `LandMap`: Land heights bucketed into palettes
//!
//! ## Example
//!
//! ```rust,ignore
//! use nebula_procedural::{Seed, UniverseGrid, ViewportPager};
//!
//! let grid = UniverseGrid::with_defaults(Seed::new(4324));
//! let mut pager = ViewportPager::new(grid, (0, 0), (800, 600));
//!
//! pager.pan(20, 0);
//! for cell in pager.visible_cells() {
//!     println!("{:?}: {} planets", cell.coord(), cell.planets().len());
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cell;
pub mod grid;
pub mod noise;
pub mod pager;
pub mod placement;
pub mod planet;
pub mod rng;
pub mod seed;
pub mod terrain;

pub use cell::{floor_cell_coordinate, Cell, CellCoord, CellGenerator, CellSize, Star};
pub use grid::UniverseGrid;
pub use noise::SimplexNoise;
pub use pager::{CellRange, Viewport, ViewportPager, MAX_VISIBLE_SPAN};
pub use placement::PlacementIndex;
pub use planet::Planet;
pub use rng::SeededRng;
pub use seed::Seed;
pub use terrain::{HeightSource, LandMap, Palette, PaletteBook};
