//! # Universe Constants
//!
//! Default tunables. Every value here can be overridden from the TOML
//! configuration; these are what an empty config file produces.

// =============================================================================
// GRID
// =============================================================================

/// Default cell width in world units.
pub const CELL_WIDTH: u32 = 800;

/// Default cell height in world units.
pub const CELL_HEIGHT: u32 = 800;

// =============================================================================
// CELL CONTENT
// =============================================================================

/// Minimum number of planets in a cell.
pub const MIN_PLANETS: u32 = 10;

/// Planet count is `MIN_PLANETS + next_int(PLANET_COUNT_RANGE)`.
pub const PLANET_COUNT_RANGE: u32 = 20;

/// Smallest planet radius.
pub const MIN_PLANET_RADIUS: u32 = 5;

/// Largest planet radius (inclusive).
pub const MAX_PLANET_RADIUS: u32 = 29;

/// Planet seeds are drawn from `[0, PLANET_SEED_RANGE)`.
pub const PLANET_SEED_RANGE: u32 = 1_000_000;

/// Minimum number of stars in a cell.
pub const MIN_STARS: u32 = 100;

/// Star count is `MIN_STARS + next_int(STAR_COUNT_RANGE)`.
pub const STAR_COUNT_RANGE: u32 = 900;

/// Smallest star radius.
pub const MIN_STAR_RADIUS: u32 = 1;

/// Largest star radius (inclusive).
pub const MAX_STAR_RADIUS: u32 = 4;

/// Candidates drawn per planet before placement degrades.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 256;

/// Exclusive upper bound for colour channel draws.
pub const COLOR_CHANNEL_RANGE: u32 = 255;

// =============================================================================
// NAVIGATION
// =============================================================================

/// World units moved per directional key press.
pub const MOVE_SPEED: i64 = 20;

/// Default viewport width.
pub const VIEWPORT_WIDTH: u32 = 800;

/// Default viewport height.
pub const VIEWPORT_HEIGHT: u32 = 800;

/// Universe seeds picked at random land in `[0, RANDOM_SEED_RANGE)`.
pub const RANDOM_SEED_RANGE: u64 = 100_000;

// =============================================================================
// ORBIT
// =============================================================================

/// Gravitational constant (N m^2 / kg^2).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// Density used to turn planet volume into a mass proxy (kg / m^3).
pub const BODY_DENSITY: f64 = 2000.0;

/// Distance between consecutive moon orbits.
pub const ORBIT_SEPARATION: f64 = 50.0;

/// Converts angular velocity into radians per simulated second.
pub const ORBIT_TIME_SCALE: f64 = 10.0;

/// Speed multiplier an orbit view opens with.
pub const DEFAULT_SPEED_MULTIPLIER: u8 = 1;

/// Largest speed multiplier the host may select.
pub const MAX_SPEED_MULTIPLIER: u8 = 10;
