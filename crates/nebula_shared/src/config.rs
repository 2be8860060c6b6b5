//! # Configuration
//!
//! Loaded once at startup from TOML. Every section is optional; an empty
//! document yields the defaults in [`crate::constants`].
//!
//! ```toml
//! [universe]
//! seed = 4324
//!
//! [grid]
//! cell_width = 800
//! cell_height = 800
//!
//! [[palettes]]
//! name = "oceanic"
//! layers = [
//!     { threshold = 0.45, color = "#1d3b8f" },
//!     { threshold = 1.0, color = "#3f8f3a" },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants;
use crate::error::{ConfigError, ConfigResult};

/// Root configuration document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    /// Universe identity.
    pub universe: UniverseConfig,
    /// Cell content tunables.
    pub generation: GenerationConfig,
    /// Grid geometry.
    pub grid: GridConfig,
    /// Observer movement and initial viewport.
    pub navigation: NavigationConfig,
    /// Orbit simulation constants.
    pub orbit: OrbitConfig,
    /// Land palettes, one per land type.
    pub palettes: Vec<PaletteConfig>,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig::default(),
            generation: GenerationConfig::default(),
            grid: GridConfig::default(),
            navigation: NavigationConfig::default(),
            orbit: OrbitConfig::default(),
            palettes: PaletteConfig::builtin(),
        }
    }
}

impl NebulaConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when values cannot generate a universe.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`NebulaConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> ConfigResult<()> {
        self.generation.validate(&self.grid)?;
        self.navigation.validate()?;
        self.orbit.validate()?;
        if self.palettes.is_empty() {
            return Err(invalid("at least one palette is required"));
        }
        for palette in &self.palettes {
            palette.validate()?;
        }
        Ok(())
    }
}

/// Universe identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    /// Root seed. `None` means pick one at random.
    pub seed: Option<i64>,
}

/// Cell content tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minimum planets per cell.
    pub min_planets: u32,
    /// Extra planets drawn from `[0, planet_count_range)`.
    pub planet_count_range: u32,
    /// Smallest planet radius.
    pub min_planet_radius: u32,
    /// Largest planet radius (inclusive).
    pub max_planet_radius: u32,
    /// Exclusive bound for planet seeds.
    pub planet_seed_range: u32,
    /// Minimum stars per cell.
    pub min_stars: u32,
    /// Extra stars drawn from `[0, star_count_range)`.
    pub star_count_range: u32,
    /// Smallest star radius.
    pub min_star_radius: u32,
    /// Largest star radius (inclusive).
    pub max_star_radius: u32,
    /// Candidates drawn per planet before placement degrades.
    pub max_placement_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_planets: constants::MIN_PLANETS,
            planet_count_range: constants::PLANET_COUNT_RANGE,
            min_planet_radius: constants::MIN_PLANET_RADIUS,
            max_planet_radius: constants::MAX_PLANET_RADIUS,
            planet_seed_range: constants::PLANET_SEED_RANGE,
            min_stars: constants::MIN_STARS,
            star_count_range: constants::STAR_COUNT_RANGE,
            min_star_radius: constants::MIN_STAR_RADIUS,
            max_star_radius: constants::MAX_STAR_RADIUS,
            max_placement_attempts: constants::MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Checks that every body can fit inside a cell of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self, grid: &GridConfig) -> ConfigResult<()> {
        if self.min_planet_radius == 0 || self.min_star_radius == 0 {
            return Err(invalid("body radii must be at least 1"));
        }
        if self.min_planet_radius > self.max_planet_radius {
            return Err(invalid("min_planet_radius exceeds max_planet_radius"));
        }
        if self.min_star_radius > self.max_star_radius {
            return Err(invalid("min_star_radius exceeds max_star_radius"));
        }
        let largest = self.max_planet_radius.max(self.max_star_radius);
        let narrowest = grid.cell_width.min(grid.cell_height);
        if u64::from(narrowest) <= 2 * u64::from(largest) {
            return Err(invalid(format!(
                "cells of {}x{} cannot hold a body of radius {largest}",
                grid.cell_width, grid.cell_height
            )));
        }
        if self.planet_seed_range == 0 {
            return Err(invalid("planet_seed_range must be positive"));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid("max_placement_attempts must be positive"));
        }
        Ok(())
    }
}

/// Grid geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell width in world units.
    pub cell_width: u32,
    /// Cell height in world units.
    pub cell_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: constants::CELL_WIDTH,
            cell_height: constants::CELL_HEIGHT,
        }
    }
}

/// Observer movement and initial viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// World units moved per directional step.
    pub move_speed: i64,
    /// Initial viewport width.
    pub viewport_width: u32,
    /// Initial viewport height.
    pub viewport_height: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            move_speed: constants::MOVE_SPEED,
            viewport_width: constants::VIEWPORT_WIDTH,
            viewport_height: constants::VIEWPORT_HEIGHT,
        }
    }
}

impl NavigationConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.move_speed <= 0 {
            return Err(invalid("move_speed must be positive"));
        }
        Ok(())
    }
}

/// Orbit simulation constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Gravitational constant.
    pub gravitational_constant: f64,
    /// Density turning volume into mass.
    pub density: f64,
    /// Distance between consecutive orbits.
    pub orbit_separation: f64,
    /// Radians per simulated second per unit of angular velocity.
    pub time_scale: f64,
    /// Multiplier an orbit view opens with.
    pub default_speed_multiplier: u8,
    /// Largest selectable multiplier.
    pub max_speed_multiplier: u8,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: constants::GRAVITATIONAL_CONSTANT,
            density: constants::BODY_DENSITY,
            orbit_separation: constants::ORBIT_SEPARATION,
            time_scale: constants::ORBIT_TIME_SCALE,
            default_speed_multiplier: constants::DEFAULT_SPEED_MULTIPLIER,
            max_speed_multiplier: constants::MAX_SPEED_MULTIPLIER,
        }
    }
}

impl OrbitConfig {
    fn validate(&self) -> ConfigResult<()> {
        let positive = [
            self.gravitational_constant,
            self.density,
            self.orbit_separation,
            self.time_scale,
        ];
        if positive.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(invalid("orbit constants must be finite and positive"));
        }
        if self.default_speed_multiplier > self.max_speed_multiplier {
            return Err(invalid("default_speed_multiplier exceeds max_speed_multiplier"));
        }
        Ok(())
    }
}

/// One land type: ordered colour layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Display name.
    pub name: String,
    /// Layers in ascending threshold order.
    pub layers: Vec<PaletteLayerConfig>,
}

/// A colour used for heights up to `threshold` of the sampled range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteLayerConfig {
    /// Normalized threshold in `[0, 1]`.
    pub threshold: f64,
    /// Layer colour.
    pub color: Rgb,
}

impl PaletteConfig {
    /// Palettes used when the configuration names none.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        let palette = |name: &str, layers: &[(f64, [u8; 3])]| Self {
            name: name.to_owned(),
            layers: layers
                .iter()
                .map(|&(threshold, [r, g, b])| PaletteLayerConfig {
                    threshold,
                    color: Rgb::new(r, g, b),
                })
                .collect(),
        };
        vec![
            palette(
                "oceanic",
                &[
                    (0.35, [0x12, 0x2b, 0x6e]),
                    (0.50, [0x1d, 0x3b, 0x8f]),
                    (0.55, [0xd8, 0xc8, 0x8a]),
                    (0.80, [0x3f, 0x8f, 0x3a]),
                    (0.92, [0x6b, 0x5b, 0x4b]),
                    (1.00, [0xf2, 0xf2, 0xf2]),
                ],
            ),
            palette(
                "arid",
                &[
                    (0.20, [0x7a, 0x4a, 0x22]),
                    (0.60, [0xc9, 0x8d, 0x4e]),
                    (0.85, [0xe3, 0xb7, 0x78]),
                    (1.00, [0x8c, 0x5a, 0x3c]),
                ],
            ),
            palette(
                "glacial",
                &[
                    (0.30, [0x2e, 0x4a, 0x62]),
                    (0.70, [0xa9, 0xd6, 0xe5]),
                    (1.00, [0xff, 0xff, 0xff]),
                ],
            ),
        ]
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.layers.is_empty() {
            return Err(invalid(format!("palette {:?} has no layers", self.name)));
        }
        let mut previous = 0.0;
        for layer in &self.layers {
            if !(0.0..=1.0).contains(&layer.threshold) || layer.threshold < previous {
                return Err(invalid(format!(
                    "palette {:?} thresholds must ascend within [0, 1]",
                    self.name
                )));
            }
            previous = layer.threshold;
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
