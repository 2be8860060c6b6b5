//! # Land View
//!
//! Colours a planet's surface from a height field.
//!
//! A [`LandMap`] samples a [`HeightSource`] once per pixel and records the
//! observed range. A [`Palette`] then buckets each height: a pixel takes the
//! first layer whose threshold, rescaled into `[min, max]`, is not exceeded.

use nebula_shared::{PaletteConfig, Rgb};

use crate::rng::SeededRng;
use crate::seed::Seed;

/// Deterministic height function over integer pixel coordinates.
pub trait HeightSource {
    /// Height at `(x, y)`. Equal inputs always give equal outputs.
    fn height_at(&self, x: i32, y: i32) -> f64;
}

impl<F> HeightSource for F
where
    F: Fn(i32, i32) -> f64,
{
    fn height_at(&self, x: i32, y: i32) -> f64 {
        self(x, y)
    }
}

/// One land type: colour layers in ascending threshold order.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    layers: Vec<(f64, Rgb)>,
}

impl Palette {
    /// Creates a palette. `layers` must ascend by threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, layers: Vec<(f64, Rgb)>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    /// Palette described by a config entry.
    #[must_use]
    pub fn from_config(config: &PaletteConfig) -> Self {
        Self::new(
            config.name.clone(),
            config
                .layers
                .iter()
                .map(|layer| (layer.threshold, layer.color))
                .collect(),
        )
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(threshold, colour)` layers.
    #[must_use]
    pub fn layers(&self) -> &[(f64, Rgb)] {
        &self.layers
    }

    /// Colour of `value` within the range `[min, max]`.
    ///
    /// `None` if the value lies above every layer.
    #[must_use]
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Option<Rgb> {
        let range = max - min;
        self.layers
            .iter()
            .find(|(threshold, _)| value - min <= range * threshold)
            .map(|&(_, color)| color)
    }
}

/// Every known land type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaletteBook {
    palettes: Vec<Palette>,
}

impl PaletteBook {
    /// Book holding `palettes` in order.
    #[must_use]
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    /// Book built from the configured palettes.
    #[must_use]
    pub fn from_config(configs: &[PaletteConfig]) -> Self {
        Self::new(configs.iter().map(Palette::from_config).collect())
    }

    /// Number of palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True if the book holds no palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palettes in configured order.
    #[must_use]
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Land type for `seed`: `SeededRng(seed).next_int(len)`.
    #[must_use]
    pub fn choose(&self, seed: Seed) -> Option<&Palette> {
        let len = u32::try_from(self.palettes.len()).unwrap_or(u32::MAX);
        let index = SeededRng::new(seed).next_int(len) as usize;
        self.palettes.get(index)
    }
}

/// Heights sampled over a `width x height` pixel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LandMap {
    width: u32,
    height: u32,
    /// Row-major heights.
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl LandMap {
    /// Samples `source` at every pixel.
    #[must_use]
    pub fn sample(source: &impl HeightSource, width: u32, height: u32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for y in 0..height {
            for x in 0..width {
                let value = source.height_at(x as i32, y as i32);
                min = min.min(value);
                max = max.max(value);
                values.push(value);
            }
        }
        if values.is_empty() {
            (min, max) = (0.0, 0.0);
        }

        Self {
            width,
            height,
            values,
            min,
            max,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Lowest sampled value.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Highest sampled value.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Sampled value at a pixel, `None` outside the map.
    #[must_use]
    pub fn value_at(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Colour of a pixel under `palette`.
    #[must_use]
    pub fn color_at(&self, x: u32, y: u32, palette: &Palette) -> Option<Rgb> {
        palette.color_for(self.value_at(x, y)?, self.min, self.max)
    }

    /// Row-major colours of every pixel.
    #[must_use]
    pub fn render(&self, palette: &Palette) -> Vec<Option<Rgb>> {
        self.values
            .iter()
            .map(|&value| palette.color_for(value, self.min, self.max))
            .collect()
    }
}
