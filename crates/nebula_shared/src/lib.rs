//! # NEBULA Shared
//!
//! Common types used by the generator, the orbit simulator and the host.
//!
//! ## Rule
//!
//! This crate holds data and configuration only. Anything that draws a
//! random number belongs in `nebula_procedural` or `nebula_orbit`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;

pub use color::Rgb;
pub use config::{
    GenerationConfig, GridConfig, NavigationConfig, NebulaConfig, OrbitConfig, PaletteConfig,
    PaletteLayerConfig, UniverseConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use math::Vec2;
