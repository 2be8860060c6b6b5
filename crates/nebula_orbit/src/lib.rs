//! # NEBULA Orbit Simulation
//!
//! Simplified moon orbits around one selected planet.
//!
//! ## Model
//!
//! - Planet mass comes from its volume: `(4/3) * pi * r^3 * density`
//! - Minimum orbital velocity: `v0 = sqrt(G * mass / r)`
//! - Moon `level` (1-based) orbits at `r + level * separation` with angular
//!   velocity `v0 * (1 / (0.5 * level) + 1)`
//!
//! Moons never interact. There is no decay and no collision.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use nebula_orbit::OrbitSimulator;
//!
//! let mut orbit = OrbitSimulator::with_defaults((800, 800));
//! orbit.open(planet);
//! let frame = orbit.step(Duration::from_millis(10));
//! let closed = orbit.close();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backdrop;
pub mod simulator;

pub use backdrop::{generate_backdrop, BackdropStar};
pub use simulator::{Moon, MoonPosition, OrbitClosed, OrbitFrame, OrbitSimulator};
