//! # NEBULA
//!
//! Host for an infinite procedural universe.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  INPUT / RENDER LAYER                       │
//! │          (window, pointer, keyboard; outside NEBULA)        │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │ InputSender                   │ Frame
//! ┌──────────────▼──────────────────────────────┴───────────────┐
//! │                         Session                             │
//! │  ┌──────────────────┐  ┌───────────────┐  ┌──────────────┐  │
//! │  │  ViewportPager   │  │ OrbitSimulator│  │  LandView    │  │
//! │  │  (cells, stars,  │  │ (moons,       │  │ (noise,      │  │
//! │  │   planets)       │  │  backdrop)    │  │  palettes)   │  │
//! │  └──────────────────┘  └───────────────┘  └──────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use nebula::{load_config, resolve_seed, InputEvent, Heading, Session};
//!
//! let config = load_config(None)?;
//! let (seed, _) = resolve_seed(Some(4324), None, &config)?;
//! let mut session = Session::new(&config, seed);
//!
//! session.sender().send(InputEvent::Move(Heading::Right));
//! let frame = session.frame(Duration::from_millis(16));
//! println!("{} cells at {:?}", frame.cells.len(), frame.position);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod events;
pub mod session;
pub mod startup;

pub use error::{NebulaError, NebulaResult};
pub use events::{Heading, InputEvent, InputQueue, InputSender};
pub use session::{Frame, LandView, Mode, Session, INPUT_CAPACITY, MAX_VIEW_DIMENSION};
pub use startup::{load_config, resolve_seed, SeedOrigin};
