//! # Session
//!
//! One running universe, driven frame by frame.
//!
//! ```text
//!              Select (over planet)             OpenLand / Select
//!  Exploring ───────────────────────> Orbiting ───────────────────> Landing
//!      ^                                 │  ^                          │
//!      └──────────── CloseOrbit ─────────┘  └──────── CloseLand ───────┘
//! ```
//!
//! Movement only applies while exploring. The orbit only advances while
//! its view is in front.

use std::time::Duration;

use nebula_orbit::{OrbitClosed, OrbitFrame, OrbitSimulator};
use nebula_procedural::seed::purpose::{LAND_HEIGHT, LAND_PALETTE};
use nebula_procedural::{
    Cell, LandMap, Palette, PaletteBook, Planet, Seed, SimplexNoise, UniverseGrid, ViewportPager,
};
use nebula_shared::{NebulaConfig, Rgb};
use tracing::{debug, info, warn};

use crate::events::{InputEvent, InputQueue, InputSender};

/// Undrained input events held before senders start dropping.
pub const INPUT_CAPACITY: usize = 1024;

/// Largest orbit and land view dimension in pixels.
pub const MAX_VIEW_DIMENSION: u32 = 4096;

/// Which view is in front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Flying over the universe.
    #[default]
    Exploring,
    /// Watching a planet's moons.
    Orbiting,
    /// Looking at a planet's surface.
    Landing,
}

/// Surface of one planet.
#[derive(Clone, Debug, PartialEq)]
pub struct LandView {
    planet: Planet,
    palette: Palette,
    map: LandMap,
}

impl LandView {
    /// Samples the surface of `planet` over a `width x height` view.
    ///
    /// `None` if the palette book is empty.
    #[must_use]
    pub fn new(planet: Planet, palettes: &PaletteBook, (width, height): (u32, u32)) -> Option<Self> {
        let palette = palettes.choose(planet.seed.derive(LAND_PALETTE))?.clone();
        let noise = SimplexNoise::new(planet.seed.derive(LAND_HEIGHT));
        let map = LandMap::sample(&noise, width, height);
        Some(Self {
            planet,
            palette,
            map,
        })
    }

    /// Planet shown.
    #[must_use]
    pub const fn planet(&self) -> &Planet {
        &self.planet
    }

    /// Land type of the planet.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Sampled heights.
    #[must_use]
    pub const fn map(&self) -> &LandMap {
        &self.map
    }

    /// Colour of one pixel.
    #[must_use]
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb> {
        self.map.color_at(x, y, &self.palette)
    }

    /// Row-major colours of every pixel.
    #[must_use]
    pub fn render(&self) -> Vec<Option<Rgb>> {
        self.map.render(&self.palette)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    /// View in front.
    pub mode: Mode,
    /// Observer position.
    pub position: (i64, i64),
    /// Cells under the viewport.
    pub cells: &'a [Cell],
    /// Planet under the pointer while exploring.
    pub hovered: Option<Planet>,
    /// Moon snapshot while orbiting.
    pub orbit: Option<OrbitFrame>,
    /// Surface while landing.
    pub land: Option<&'a LandView>,
    /// Set on the frame an orbit closed.
    pub orbit_closed: Option<OrbitClosed>,
}

/// A running universe.
#[derive(Debug)]
pub struct Session {
    pager: ViewportPager,
    orbit: OrbitSimulator,
    palettes: PaletteBook,
    move_speed: i64,
    queue: InputQueue,
    mode: Mode,
    /// Last pointer position in screen coordinates.
    pointer: Option<(i64, i64)>,
    land: Option<LandView>,
    /// Close signal waiting for the next frame.
    closed: Option<OrbitClosed>,
    frames: u64,
}

impl Session {
    /// Starts a universe at the origin.
    #[must_use]
    pub fn new(config: &NebulaConfig, seed: Seed) -> Self {
        let navigation = config.navigation;
        let view = (navigation.viewport_width, navigation.viewport_height);
        let pager = ViewportPager::new(
            UniverseGrid::from_config(seed, config),
            (0, 0),
            (i64::from(view.0), i64::from(view.1)),
        );
        info!(seed = seed.value(), width = view.0, height = view.1, "universe started");

        Self {
            pager,
            orbit: OrbitSimulator::new(config.orbit, view),
            palettes: PaletteBook::from_config(&config.palettes),
            move_speed: navigation.move_speed,
            queue: InputQueue::new(INPUT_CAPACITY),
            mode: Mode::Exploring,
            pointer: None,
            land: None,
            closed: None,
            frames: 0,
        }
    }

    /// Handle for the input layer.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        self.queue.sender()
    }

    /// View in front.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Pager holding the visible cells.
    #[inline]
    #[must_use]
    pub const fn pager(&self) -> &ViewportPager {
        &self.pager
    }

    /// Orbit simulator.
    #[inline]
    #[must_use]
    pub const fn orbit(&self) -> &OrbitSimulator {
        &self.orbit
    }

    /// Land view while landing.
    #[must_use]
    pub fn land(&self) -> Option<&LandView> {
        self.land.as_ref()
    }

    /// Frames produced so far.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Pointer position in world coordinates.
    #[must_use]
    pub fn pointer_world(&self) -> Option<(i64, i64)> {
        let (sx, sy) = self.pointer?;
        let (px, py) = self.pager.position();
        Some((px.saturating_add(sx), py.saturating_add(sy)))
    }

    /// Planet under the pointer, while exploring.
    #[must_use]
    pub fn hovered_planet(&self) -> Option<&Planet> {
        if self.mode != Mode::Exploring {
            return None;
        }
        let (x, y) = self.pointer_world()?;
        self.pager.planet_at(x, y)
    }

    /// Applies one event immediately.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pan { dx, dy } => self.travel(dx, dy),
            InputEvent::Move(heading) => {
                let (dx, dy) = heading.delta(self.move_speed);
                self.travel(dx, dy);
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::PointerMoved { x, y } => self.pointer = Some((x, y)),
            InputEvent::Select => self.select(),
            InputEvent::SetSpeed(multiplier) => {
                if self.mode == Mode::Orbiting {
                    self.orbit.set_speed_multiplier(multiplier);
                }
            }
            InputEvent::CloseOrbit => {
                if self.mode == Mode::Orbiting {
                    self.closed = self.orbit.close();
                    self.mode = Mode::Exploring;
                }
            }
            InputEvent::OpenLand => {
                if self.mode == Mode::Orbiting {
                    self.open_land();
                }
            }
            InputEvent::CloseLand => {
                if self.mode == Mode::Landing {
                    self.land = None;
                    self.mode = Mode::Orbiting;
                    debug!("land view closed");
                }
            }
        }
    }

    /// Drains pending input, advances the orbit by `dt` and returns what
    /// to draw.
    pub fn frame(&mut self, dt: Duration) -> Frame<'_> {
        for event in self.queue.drain() {
            self.apply(event);
        }

        let orbit = if self.mode == Mode::Orbiting {
            self.orbit.step(dt)
        } else {
            None
        };
        let hovered = self.hovered_planet().copied();
        self.frames += 1;

        Frame {
            mode: self.mode,
            position: self.pager.position(),
            cells: self.pager.visible_cells(),
            hovered,
            orbit,
            land: self.land.as_ref(),
            orbit_closed: self.closed.take(),
        }
    }

    fn resize(&mut self, width: i64, height: i64) {
        self.pager.resize((width, height));
        self.orbit.resize(view_dimension(width), view_dimension(height));

        let Some(planet) = self.land.as_ref().map(|land| *land.planet()) else {
            return;
        };
        self.land = LandView::new(planet, &self.palettes, self.orbit.view());
        if self.land.is_none() {
            self.mode = Mode::Orbiting;
        }
        debug!(view = ?self.orbit.view(), "land view resampled");
    }

    fn travel(&mut self, dx: i64, dy: i64) {
        if self.mode == Mode::Exploring {
            self.pager.pan(dx, dy);
        } else {
            debug!(dx, dy, mode = ?self.mode, "movement disabled");
        }
    }

    fn select(&mut self) {
        match self.mode {
            Mode::Exploring => {
                if let Some(planet) = self.hovered_planet().copied() {
                    self.orbit.open(planet);
                    self.mode = Mode::Orbiting;
                }
            }
            Mode::Orbiting => {
                let over = self
                    .pointer
                    .is_some_and(|(x, y)| self.orbit.is_over_planet(x as f64, y as f64));
                if over {
                    self.open_land();
                }
            }
            Mode::Landing => {}
        }
    }

    fn open_land(&mut self) {
        let Some(planet) = self.orbit.planet().copied() else {
            return;
        };
        match LandView::new(planet, &self.palettes, self.orbit.view()) {
            Some(land) => {
                info!(seed = planet.seed.value(), palette = land.palette().name(), "land view opened");
                self.land = Some(land);
                self.mode = Mode::Landing;
            }
            None => warn!("no land palettes configured"),
        }
    }
}

/// Window dimension as a view size in `[1, MAX_VIEW_DIMENSION]`.
fn view_dimension(value: i64) -> u32 {
    let clamped = value.clamp(1, i64::from(MAX_VIEW_DIMENSION));
    if clamped != value {
        warn!(value, clamped, "view dimension out of range; clamping");
    }
    u32::try_from(clamped).unwrap_or(MAX_VIEW_DIMENSION)
}
