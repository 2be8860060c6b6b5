//! # Orbit Simulator
//!
//! ```text
//!            open(planet)
//!   Closed ───────────────> Open(planet, moons, multiplier)
//!     ^                          │  tick(dt, m) / step(dt)
//!     │          close()         │  -> OrbitFrame
//!     └──────────────────────────┘
//!              -> OrbitClosed
//! ```
//!
//! The simulator owns no timer. The host decides when to call `tick` and
//! how much time passed; every call returns a fresh [`OrbitFrame`].

use std::f64::consts::PI;
use std::time::Duration;

use bytemuck::{Pod, Zeroable};
use nebula_procedural::seed::purpose::ORBIT_PHASE;
use nebula_procedural::{Planet, SeededRng};
use nebula_shared::{OrbitConfig, Vec2};
use tracing::{debug, info};

use crate::backdrop::{generate_backdrop, BackdropStar};

/// A moon circling the open planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moon {
    /// Radius in view units.
    pub radius: u32,
    /// 1-based rank by generation order.
    pub orbit_level: u32,
    /// Current angle in radians. Grows without wrapping.
    pub orbit_angle: f64,
}

/// Where a moon is drawn in one frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MoonPosition {
    /// Centre in view coordinates.
    pub center: Vec2,
    /// Radius in view units.
    pub radius: f64,
    /// Angle in radians.
    pub angle: f64,
}

/// Immutable snapshot of an open orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitFrame {
    /// Planet centre in view coordinates.
    pub center: Vec2,
    /// Planet radius.
    pub planet_radius: f64,
    /// One entry per moon, innermost orbit first.
    pub moons: Vec<MoonPosition>,
    /// Stored multiplier used by `step`.
    pub speed_multiplier: u8,
    /// Ticks applied since the orbit opened.
    pub ticks: u64,
}

impl OrbitFrame {
    /// Moon positions as raw bytes for upload to a renderer.
    #[must_use]
    pub fn moon_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.moons)
    }
}

/// Returned when an open orbit closes. Movement may resume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitClosed {
    /// Planet whose orbit closed.
    pub planet: Planet,
    /// Ticks applied while it was open.
    pub ticks: u64,
}

/// State of an open orbit.
#[derive(Clone, Debug)]
struct OpenOrbit {
    planet: Planet,
    moons: Vec<Moon>,
    /// Minimum orbital velocity of the planet.
    base_velocity: f64,
    backdrop: Vec<BackdropStar>,
    ticks: u64,
}

/// Orbit simulator.
#[derive(Clone, Debug)]
pub struct OrbitSimulator {
    config: OrbitConfig,
    /// View size in pixels.
    view: (u32, u32),
    /// Orbit centre, middle of the view.
    center: Vec2,
    speed_multiplier: u8,
    state: Option<OpenOrbit>,
}

impl OrbitSimulator {
    /// Creates a closed simulator for a view of `view` pixels.
    #[must_use]
    pub fn new(config: OrbitConfig, view: (u32, u32)) -> Self {
        Self {
            speed_multiplier: config.default_speed_multiplier,
            config,
            view,
            center: view_center(view),
            state: None,
        }
    }

    /// Simulator with default constants.
    #[must_use]
    pub fn with_defaults(view: (u32, u32)) -> Self {
        Self::new(OrbitConfig::default(), view)
    }

    /// Opens the orbit view for `planet`, replacing any open orbit.
    pub fn open(&mut self, planet: Planet) -> OrbitFrame {
        let mut phases = SeededRng::new(planet.seed.derive(ORBIT_PHASE));
        let moons: Vec<Moon> = planet
            .moon_radii()
            .into_iter()
            .zip(1..)
            .map(|(radius, orbit_level)| Moon {
                radius,
                orbit_level,
                orbit_angle: phases.next_f64() * PI,
            })
            .collect();

        let base_velocity = base_velocity(&self.config, planet.radius);
        info!(
            seed = planet.seed.value(),
            radius = planet.radius,
            moons = moons.len(),
            base_velocity,
            "orbit opened"
        );

        self.state = Some(OpenOrbit {
            planet,
            moons,
            base_velocity,
            backdrop: generate_backdrop(planet.seed, self.view),
            ticks: 0,
        });
        self.speed_multiplier = self.config.default_speed_multiplier;
        self.snapshot_or_empty()
    }

    /// Closes the orbit view, discarding the moons and resetting the
    /// multiplier. `None` if nothing was open.
    pub fn close(&mut self) -> Option<OrbitClosed> {
        let open = self.state.take()?;
        self.speed_multiplier = self.config.default_speed_multiplier;
        info!(seed = open.planet.seed.value(), ticks = open.ticks, "orbit closed");
        Some(OrbitClosed {
            planet: open.planet,
            ticks: open.ticks,
        })
    }

    /// True while a planet's orbit is open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// The open planet.
    #[must_use]
    pub fn planet(&self) -> Option<&Planet> {
        self.state.as_ref().map(|open| &open.planet)
    }

    /// Moons of the open planet. Empty when closed.
    #[must_use]
    pub fn moons(&self) -> &[Moon] {
        match &self.state {
            Some(open) => &open.moons,
            None => &[],
        }
    }

    /// Minimum orbital velocity of the open planet.
    #[must_use]
    pub fn base_velocity(&self) -> Option<f64> {
        self.state.as_ref().map(|open| open.base_velocity)
    }

    /// Angular velocity of a moon at `level`, in radians per simulated second.
    #[must_use]
    pub fn angular_velocity(&self, level: u32) -> Option<f64> {
        self.base_velocity().map(|v0| level_velocity(v0, level))
    }

    /// Distance from the planet centre to the orbit at `level`.
    #[must_use]
    pub fn orbit_radius(&self, level: u32) -> Option<f64> {
        self.planet()
            .map(|p| f64::from(p.radius) + f64::from(level) * self.config.orbit_separation)
    }

    /// Advances every moon by `dt` at `multiplier`.
    ///
    /// The multiplier is clamped to `[0, max_speed_multiplier]`. Returns
    /// `None` when closed.
    pub fn tick(&mut self, dt: Duration, multiplier: u8) -> Option<OrbitFrame> {
        let multiplier = multiplier.min(self.config.max_speed_multiplier);
        let scale = dt.as_secs_f64() * self.config.time_scale * f64::from(multiplier);
        let open = self.state.as_mut()?;

        for moon in &mut open.moons {
            moon.orbit_angle += level_velocity(open.base_velocity, moon.orbit_level) * scale;
        }
        open.ticks += 1;

        self.snapshot()
    }

    /// Advances every moon by `dt` at the stored multiplier.
    pub fn step(&mut self, dt: Duration) -> Option<OrbitFrame> {
        self.tick(dt, self.speed_multiplier)
    }

    /// Stores the multiplier used by `step`. Returns the clamped value.
    pub fn set_speed_multiplier(&mut self, multiplier: u8) -> u8 {
        self.speed_multiplier = multiplier.min(self.config.max_speed_multiplier);
        debug!(multiplier = self.speed_multiplier, "orbit speed changed");
        self.speed_multiplier
    }

    /// Multiplier used by `step`.
    #[inline]
    #[must_use]
    pub const fn speed_multiplier(&self) -> u8 {
        self.speed_multiplier
    }

    /// Resizes the view and recentres the orbit.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view = (width, height);
        self.center = view_center(self.view);
        if let Some(open) = self.state.as_mut() {
            open.backdrop = generate_backdrop(open.planet.seed, self.view);
        }
    }

    /// View size.
    #[inline]
    #[must_use]
    pub const fn view(&self) -> (u32, u32) {
        self.view
    }

    /// Orbit centre in view coordinates.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Top-left of the open planet's bounding box.
    #[must_use]
    pub fn planet_origin(&self) -> Option<Vec2> {
        let radius = f64::from(self.planet()?.radius);
        Some(self.center - Vec2::new(radius, radius))
    }

    /// True if the view point lies inside the open planet.
    #[must_use]
    pub fn is_over_planet(&self, x: f64, y: f64) -> bool {
        self.planet()
            .is_some_and(|p| Vec2::new(x, y).distance(self.center) < f64::from(p.radius))
    }

    /// Backdrop of the open planet. Empty when closed.
    #[must_use]
    pub fn backdrop_stars(&self) -> &[BackdropStar] {
        match &self.state {
            Some(open) => &open.backdrop,
            None => &[],
        }
    }

    /// Snapshot of the open orbit without advancing it.
    #[must_use]
    pub fn snapshot(&self) -> Option<OrbitFrame> {
        let open = self.state.as_ref()?;
        let planet_radius = f64::from(open.planet.radius);
        let moons = open
            .moons
            .iter()
            .map(|moon| {
                let distance =
                    planet_radius + f64::from(moon.orbit_level) * self.config.orbit_separation;
                MoonPosition {
                    center: self.center + Vec2::from_angle(moon.orbit_angle) * distance,
                    radius: f64::from(moon.radius),
                    angle: moon.orbit_angle,
                }
            })
            .collect();

        Some(OrbitFrame {
            center: self.center,
            planet_radius,
            moons,
            speed_multiplier: self.speed_multiplier,
            ticks: open.ticks,
        })
    }

    fn snapshot_or_empty(&self) -> OrbitFrame {
        self.snapshot().unwrap_or(OrbitFrame {
            center: self.center,
            planet_radius: 0.0,
            moons: Vec::new(),
            speed_multiplier: self.speed_multiplier,
            ticks: 0,
        })
    }
}

/// `sqrt(G * mass / r)` with mass from the planet's volume.
fn base_velocity(config: &OrbitConfig, radius: u32) -> f64 {
    let r = f64::from(radius.max(1));
    let mass = 4.0 / 3.0 * PI * r.powi(3) * config.density;
    (config.gravitational_constant * mass / r).sqrt()
}

/// `v0 * (1 / (0.5 * level) + 1)`: inner moons move faster.
fn level_velocity(v0: f64, level: u32) -> f64 {
    v0 * (1.0 / (0.5 * f64::from(level.max(1))) + 1.0)
}

fn view_center((width, height): (u32, u32)) -> Vec2 {
    Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_procedural::Seed;
    use nebula_shared::Rgb;

    fn planet(radius: u32, seed: u64) -> Planet {
        Planet {
            x: 1000,
            y: -400,
            radius,
            color: Rgb::new(10, 20, 30),
            seed: Seed::new(seed),
        }
    }

    /// First seed whose radius-`radius` planet has at least `min` moons.
    fn planet_with_moons(radius: u32, min: usize) -> Planet {
        (0..)
            .map(|seed| planet(radius, seed))
            .find(|p| p.moon_radii().len() >= min)
            .unwrap()
    }

    #[test]
    fn test_base_velocity() {
        // r = 25: mass = 4/3 pi 15625 * 2000
        let config = OrbitConfig::default();
        let v0 = base_velocity(&config, 25);
        let expected = (6.67e-11 * (4.0 / 3.0) * PI * 15_625.0 * 2000.0 / 25.0_f64).sqrt();
        assert!((v0 - expected).abs() < 1e-15);
        assert!(v0 > 0.0);
    }

    #[test]
    fn test_open_close_lifecycle() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        assert!(!orbit.is_open());
        assert!(orbit.close().is_none());
        assert!(orbit.step(Duration::from_millis(10)).is_none());

        let p = planet_with_moons(25, 1);
        let frame = orbit.open(p);
        assert!(orbit.is_open());
        assert_eq!(frame.moons.len(), p.moon_radii().len());
        assert_eq!(frame.ticks, 0);

        orbit.set_speed_multiplier(7);
        orbit.step(Duration::from_millis(10));
        let closed = orbit.close().unwrap();
        assert_eq!(closed.planet, p);
        assert_eq!(closed.ticks, 1);
        assert!(orbit.moons().is_empty());
        assert_eq!(orbit.speed_multiplier(), 1);
    }

    #[test]
    fn test_moon_levels_follow_generation_order() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        let p = planet_with_moons(29, 3);
        orbit.open(p);

        let radii: Vec<u32> = orbit.moons().iter().map(|m| m.radius).collect();
        assert_eq!(radii, p.moon_radii());
        for (i, moon) in orbit.moons().iter().enumerate() {
            assert_eq!(moon.orbit_level as usize, i + 1);
            assert!((0.0..PI).contains(&moon.orbit_angle));
        }
    }

    #[test]
    fn test_reopen_reproduces_phases() {
        let p = planet_with_moons(29, 2);
        let mut a = OrbitSimulator::with_defaults((800, 800));
        let mut b = OrbitSimulator::with_defaults((800, 800));
        assert_eq!(a.open(p), b.open(p));

        a.close();
        assert_eq!(a.open(p), b.snapshot().unwrap());
    }

    #[test]
    fn test_inner_moons_are_faster() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        orbit.open(planet(20, 1));
        let w1 = orbit.angular_velocity(1).unwrap();
        let w2 = orbit.angular_velocity(2).unwrap();
        let w5 = orbit.angular_velocity(5).unwrap();
        assert!(w1 > w2 && w2 > w5);
        assert!((w1 / orbit.base_velocity().unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_positions_lie_on_orbits() {
        let mut orbit = OrbitSimulator::with_defaults((600, 400));
        let p = planet_with_moons(29, 2);
        orbit.open(p);
        let frame = orbit.tick(Duration::from_millis(250), 3).unwrap();

        assert_eq!(frame.center, Vec2::new(300.0, 200.0));
        for (i, moon) in frame.moons.iter().enumerate() {
            let level = i as u32 + 1;
            let distance = moon.center.distance(frame.center);
            assert!((distance - orbit.orbit_radius(level).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_multiplier_freezes() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        let first = orbit.open(planet_with_moons(25, 1));
        let frozen = orbit.tick(Duration::from_millis(10), 0).unwrap();
        assert_eq!(first.moons, frozen.moons);
    }

    #[test]
    fn test_multiplier_is_clamped() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        assert_eq!(orbit.set_speed_multiplier(200), 10);

        let p = planet_with_moons(25, 1);
        let mut fast = OrbitSimulator::with_defaults((800, 800));
        let mut capped = OrbitSimulator::with_defaults((800, 800));
        fast.open(p);
        capped.open(p);
        let a = fast.tick(Duration::from_millis(10), 10).unwrap();
        let b = capped.tick(Duration::from_millis(10), 255).unwrap();
        assert_eq!(a.moons, b.moons);
    }

    #[test]
    fn test_resize_recentres() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        orbit.open(planet(20, 4));
        orbit.resize(1000, 500);

        assert_eq!(orbit.center(), Vec2::new(500.0, 250.0));
        assert_eq!(orbit.planet_origin(), Some(Vec2::new(480.0, 230.0)));
        assert!(orbit.is_over_planet(500.0, 250.0));
        assert!(orbit.is_over_planet(519.0, 250.0));
        assert!(!orbit.is_over_planet(520.0, 250.0));
        assert!(orbit
            .backdrop_stars()
            .iter()
            .all(|s| s.x < 1000 && s.y < 500));
    }

    #[test]
    fn test_closed_hit_test() {
        let orbit = OrbitSimulator::with_defaults((800, 800));
        assert!(!orbit.is_over_planet(400.0, 400.0));
        assert!(orbit.planet_origin().is_none());
        assert!(orbit.backdrop_stars().is_empty());
    }

    #[test]
    fn test_moon_bytes() {
        let mut orbit = OrbitSimulator::with_defaults((800, 800));
        let frame = orbit.open(planet_with_moons(29, 2));
        assert_eq!(frame.moon_bytes().len(), frame.moons.len() * 32);
    }
}
