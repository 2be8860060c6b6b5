//! Headless walk through a universe.
//!
//! Flies in one direction, orbits the first planet under the pointer and
//! reports what it saw.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nebula::{load_config, resolve_seed, Heading, InputEvent, Mode, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(name = "nebula_explorer")]
#[command(about = "Walk through an infinite procedural universe")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Universe seed
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Seed text, used when no integer seed is given
    #[arg(short, long)]
    phrase: Option<String>,

    /// Directional steps to take
    #[arg(long, default_value = "200")]
    steps: u32,

    /// Direction of travel
    #[arg(long, value_enum, default_value = "right")]
    heading: Direction,

    /// Orbit frames to simulate once a planet is found
    #[arg(long, default_value = "100")]
    orbit_ticks: u32,

    /// Orbit speed multiplier
    #[arg(long, default_value = "1")]
    speed: u8,

    /// Open the land view after orbiting
    #[arg(long)]
    land: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let (seed, origin) =
        resolve_seed(cli.seed, cli.phrase.as_deref(), &config).context("failed to pick a seed")?;
    info!(%seed, %origin, "seed resolved");

    let mut session = Session::new(&config, seed);
    let input = session.sender();

    let mut planets_seen = 0usize;
    let mut stars_seen = 0usize;
    for _ in 0..cli.steps {
        input.send(InputEvent::Move(cli.heading.into()));
        let frame = session.frame(FRAME);
        planets_seen = planets_seen.max(frame.cells.iter().map(|c| c.planets().len()).sum());
        stars_seen = stars_seen.max(frame.cells.iter().map(|c| c.stars().len()).sum());
    }

    let (x, y) = session.pager().position();
    let known = session.pager().grid().known_cells();
    println!("seed {seed} ({origin})");
    println!("position ({x}, {y}), {known} cells seeded");
    println!("most on screen: {planets_seen} planets, {stars_seen} stars");

    let target = session
        .pager()
        .visible_cells()
        .iter()
        .flat_map(|cell| cell.planets())
        .next()
        .copied();
    let Some(planet) = target else {
        println!("no planet in view");
        return Ok(());
    };

    input.send(InputEvent::PointerMoved {
        x: planet.center_x() - x,
        y: planet.center_y() - y,
    });
    input.send(InputEvent::Select);
    input.send(InputEvent::SetSpeed(cli.speed));

    let mut last = None;
    for _ in 0..cli.orbit_ticks {
        last = session.frame(FRAME).orbit;
    }
    if session.mode() != Mode::Orbiting {
        println!("could not open planet at ({}, {})", planet.center_x(), planet.center_y());
        return Ok(());
    }

    println!(
        "orbiting planet seed {} radius {} with {} moons",
        planet.seed,
        planet.radius,
        session.orbit().moons().len()
    );
    if let Some(frame) = last {
        for (level, moon) in frame.moons.iter().enumerate() {
            println!(
                "  moon {}: radius {:.0} angle {:.3} at ({:.1}, {:.1})",
                level + 1,
                moon.radius,
                moon.angle,
                moon.center.x,
                moon.center.y
            );
        }
    }

    if cli.land {
        input.send(InputEvent::OpenLand);
        let frame = session.frame(FRAME);
        if let Some(land) = frame.land {
            let map = land.map();
            println!(
                "land '{}' {}x{} heights [{:.3}, {:.3}]",
                land.palette().name(),
                map.width(),
                map.height(),
                map.min(),
                map.max()
            );
        }
        input.send(InputEvent::CloseLand);
    }

    input.send(InputEvent::CloseOrbit);
    if let Some(closed) = session.frame(FRAME).orbit_closed {
        println!("orbit closed after {} ticks", closed.ticks);
    }

    Ok(())
}
