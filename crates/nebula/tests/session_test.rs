//! # Session Scenario Tests
//!
//! Drives a session through its input queue, one frame at a time.

use std::thread;
use std::time::Duration;

use nebula::{Heading, InputEvent, Mode, Session, INPUT_CAPACITY};
use nebula_procedural::{Cell, Planet, Seed};
use nebula_shared::NebulaConfig;

const FRAME: Duration = Duration::from_millis(16);

fn session(seed: u64) -> Session {
    Session::new(&NebulaConfig::default(), Seed::new(seed))
}

fn first_visible_planet(session: &Session) -> Planet {
    *session
        .pager()
        .visible_cells()
        .iter()
        .flat_map(Cell::planets)
        .next()
        .expect("every cell holds planets")
}

fn select(session: &Session, planet: &Planet) {
    let (x, y) = session.pager().position();
    let input = session.sender();
    input.send(InputEvent::PointerMoved {
        x: planet.center_x() - x,
        y: planet.center_y() - y,
    });
    input.send(InputEvent::Select);
}

/// Test: events sent from another thread are applied on the next frame.
#[test]
fn test_input_from_another_thread() {
    let mut session = session(4324);
    let input = session.sender();

    let producer = thread::spawn(move || {
        for _ in 0..50 {
            assert!(input.send(InputEvent::Move(Heading::Right)));
        }
    });
    producer.join().expect("producer finished");

    let frame = session.frame(FRAME);
    assert_eq!(frame.position, (1000, 0));
    assert_eq!(frame.mode, Mode::Exploring);
    // 800x800 view at x=1000 touches cell columns 1..=2 and rows 0..=1
    assert_eq!(frame.cells.len(), 4);
}

/// Test: equal seeds and equal input give equal universes.
#[test]
fn test_sessions_are_reproducible() {
    let mut a = session(99);
    let mut b = session(99);

    for heading in [Heading::Down, Heading::Left, Heading::Left, Heading::Up] {
        for _ in 0..30 {
            a.sender().send(InputEvent::Move(heading));
            b.sender().send(InputEvent::Move(heading));
        }
        let fa: Vec<Cell> = a.frame(FRAME).cells.to_vec();
        let fb: Vec<Cell> = b.frame(FRAME).cells.to_vec();
        assert_eq!(fa, fb);
    }
}

/// Test: flying away and back shows the same cells.
#[test]
fn test_return_trip_shows_same_cells() {
    let mut session = session(4324);
    let start: Vec<Cell> = session.frame(FRAME).cells.to_vec();

    session.sender().send(InputEvent::Pan { dx: 50_000, dy: -30_000 });
    let away = session.frame(FRAME);
    assert!(away.cells.iter().all(|c| !start.contains(c)));

    session.sender().send(InputEvent::Pan { dx: -50_000, dy: 30_000 });
    assert_eq!(session.frame(FRAME).cells, start.as_slice());
}

/// Test: select, orbit for a while, then close.
#[test]
fn test_orbit_lifecycle() {
    let mut session = session(4324);
    let planet = first_visible_planet(&session);

    let before = session.frame(FRAME);
    assert!(before.orbit.is_none());
    select(&session, &planet);

    for tick in 1..=30_u64 {
        let frame = session.frame(FRAME);
        assert_eq!(frame.mode, Mode::Orbiting);
        assert!(frame.hovered.is_none());
        let orbit = frame.orbit.expect("orbit open");
        assert_eq!(orbit.ticks, tick);
        assert_eq!(orbit.planet_radius, f64::from(planet.radius));
        assert_eq!(orbit.moons.len(), planet.moon_radii().len());
    }

    // Movement is ignored while orbiting
    session.sender().send(InputEvent::Move(Heading::Down));
    session.sender().send(InputEvent::CloseOrbit);
    let frame = session.frame(FRAME);
    assert_eq!(frame.mode, Mode::Exploring);
    assert_eq!(frame.position, (0, 0));
    let closed = frame.orbit_closed.expect("closed this frame");
    assert_eq!(closed.planet, planet);
    assert_eq!(closed.ticks, 30);

    let next = session.frame(FRAME);
    assert!(next.orbit_closed.is_none());
    assert!(next.orbit.is_none());

    session.sender().send(InputEvent::Move(Heading::Down));
    assert_eq!(session.frame(FRAME).position, (0, 20));
}

/// Test: a faster multiplier moves moons further in the same time.
#[test]
fn test_speed_multiplier_through_queue() {
    let with_moons = (0..200).find(|&seed| {
        !first_visible_planet(&session(seed))
            .moon_radii()
            .is_empty()
    });
    let Some(seed) = with_moons else {
        return;
    };

    let travel = |multiplier: u8| {
        let mut session = session(seed);
        let planet = first_visible_planet(&session);
        select(&session, &planet);
        session.frame(FRAME);

        session.sender().send(InputEvent::SetSpeed(multiplier));
        let first = session.frame(FRAME).orbit.expect("open").moons[0].angle;
        let mut last = first;
        for _ in 0..10 {
            last = session.frame(FRAME).orbit.expect("open").moons[0].angle;
        }
        last - first
    };

    let slow = travel(1);
    let fast = travel(4);
    assert!(fast > slow);
    assert!((fast - 4.0 * slow).abs() < 1e-9);
}

/// Test: land view opens from the orbit and closes back into it.
#[test]
fn test_land_from_orbit() {
    let mut session = session(7);
    let planet = first_visible_planet(&session);
    select(&session, &planet);
    session.frame(FRAME);

    session.sender().send(InputEvent::OpenLand);
    let frame = session.frame(FRAME);
    assert_eq!(frame.mode, Mode::Landing);
    assert!(frame.orbit.is_none());
    let land = frame.land.expect("land open");
    assert_eq!(land.planet(), &planet);
    assert_eq!((land.map().width(), land.map().height()), (800, 800));
    let palette = land.palette().name().to_owned();

    session.sender().send(InputEvent::CloseLand);
    let frame = session.frame(FRAME);
    assert_eq!(frame.mode, Mode::Orbiting);
    assert!(frame.land.is_none());
    assert!(frame.orbit.is_some());

    // Same planet, same land
    session.sender().send(InputEvent::OpenLand);
    let again = session.frame(FRAME).land.expect("land open");
    assert_eq!(again.palette().name(), palette);
}

/// Test: a full queue drops new events instead of blocking.
#[test]
fn test_full_queue_drops_events() {
    let mut session = session(1);
    let input = session.sender();

    for _ in 0..INPUT_CAPACITY {
        assert!(input.send(InputEvent::Pan { dx: 1, dy: 0 }));
    }
    assert!(!input.send(InputEvent::Pan { dx: 1, dy: 0 }));

    let capacity = i64::try_from(INPUT_CAPACITY).expect("small capacity");
    assert_eq!(session.frame(FRAME).position, (capacity, 0));
    assert!(input.send(InputEvent::Pan { dx: 1, dy: 0 }));
}
