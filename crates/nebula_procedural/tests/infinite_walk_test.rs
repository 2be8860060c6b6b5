//! # Infinite Walk Integration Test
//!
//! Proves the observer can travel forever in any direction: the held cells
//! always match the viewport and every revisited cell comes back unchanged.

use nebula_procedural::{CellCoord, Seed, UniverseGrid, ViewportPager};
use std::time::Instant;

const STEP: i64 = 20;

/// Test: Walk 2,000 steps west, through negative cells, then back.
#[test]
fn test_walk_west_and_back() {
    let grid = UniverseGrid::with_defaults(Seed::new(42));
    let mut pager = ViewportPager::new(grid, (0, 0), (800, 600));
    let home = pager.visible_cells().to_vec();

    let start = Instant::now();
    for step in 0..2_000 {
        pager.pan(-STEP, 0);

        if step % 100 == 0 {
            let range = pager.visible_range();
            assert_eq!(pager.visible_cells().len(), range.len(), "held cells drifted at step {step}");
        }
    }
    assert_eq!(pager.position(), (-40_000, 0));
    assert_eq!(pager.visible_range().min, CellCoord::new(-50, 0));

    for _ in 0..2_000 {
        pager.pan(STEP, 0);
    }

    let elapsed = start.elapsed();
    println!("Walked 4,000 steps in {elapsed:?}");
    println!("Known cells: {}", pager.grid().known_cells());

    assert_eq!(pager.position(), (0, 0));
    assert_eq!(pager.visible_cells(), home.as_slice(), "home changed after the round trip");
}

/// Test: Walk in a spiral pattern, checking cell invariants along the way.
#[test]
fn test_spiral_walk_coverage() {
    let grid = UniverseGrid::with_defaults(Seed::new(12345));
    let mut pager = ViewportPager::new(grid, (0, 0), (800, 800));

    let mut direction = 0; // 0=E, 1=S, 2=W, 3=N
    let mut leg_length = 1;
    let mut steps_in_leg = 0;
    let mut legs_completed = 0;

    for step in 0..3_000 {
        let (dx, dy) = match direction {
            0 => (STEP * 8, 0),
            1 => (0, STEP * 8),
            2 => (-STEP * 8, 0),
            _ => (0, -STEP * 8),
        };
        pager.pan(dx, dy);

        steps_in_leg += 1;
        if steps_in_leg >= leg_length {
            steps_in_leg = 0;
            direction = (direction + 1) % 4;
            legs_completed += 1;
            if legs_completed % 2 == 0 {
                leg_length += 1;
            }
        }

        if step % 250 == 0 {
            for cell in pager.visible_cells() {
                assert!(
                    cell.planets().windows(2).all(|w| w[0].x <= w[1].x),
                    "unsorted planets in {:?}",
                    cell.coord()
                );
            }
        }
    }

    println!("Final position: {:?}", pager.position());
    println!("Known cells: {}", pager.grid().known_cells());
    assert!(pager.grid().known_cells() > 100);
}

/// Test: Teleporting far away and back reproduces the same cells.
#[test]
fn test_teleport_stress() {
    let grid = UniverseGrid::with_defaults(Seed::new(99_999));
    let mut pager = ViewportPager::new(grid, (0, 0), (800, 800));

    let targets = [
        (1_000_000, 1_000_000),
        (-1_000_000, 500_000),
        (123_456_789, -987_654_321),
        (-1_700_000_000_000, 1_700_000_000_000),
    ];

    for target in targets {
        pager.move_to(target);
        let first = pager.visible_cells().to_vec();
        pager.move_to((0, 0));
        pager.move_to(target);
        assert_eq!(pager.visible_cells(), first.as_slice(), "teleport to {target:?} not reproducible");
    }
}

/// Test: Two universes with the same seed agree no matter the visit order.
#[test]
fn test_exploration_order_independence() {
    let mut east_first = UniverseGrid::with_defaults(Seed::new(4324));
    let mut west_first = UniverseGrid::with_defaults(Seed::new(4324));

    let coords: Vec<CellCoord> = (-5..=5).map(|x| CellCoord::new(x, x / 2)).collect();
    for &coord in &coords {
        east_first.get_or_create_cell(coord);
    }
    for &coord in coords.iter().rev() {
        west_first.get_or_create_cell(coord);
    }

    for &coord in &coords {
        assert_eq!(east_first.get_or_create_cell(coord), west_first.get_or_create_cell(coord));
    }
}
