use glam::{IVec2, Vec2};
use munchman::{
    constants::GRID_DIMENSION,
    map::{
        direction::Direction,
        grid::{cell_center, cell_of, is_aligned},
    },
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_out_of_bounds_is_blocked() {
    let grid = common::open_grid(3, 3);

    assert_that(&grid.is_walkable(IVec2::new(-1, 0))).is_false();
    assert_that(&grid.is_walkable(IVec2::new(0, 3))).is_false();
    assert_that(&grid.is_open(IVec2::ZERO, Direction::Left)).is_false();
    assert_that(&grid.is_open(IVec2::ZERO, Direction::Up)).is_true();
}

#[test]
fn test_ascii_grid_is_y_up() {
    let grid = common::grid(&["#.", ".#"]);

    // Bottom row comes last in the drawing
    assert_that(&grid.is_walkable(IVec2::new(0, 0))).is_true();
    assert_that(&grid.is_walkable(IVec2::new(1, 0))).is_false();
    assert_that(&grid.is_walkable(IVec2::new(0, 1))).is_false();
    assert_that(&grid.is_walkable(IVec2::new(1, 1))).is_true();
}

#[test]
fn test_open_directions_and_neighbours() {
    let grid = common::grid(&["###", "#..", "#.#"]);
    let cell = IVec2::new(1, 1);

    assert_that(&grid.open_directions(cell).to_vec()).is_equal_to(vec![Direction::Down, Direction::Right]);
    assert_that(&grid.neighbours(cell).to_vec()).is_equal_to(vec![IVec2::new(1, 0), IVec2::new(2, 1)]);
}

#[test]
fn test_cell_conversions() {
    assert_that(&cell_of(Vec2::new(0.0, 0.0))).is_equal_to(IVec2::ZERO);
    assert_that(&cell_of(Vec2::new(22.9, 23.0))).is_equal_to(IVec2::new(0, 1));
    assert_that(&cell_center(IVec2::new(2, 1))).is_equal_to(Vec2::new(2.5 * GRID_DIMENSION, 1.5 * GRID_DIMENSION));

    for x in 0..4 {
        for y in 0..4 {
            let cell = IVec2::new(x, y);
            assert_that(&cell_of(cell_center(cell))).is_equal_to(cell);
        }
    }
}

#[test]
fn test_alignment_tolerance() {
    let center = cell_center(IVec2::new(1, 1));

    assert_that(&is_aligned(center)).is_true();
    assert_that(&is_aligned(center + Vec2::new(1.0, -1.0))).is_true();
    assert_that(&is_aligned(center + Vec2::new(1.5, 0.0))).is_false();
    assert_that(&is_aligned(center + Vec2::new(0.0, -2.0))).is_false();
}
