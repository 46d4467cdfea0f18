use bevy_ecs::{
    event::Events,
    system::RunSystemOnce,
    world::World,
};
use glam::IVec2;
use munchman::{
    constants::speed,
    error::GameError,
    map::{direction::Direction, grid::cell_center},
    systems::{
        player::steer, player_system, InputState, PlayerAnimation, PlayerBeacon, PlayerLifecycle, PlayerSteering,
        Pose, Position, Velocity,
    },
};
use speculoos::prelude::*;

mod common;

/// An L-shaped corridor: three cells along the bottom, then one cell up at the right end.
const L_CORRIDOR: [&str; 4] = ["#####", "###.#", "#...#", "#####"];

fn l_corridor_world() -> World {
    let map = common::map_from_grid(common::grid(&L_CORRIDOR), IVec2::new(1, 1));
    let mut world = common::create_test_world(map);
    common::spawn_test_player(&mut world, IVec2::new(1, 1));
    world
}

fn tick(world: &mut World, pressed: Option<Direction>) {
    world.resource_mut::<InputState>().pressed = pressed;
    world.run_system_once(player_system).expect("System should run successfully");
    world.resource_mut::<InputState>().clear();
}

fn player_state(world: &mut World) -> (PlayerSteering, Position, Velocity, Pose) {
    let mut query = world.query::<(&PlayerSteering, &Position, &Velocity, &Pose)>();
    let (steering, position, velocity, pose) = query.single(world).expect("Player should exist");
    (*steering, *position, *velocity, *pose)
}

#[test]
fn test_steer_buffers_blocked_press() {
    let map = common::map_from_grid(common::grid(&L_CORRIDOR), IVec2::new(1, 1));
    let mut steering = PlayerSteering::new(IVec2::new(1, 1));

    steer(&mut steering, &map, Direction::Up);
    assert_that(&steering.desired).is_none();
    assert_that(&steering.queued).is_equal_to(Some(Direction::Up));

    steer(&mut steering, &map, Direction::Right);
    assert_that(&steering.desired).is_equal_to(Some(Direction::Right));
    assert_that(&steering.queued).is_none();
}

#[test]
fn test_player_stands_without_input() {
    let mut world = l_corridor_world();

    for _ in 0..10 {
        tick(&mut world, None);
    }

    let (steering, position, velocity, pose) = player_state(&mut world);
    assert_that(&steering.target).is_equal_to(IVec2::new(1, 1));
    assert_that(&position.0).is_equal_to(cell_center(IVec2::new(1, 1)));
    assert_that(&velocity.is_stopped()).is_true();
    assert_that(&pose.animation).is_equal_to(PlayerAnimation::Standing);
    assert_that(&world.resource::<PlayerBeacon>().direction).is_none();
}

#[test]
fn test_player_walks_toward_next_cell() {
    let mut world = l_corridor_world();

    tick(&mut world, Some(Direction::Right));

    let (steering, position, velocity, pose) = player_state(&mut world);
    assert_that(&steering.target).is_equal_to(IVec2::new(2, 1));
    assert_that(&velocity.speed).is_equal_to(speed::PLAYER);
    assert_that(&velocity.direction).is_equal_to(Direction::Right);
    assert_that(&pose).is_equal_to(Pose::walking(Direction::Right));
    assert_that(&(position.0.x > cell_center(IVec2::new(1, 1)).x)).is_true();

    let beacon = *world.resource::<PlayerBeacon>();
    assert_that(&beacon.cell).is_equal_to(IVec2::new(2, 1));
    assert_that(&beacon.direction).is_equal_to(Some(Direction::Right));
}

#[test]
fn test_queued_turn_is_taken_when_it_opens() {
    let mut world = l_corridor_world();

    tick(&mut world, Some(Direction::Right));
    // Up is a wall from the next cell, so this waits for the corner
    tick(&mut world, Some(Direction::Up));
    let (steering, _, _, _) = player_state(&mut world);
    assert_that(&steering.queued).is_equal_to(Some(Direction::Up));

    for _ in 0..120 {
        tick(&mut world, None);
    }

    let (steering, position, velocity, pose) = player_state(&mut world);
    assert_that(&steering.target).is_equal_to(IVec2::new(3, 2));
    assert_that(&steering.queued).is_none();
    assert_that(&position.0).is_equal_to(cell_center(IVec2::new(3, 2)));
    assert_that(&velocity.is_stopped()).is_true();
    assert_that(&pose.animation).is_equal_to(PlayerAnimation::Standing);
    assert_that(&world.resource::<PlayerBeacon>().direction).is_none();
}

#[test]
fn test_player_arrives_exactly_on_cell_centers() {
    let mut world = l_corridor_world();

    tick(&mut world, Some(Direction::Right));
    for _ in 0..60 {
        tick(&mut world, None);
    }

    let (_, position, _, _) = player_state(&mut world);
    assert_that(&position.0).is_equal_to(cell_center(IVec2::new(3, 1)));
}

#[test]
fn test_hit_player_ignores_input() {
    let mut world = l_corridor_world();
    let mut query = world.query::<&mut PlayerLifecycle>();
    *query.single_mut(&mut world).expect("Player should exist") = PlayerLifecycle::hit();

    tick(&mut world, Some(Direction::Right));

    let (steering, position, velocity, _) = player_state(&mut world);
    assert_that(&steering.desired).is_none();
    assert_that(&position.0).is_equal_to(cell_center(IVec2::new(1, 1)));
    assert_that(&velocity.is_stopped()).is_true();
}

#[test]
fn test_missing_player_is_not_an_error() {
    let map = common::map_from_grid(common::grid(&L_CORRIDOR), IVec2::new(1, 1));
    let mut world = common::create_test_world(map);

    tick(&mut world, Some(Direction::Right));

    assert_that(&world.resource::<Events<GameError>>().is_empty()).is_true();
}

#[test]
fn test_two_players_report_an_error() {
    let mut world = l_corridor_world();
    common::spawn_test_player(&mut world, IVec2::new(2, 1));

    tick(&mut world, None);

    assert_that(&world.resource::<Events<GameError>>().len()).is_equal_to(1);
}
