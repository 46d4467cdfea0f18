#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::EventRegistry, world::World};
use glam::IVec2;
use munchman::{
    constants::{collider, TICK_SECONDS},
    error::GameError,
    events::StageTransition,
    map::{
        builder::{Map, Pen},
        direction::Direction,
        grid::{cell_center, NavGrid},
        layout::LevelLayout,
    },
    systems::{
        AudioEvent, AudioResource, AudioState, Collider, DeltaTime, DotCount, EntityType, GameRng, GameStage, InputState,
        ItemBundle, ItemCollider, LevelClock, ModeKind, PlayerBeacon, PlayerBundle, PlayerCollider, PlayerControlled,
        PlayerLifecycle, PlayerSteering, Pose, Position, PrimaryMode, PursuerBundle, PursuerCollider, PursuerMode,
        ScoreResource, Skin, SpawnSchedule, Velocity,
    },
};

/// One corridor for the player (six dots, then a power ball) and a sealed pocket above the pen
/// where the pursuers wander without ever reaching the player.
pub const CORRIDOR_LEVEL: [&str; 9] = [
    "##########",
    "#P......o#",
    "##########",
    "#.....####",
    "#------###",
    "#------###",
    "#------###",
    "#G-----###",
    "##########",
];

/// The player stands in a dead end right above the pen door, so the first pursuer out walks into it.
pub const DEAD_END_LEVEL: [&str; 8] = [
    "########",
    "####P###",
    "####.###",
    "#------#",
    "#------#",
    "#------#",
    "#G-----#",
    "########",
];

pub fn layout(rows: &[&str]) -> LevelLayout {
    LevelLayout::from_rows(rows).expect("Test level should parse")
}

pub fn map(rows: &[&str]) -> Map {
    Map::new(&layout(rows)).expect("Test level should build")
}

/// A grid from an ASCII drawing, top row first: `#` is blocked, anything else walkable.
pub fn grid(rows: &[&str]) -> NavGrid {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    NavGrid::from_fn(width, height, |cell| {
        let row = rows[height - 1 - cell.y as usize].as_bytes();
        row.get(cell.x as usize).is_some_and(|&c| c != b'#')
    })
}

pub fn open_grid(width: usize, height: usize) -> NavGrid {
    NavGrid::from_fn(width, height, |_| true)
}

/// A map over a bare grid, with the pen parked far outside it.
pub fn map_from_grid(grid: NavGrid, player_start: IVec2) -> Map {
    Map {
        grid,
        player_start,
        pen: Pen::new(IVec2::new(-100, -100)),
        dots: Vec::new(),
        power_balls: Vec::new(),
        walls: Vec::new(),
    }
}

/// A world with every resource and event the gameplay systems need, stepping at the fixed tick.
pub fn create_test_world(map: Map) -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameError>(&mut world);
    EventRegistry::register_event::<AudioEvent>(&mut world);
    EventRegistry::register_event::<StageTransition>(&mut world);

    world.insert_resource(PlayerBeacon {
        cell: map.player_start,
        direction: None,
    });
    world.insert_resource(map);
    world.insert_resource(ScoreResource(0));
    world.insert_resource(DotCount(0));
    world.insert_resource(DeltaTime(TICK_SECONDS));
    world.insert_resource(LevelClock::default());
    world.insert_resource(GameRng::seeded(7));
    world.insert_resource(InputState::default());
    world.insert_resource(AudioState::default());
    world.insert_resource(AudioResource::default());
    world.insert_resource(SpawnSchedule::default());
    world.insert_resource(GameStage::default());

    world
}

pub fn spawn_test_player(world: &mut World, cell: IVec2) -> Entity {
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(cell_center(cell)),
            velocity: Velocity::stopped(Direction::Right),
            steering: PlayerSteering::new(cell),
            lifecycle: PlayerLifecycle::Alive,
            pose: Pose::default(),
            entity_type: EntityType::Player,
            collider: Collider {
                half_extent: collider::PLAYER_HALF_EXTENT,
            },
            player_collider: PlayerCollider,
        })
        .id()
}

pub fn spawn_test_pursuer(world: &mut World, cell: IVec2, mode: PursuerMode, primary: ModeKind) -> Entity {
    world
        .spawn(PursuerBundle {
            position: Position(cell_center(cell)),
            velocity: Velocity::stopped(Direction::Left),
            mode,
            primary: PrimaryMode(primary),
            skin: Skin::new("red"),
            entity_type: EntityType::Pursuer,
            collider: Collider {
                half_extent: collider::PURSUER_HALF_EXTENT,
            },
            pursuer_collider: PursuerCollider,
        })
        .id()
}

pub fn spawn_test_item(world: &mut World, cell: IVec2, entity_type: EntityType) -> Entity {
    if entity_type == EntityType::Dot {
        world.resource_mut::<DotCount>().0 += 1;
    }
    world
        .spawn(ItemBundle {
            position: Position(cell_center(cell)),
            entity_type,
            item_collider: ItemCollider,
        })
        .id()
}

pub fn count_items(world: &mut World, entity_type: EntityType) -> usize {
    world
        .query::<&EntityType>()
        .iter(world)
        .filter(|&&kind| kind == entity_type)
        .count()
}
