use bevy_ecs::{
    entity::Entity,
    query::Without,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::{collider, spawn, TIMER_EPSILON};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::ai::{AiContext, ModeKind, ModeTransition, PursuerMode};
use crate::systems::components::{
    Appearance, Collider, DeltaTime, EntityType, GameRng, LevelClock, PlayerBeacon, PlayerControlled, Position,
    PrimaryMode, PursuerBundle, PursuerCollider, Skin, Velocity,
};

/// Tracks how many entries of the spawn schedule have been released.
#[derive(bevy_ecs::resource::Resource, Debug, Clone, Copy, Default)]
pub struct SpawnSchedule {
    pub spawned: usize,
}

/// Builds a pursuer standing at the pen's spawn point, about to climb out.
pub fn pursuer_bundle(map: &Map, primary: ModeKind, skin: &'static str) -> PursuerBundle {
    PursuerBundle {
        position: Position(map.pen.spawn_point),
        velocity: Velocity::stopped(Direction::Up),
        mode: PursuerMode::new(ModeKind::Spawn),
        primary: PrimaryMode(primary),
        skin: Skin::new(skin),
        entity_type: EntityType::Pursuer,
        collider: Collider {
            half_extent: collider::PURSUER_HALF_EXTENT,
        },
        pursuer_collider: PursuerCollider,
    }
}

/// Advances the level clock and releases pursuers from the pen on their schedule.
pub fn spawn_system(
    mut commands: Commands,
    map: Res<Map>,
    delta_time: Res<DeltaTime>,
    mut clock: ResMut<LevelClock>,
    mut schedule: ResMut<SpawnSchedule>,
) {
    clock.0 += delta_time.0;

    while let Some(&(at, primary, skin)) = spawn::SCHEDULE.get(schedule.spawned) {
        if clock.0 < at - TIMER_EPSILON {
            break;
        }
        info!(skin, ?primary, elapsed = clock.0, "Pursuer released");
        commands.spawn(pursuer_bundle(&map, primary, skin));
        schedule.spawned += 1;
    }
}

/// Steps every pursuer's current mode and integrates its motion.
///
/// Each pursuer first hears the player's latest broadcast, then decides (only at cell centers),
/// then moves along its heading. Mode-requested transitions are applied immediately.
pub fn pursuer_system(
    map: Res<Map>,
    beacon: Res<PlayerBeacon>,
    delta_time: Res<DeltaTime>,
    mut rng: ResMut<GameRng>,
    mut pursuers: Query<
        (Entity, &mut PursuerMode, &PrimaryMode, &mut Skin, &mut Position, &mut Velocity),
        Without<PlayerControlled>,
    >,
) {
    let mut ctx = AiContext {
        grid: &map.grid,
        pen: &map.pen,
        rng: &mut rng.0,
        dt: delta_time.0,
    };

    for (entity, mut mode, primary, mut skin, mut position, mut velocity) in pursuers.iter_mut() {
        mode.on_player_grid_point(beacon.cell, beacon.direction);

        let transition = mode.step(&mut ctx, &mut position, &mut velocity);

        if mode.integrates_heading() {
            position.0 += velocity.direction.as_vec2() * velocity.speed * ctx.dt;
        }

        if let Some(transition) = transition {
            let next = match transition {
                ModeTransition::Primary => primary.0,
                ModeTransition::Respawn => ModeKind::Spawn,
            };
            debug!(pursuer = ?entity, from = ?mode.kind(), to = ?next, "Pursuer mode changed");
            *mode = PursuerMode::new(next);
            skin.appearance = Appearance::Primary;
        }
    }
}
