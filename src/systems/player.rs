use bevy_ecs::{
    event::EventWriter,
    query::{QuerySingleError, With},
    system::{Query, Res, ResMut},
};
use tracing::trace;

use crate::{
    constants::{collider, speed},
    error::GameError,
    map::{builder::Map, direction::Direction, grid::cell_center},
    systems::{
        components::{
            Collider, DeltaTime, EntityType, PlayerAnimation, PlayerBeacon, PlayerBundle, PlayerCollider, PlayerControlled,
            PlayerLifecycle, PlayerSteering, Pose, Position, Velocity,
        },
        input::InputState,
    },
};

/// Builds the player standing on the level's start cell.
pub fn player_bundle(map: &Map) -> PlayerBundle {
    PlayerBundle {
        player: PlayerControlled,
        position: Position(cell_center(map.player_start)),
        velocity: Velocity::stopped(Direction::Right),
        steering: PlayerSteering::new(map.player_start),
        lifecycle: PlayerLifecycle::Alive,
        pose: Pose::default(),
        entity_type: EntityType::Player,
        collider: Collider {
            half_extent: collider::PLAYER_HALF_EXTENT,
        },
        player_collider: PlayerCollider,
    }
}

/// Applies this tick's directional input to the player's steering.
///
/// A press that would walk into a wall from the target cell is buffered instead,
/// and taken automatically once that side opens up.
pub fn steer(steering: &mut PlayerSteering, map: &Map, pressed: Direction) {
    if map.grid.is_open(steering.target, pressed) {
        steering.desired = Some(pressed);
        steering.queued = None;
    } else {
        steering.queued = Some(pressed);
    }
}

/// Processes input, grid-locked movement and the beacon broadcast for the player.
///
/// The player always walks toward the center of its target cell. On arriving it either continues
/// in the desired direction (if open) or stands still. Nothing happens once the player has been hit.
#[allow(clippy::type_complexity)]
pub fn player_system(
    map: Res<Map>,
    input: Res<InputState>,
    delta_time: Res<DeltaTime>,
    mut beacon: ResMut<PlayerBeacon>,
    mut players: Query<
        (&PlayerLifecycle, &mut PlayerSteering, &mut Position, &mut Velocity, &mut Pose),
        With<PlayerControlled>,
    >,
    mut errors: EventWriter<GameError>,
) {
    let (lifecycle, mut steering, mut position, mut velocity, mut pose) = match players.single_mut() {
        Ok(tuple) => tuple,
        // The player is removed once its death clip finishes
        Err(QuerySingleError::NoEntities(_)) => return,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {}",
                e
            )));
            return;
        }
    };

    if lifecycle.is_hit() {
        return;
    }

    if let Some(pressed) = input.pressed {
        steer(&mut steering, &map, pressed);
    }

    let target_center = cell_center(steering.target);
    if position.0 == target_center {
        match steering.desired.filter(|&desired| map.grid.is_open(steering.target, desired)) {
            Some(direction) => {
                steering.target += direction.as_ivec2();
                *velocity = Velocity {
                    speed: speed::PLAYER,
                    direction,
                };
                *pose = Pose::walking(direction);
                trace!(x = steering.target.x, y = steering.target.y, ?direction, "Player heading for cell");
            }
            None => {
                velocity.speed = 0.0;
                pose.animation = PlayerAnimation::Standing;
            }
        }
    }

    // Close in on the target center without overshooting it
    let remaining = cell_center(steering.target) - position.0;
    let reach = velocity.speed * delta_time.0;
    if remaining.length() <= reach {
        position.0 = cell_center(steering.target);
    } else {
        position.0 += remaining.normalize_or_zero() * reach;
    }

    if let Some(queued) = steering.queued {
        if map.grid.is_open(steering.target, queued) {
            steering.desired = Some(queued);
            steering.queued = None;
        }
    }

    *beacon = PlayerBeacon {
        cell: steering.target,
        direction: if velocity.is_stopped() {
            None
        } else {
            steering.queued.or(steering.desired)
        },
    };
}
