use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{QuerySingleError, With, Without};
use bevy_ecs::system::{Commands, Query, ResMut};
use tracing::{debug, info};

use crate::constants::mechanics;
use crate::error::GameError;
use crate::events::StageTransition;
use crate::systems::ai::{ModeKind, PursuerMode};
use crate::systems::audio::{AudioEvent, Sound};
use crate::systems::components::{
    Appearance, Collider, DotCount, EntityType, ItemCollider, PlayerAnimation, PlayerCollider, PlayerLifecycle, Pose,
    Position, PrimaryMode, PursuerCollider, ScoreResource, Skin, Velocity,
};

/// Demotes a pursuer to random wandering after the player is caught.
///
/// Retreating pursuers finish their trip home, but will wander once they respawn.
pub fn make_random(mode: &mut PursuerMode, primary: &mut PrimaryMode, skin: &mut Skin) {
    if matches!(mode, PursuerMode::Retreat { .. }) {
        primary.0 = ModeKind::Random;
        return;
    }
    if matches!(mode, PursuerMode::Scared { .. }) {
        skin.appearance = Appearance::Primary;
    }
    *mode = PursuerMode::Random;
}

/// Resolves pickups and captures for the player.
///
/// Dots and power balls are eaten when their center lies inside the player's box; pursuers touch the
/// player when the boxes overlap. Removals are deferred through `Commands`, so every entity seen this tick
/// stays valid until the tick ends. Nothing is resolved once the player has been hit.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn collision_system(
    mut commands: Commands,
    mut players: Query<(&Position, &Collider, &mut PlayerLifecycle, &mut Velocity, &mut Pose), With<PlayerCollider>>,
    items: Query<(Entity, &Position, &EntityType), With<ItemCollider>>,
    mut pursuers: Query<
        (Entity, &Position, &Collider, &mut PursuerMode, &mut PrimaryMode, &mut Skin),
        (With<PursuerCollider>, Without<PlayerCollider>),
    >,
    mut score: ResMut<ScoreResource>,
    mut dots: ResMut<DotCount>,
    mut audio: EventWriter<AudioEvent>,
    mut stage: EventWriter<StageTransition>,
    mut errors: EventWriter<GameError>,
) {
    let (player_position, player_collider, mut lifecycle, mut velocity, mut pose) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(QuerySingleError::NoEntities(_)) => return,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for collision system: {}",
                e
            )));
            return;
        }
    };

    if lifecycle.is_hit() {
        return;
    }

    let center = player_position.0;
    let mut scare = false;

    for (item, item_position, item_type) in items.iter() {
        if !player_collider.contains(center, item_position.0) {
            continue;
        }
        match item_type {
            EntityType::Dot => {
                commands.entity(item).despawn();
                score.0 += mechanics::DOT_SCORE;
                audio.write(AudioEvent::Pickup);
                dots.0 = dots.0.saturating_sub(1);
                if dots.0 == 0 {
                    info!(score = score.0, "Last dot eaten");
                    stage.write(StageTransition::LevelCleared);
                }
            }
            EntityType::PowerBall => {
                commands.entity(item).despawn();
                audio.write(AudioEvent::Pickup);
                scare = true;
            }
            other => {
                errors.write(GameError::InvalidState(format!(
                    "Entity {:?} of type {:?} carries an item collider",
                    item, other
                )));
            }
        }
    }

    if scare {
        for (entity, _, _, mut mode, _, mut skin) in pursuers.iter_mut() {
            if mode.is_returning() {
                continue;
            }
            *mode = PursuerMode::new(ModeKind::Scared);
            skin.appearance = Appearance::Scared;
            debug!(pursuer = ?entity, "Pursuer scared");
        }
    }

    let mut captured_by = None;
    for (entity, position, collider, mut mode, _, mut skin) in pursuers.iter_mut() {
        if !player_collider.intersects(center, collider, position.0) {
            continue;
        }
        match *mode {
            PursuerMode::Scared { .. } => {
                *mode = PursuerMode::new(ModeKind::Retreat);
                skin.appearance = Appearance::Dead;
                audio.write(AudioEvent::PlaySound(Sound::GhostReturn));
                debug!(pursuer = ?entity, "Scared pursuer caught, retreating");
            }
            PursuerMode::Retreat { .. } | PursuerMode::Spawn => {}
            _ => {
                captured_by = Some(entity);
                break;
            }
        }
    }

    if let Some(pursuer) = captured_by {
        info!(?pursuer, score = score.0, "Player captured");
        for (entity, _, _, mut mode, mut primary, mut skin) in pursuers.iter_mut() {
            make_random(&mut mode, &mut primary, &mut skin);
            debug!(pursuer = ?entity, mode = ?mode.kind(), primary = ?primary.0, "Pursuer demoted");
        }
        *lifecycle = PlayerLifecycle::hit();
        velocity.speed = 0.0;
        pose.animation = PlayerAnimation::Die;
        audio.write(AudioEvent::PlaySound(Sound::Death));
        stage.write(StageTransition::PlayerCaptured { pursuer });
    }
}
