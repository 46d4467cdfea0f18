use std::mem::discriminant;

use bevy_ecs::{
    entity::Entity,
    event::EventReader,
    query::With,
    resource::Resource,
    system::{Commands, In, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::mechanics;
use crate::events::StageTransition;
use crate::systems::ai::timer_expired;
use crate::systems::animation::AnimationSignal;
use crate::systems::components::{DeltaTime, PlayerControlled};

/// Where the level is in its lifecycle.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub enum GameStage {
    #[default]
    Playing,
    /// The last dot is gone; the level counts as won once the delay runs out.
    LevelComplete { elapsed: f32 },
    Won,
    /// The player was caught and its death clip is playing.
    PlayerDying,
    /// The death clip finished; game over follows after a delay.
    GameOverPending { elapsed: f32 },
    GameOver,
}

impl GameStage {
    /// Whether the level has reached a final stage.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStage::Won | GameStage::GameOver)
    }
}

/// Drives the stage machine from gameplay requests and the animation signal.
///
/// Only a level that is still `Playing` can be cleared or lost, so whichever request arrives first wins
/// and each of the delayed transitions fires exactly once.
pub fn stage_system(
    In(signal): In<AnimationSignal>,
    delta_time: Res<DeltaTime>,
    mut game_state: ResMut<GameStage>,
    mut transitions: EventReader<StageTransition>,
    mut commands: Commands,
    players: Query<Entity, With<PlayerControlled>>,
) {
    let old_state = *game_state;
    let mut new_state: Option<GameStage> = None;

    for transition in transitions.read() {
        if new_state.is_some() || old_state != GameStage::Playing {
            debug!(?transition, stage = ?old_state, "Ignoring stage transition request");
            continue;
        }
        new_state = Some(match transition {
            StageTransition::LevelCleared => GameStage::LevelComplete { elapsed: 0.0 },
            StageTransition::PlayerCaptured { .. } => GameStage::PlayerDying,
        });
    }

    if signal == AnimationSignal::DeathComplete {
        for player in players.iter() {
            debug!(?player, "Removing player after death clip");
            commands.entity(player).despawn();
        }
    }

    let dt = delta_time.0;
    let new_state = match new_state.unwrap_or(old_state) {
        GameStage::LevelComplete { elapsed } => {
            let elapsed = elapsed + dt;
            if timer_expired(elapsed, mechanics::LEVEL_COMPLETE_DELAY) {
                GameStage::Won
            } else {
                GameStage::LevelComplete { elapsed }
            }
        }
        GameStage::PlayerDying if signal == AnimationSignal::DeathComplete => GameStage::GameOverPending { elapsed: 0.0 },
        GameStage::GameOverPending { elapsed } => {
            let elapsed = elapsed + dt;
            if timer_expired(elapsed, mechanics::GAME_OVER_DELAY) {
                GameStage::GameOver
            } else {
                GameStage::GameOverPending { elapsed }
            }
        }
        unchanged => unchanged,
    };

    if discriminant(&old_state) != discriminant(&new_state) {
        info!(from = ?old_state, to = ?new_state, "Game stage changed");
    }
    *game_state = new_state;
}
