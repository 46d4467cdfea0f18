use bevy_ecs::prelude::*;

/// Requests from gameplay systems for the stage system to change the game's stage.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTransition {
    /// The last dot was eaten.
    LevelCleared,
    /// A pursuer caught the player.
    PlayerCaptured { pursuer: Entity },
}
