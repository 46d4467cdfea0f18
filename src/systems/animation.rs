use bevy_ecs::{
    query::With,
    system::{Query, Res},
};
use tracing::debug;

use crate::constants::mechanics;
use crate::systems::ai::timer_expired;
use crate::systems::components::{DeltaTime, PlayerControlled, PlayerLifecycle};

/// What the animation update reports back to the stage system this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSignal {
    #[default]
    None,
    /// The death clip reached its "gameover" marker.
    DeathComplete,
}

/// Advances the player's death clip, reporting its "gameover" marker exactly once.
pub fn animation_system(
    delta_time: Res<DeltaTime>,
    mut players: Query<&mut PlayerLifecycle, With<PlayerControlled>>,
) -> AnimationSignal {
    let mut signal = AnimationSignal::None;

    for mut lifecycle in players.iter_mut() {
        if let PlayerLifecycle::Hit {
            clip_elapsed,
            signalled,
        } = &mut *lifecycle
        {
            *clip_elapsed += delta_time.0;
            if !*signalled && timer_expired(*clip_elapsed, mechanics::DEATH_CLIP_MARKER) {
                *signalled = true;
                debug!(elapsed = *clip_elapsed, "Death clip reached its gameover marker");
                signal = AnimationSignal::DeathComplete;
            }
        }
    }

    signal
}
