use bevy_ecs::resource::Resource;

use crate::map::direction::Direction;

/// Input collaborator state, polled once per tick.
///
/// `pressed` holds a directional key that was *just* pressed this tick; it is cleared after every tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub pressed: Option<Direction>,
}

impl InputState {
    pub fn press(&mut self, direction: Direction) {
        self.pressed = Some(direction);
    }

    pub fn clear(&mut self) {
        self.pressed = None;
    }
}
