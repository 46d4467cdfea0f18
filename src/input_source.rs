//! Input collaborators for the headless runner.
//!
//! The game polls its input once per tick; these stand in for a keyboard.

use rand::{rngs::SmallRng, seq::IndexedRandom, Rng, SeedableRng};
use tracing::trace;

use crate::game::Game;
use crate::map::direction::Direction;
use crate::systems::PlayerBeacon;

/// Something that may press a direction before a tick runs.
pub trait InputSource {
    /// The direction pressed before tick number `tick`, if any.
    fn poll(&mut self, tick: u64, game: &Game) -> Option<Direction>;
}

/// Never presses anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl InputSource for Idle {
    fn poll(&mut self, _tick: u64, _game: &Game) -> Option<Direction> {
        None
    }
}

/// Replays a fixed list of `(tick, direction)` presses, sorted by tick.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    presses: Vec<(u64, Direction)>,
    next: usize,
}

impl Scripted {
    pub fn new(mut presses: Vec<(u64, Direction)>) -> Self {
        presses.sort_by_key(|&(tick, _)| tick);
        Self { presses, next: 0 }
    }
}

impl InputSource for Scripted {
    fn poll(&mut self, tick: u64, _game: &Game) -> Option<Direction> {
        let mut pressed = None;
        // Several presses due on the same tick collapse into the last one
        while let Some(&(at, direction)) = self.presses.get(self.next) {
            if at > tick {
                break;
            }
            pressed = Some(direction);
            self.next += 1;
        }
        pressed
    }
}

/// Every so often presses a random direction that is open from the player's target cell.
#[derive(Debug, Clone)]
pub struct Wander {
    rng: SmallRng,
    next_press: u64,
}

impl Wander {
    /// Shortest and longest gap between two presses, in ticks.
    const MIN_GAP: u64 = 20;
    const MAX_GAP: u64 = 120;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_press: 0,
        }
    }
}

impl InputSource for Wander {
    fn poll(&mut self, tick: u64, game: &Game) -> Option<Direction> {
        if tick < self.next_press {
            return None;
        }
        self.next_press = tick + self.rng.random_range(Self::MIN_GAP..=Self::MAX_GAP);

        let beacon = game.world.resource::<PlayerBeacon>();
        let open = game.map().grid.open_directions(beacon.cell);
        let direction = *open.choose(&mut self.rng)?;
        trace!(tick, ?direction, "Wandering input pressed");
        Some(direction)
    }
}
