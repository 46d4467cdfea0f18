//! Pursuer behaviour: a closed set of modes, each stepping the pursuer once per tick.
//!
//! Decisions (turns, path queries) are only made while the pursuer is aligned with a cell center.
//! Between cells a pursuer keeps its heading; [`crate::systems::pursuer`] integrates the motion.

use bevy_ecs::component::Component;
use glam::{IVec2, Vec2};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::trace;

use crate::constants::{ai, speed, TIMER_EPSILON};
use crate::map::builder::Pen;
use crate::map::direction::Direction;
use crate::map::grid::{cell_center, cell_of, is_aligned, NavGrid};
use crate::map::path::find_path;
use crate::systems::components::{Position, Velocity};

/// The mode a pursuer can be in, without its per-mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum ModeKind {
    Random,
    Aggressive,
    Cunning,
    Scared,
    Retreat,
    Spawn,
}

/// Where the player was last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sighting {
    pub cell: IVec2,
    pub direction: Option<Direction>,
}

/// A mode change requested by the mode itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Return to the pursuer's primary mode and skin.
    Primary,
    /// Back inside the pen: respawn with the primary skin.
    Respawn,
}

/// Everything a mode may consult while stepping. Nothing here is mutated but the random source.
pub struct AiContext<'a> {
    pub grid: &'a NavGrid,
    pub pen: &'a Pen,
    pub rng: &'a mut SmallRng,
    pub dt: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PursuerMode {
    /// Wanders, picking a random open direction whenever blocked.
    Random,
    /// Paths straight to the player's cell.
    Aggressive { player: Option<IVec2> },
    /// Paths to the player when close, otherwise to a point ahead of where the player is heading.
    Cunning { player: Option<Sighting> },
    /// Slow random flight, with an occasional turn at corners.
    Scared { elapsed: f32, since_turn: f32 },
    /// Runs back to the pen. `home` is set once the pen entrance is reached.
    Retreat { home: Option<Vec2> },
    /// Climbs out of the pen.
    Spawn,
}

impl PursuerMode {
    /// A fresh mode of the given kind.
    pub fn new(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Random => PursuerMode::Random,
            ModeKind::Aggressive => PursuerMode::Aggressive { player: None },
            ModeKind::Cunning => PursuerMode::Cunning { player: None },
            ModeKind::Scared => PursuerMode::Scared {
                elapsed: 0.0,
                since_turn: 0.0,
            },
            ModeKind::Retreat => PursuerMode::Retreat { home: None },
            ModeKind::Spawn => PursuerMode::Spawn,
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            PursuerMode::Random => ModeKind::Random,
            PursuerMode::Aggressive { .. } => ModeKind::Aggressive,
            PursuerMode::Cunning { .. } => ModeKind::Cunning,
            PursuerMode::Scared { .. } => ModeKind::Scared,
            PursuerMode::Retreat { .. } => ModeKind::Retreat,
            PursuerMode::Spawn => ModeKind::Spawn,
        }
    }

    /// Retreating and spawning pursuers can neither be scared nor capture the player.
    pub fn is_returning(&self) -> bool {
        matches!(self, PursuerMode::Retreat { .. } | PursuerMode::Spawn)
    }

    /// Whether the pursuer moves along its heading this tick, rather than being placed by the mode.
    pub fn integrates_heading(&self) -> bool {
        !matches!(self, PursuerMode::Retreat { home: Some(_) })
    }

    /// Records the player's broadcast. Only the chasing modes keep it.
    pub fn on_player_grid_point(&mut self, cell: IVec2, direction: Option<Direction>) {
        match self {
            PursuerMode::Aggressive { player } => *player = Some(cell),
            PursuerMode::Cunning { player } => *player = Some(Sighting { cell, direction }),
            _ => {}
        }
    }

    /// Advances this mode by one tick, steering `velocity` (and sometimes placing `position`).
    pub fn step(
        &mut self,
        ctx: &mut AiContext<'_>,
        position: &mut Position,
        velocity: &mut Velocity,
    ) -> Option<ModeTransition> {
        let aligned = is_aligned(position.0).then(|| cell_of(position.0));

        match self {
            PursuerMode::Random => {
                if !velocity.is_stopped() {
                    velocity.speed = speed::RANDOM;
                }
                if let Some(cell) = aligned {
                    if velocity.is_stopped() || !ctx.grid.is_open(cell, velocity.direction) {
                        let options = ctx.grid.open_directions(cell);
                        wander(ctx.rng, &options, position, velocity, cell, speed::RANDOM);
                    }
                }
                None
            }
            PursuerMode::Aggressive { player } => {
                if let Some(cell) = aligned {
                    match player {
                        Some(target) => {
                            let path = find_path(ctx.grid, cell, *target);
                            follow(path.as_deref(), position, velocity, cell, speed::AGGRESSIVE);
                        }
                        None => stop(position, velocity, cell),
                    }
                }
                None
            }
            PursuerMode::Cunning { player } => {
                if let Some(cell) = aligned {
                    match player {
                        Some(sighting) => {
                            let mut path = find_path(ctx.grid, cell, sighting.cell);
                            if path.as_ref().is_some_and(|path| path.len() > ai::CUNNING_ANGER_DISTANCE) {
                                let predicted = predict_target(ctx.grid, *sighting);
                                trace!(x = predicted.x, y = predicted.y, "Cunning pursuer heading off the player");
                                path = find_path(ctx.grid, cell, predicted);
                            }
                            follow(path.as_deref(), position, velocity, cell, speed::CUNNING);
                        }
                        None => stop(position, velocity, cell),
                    }
                }
                None
            }
            PursuerMode::Scared { elapsed, since_turn } => {
                *elapsed += ctx.dt;
                *since_turn += ctx.dt;
                let stopped = velocity.is_stopped();
                velocity.speed = speed::SCARED;

                if let Some(cell) = aligned {
                    if stopped || !ctx.grid.is_open(cell, velocity.direction) {
                        let options = ctx.grid.open_directions(cell);
                        wander(ctx.rng, &options, position, velocity, cell, speed::SCARED);
                    } else if timer_expired(*since_turn, ai::SCARED_TURN_INTERVAL) {
                        let turns: SmallVec<[Direction; 2]> = velocity
                            .direction
                            .perpendicular()
                            .into_iter()
                            .filter(|&direction| ctx.grid.is_open(cell, direction))
                            .collect();
                        if !turns.is_empty() {
                            *since_turn = 0.0;
                            wander(ctx.rng, &turns, position, velocity, cell, speed::SCARED);
                        }
                    }
                }

                timer_expired(*elapsed, ai::SCARED_DURATION).then_some(ModeTransition::Primary)
            }
            PursuerMode::Retreat { home } => match *home {
                None => {
                    velocity.speed = speed::RETREAT;
                    if let Some(cell) = aligned {
                        match find_path(ctx.grid, cell, ctx.pen.entrance) {
                            Some(path) if !path.is_empty() => {
                                follow(Some(path.as_slice()), position, velocity, cell, speed::RETREAT);
                            }
                            _ => {
                                trace!(x = cell.x, y = cell.y, "Retreating pursuer reached the pen");
                                stop(position, velocity, cell);
                                *home = Some(ctx.pen.home_point);
                            }
                        }
                    }
                    None
                }
                Some(point) => {
                    let remaining = point - position.0;
                    let reach = speed::RETREAT * ctx.dt;
                    if remaining.length() <= reach {
                        position.0 = point;
                        Some(ModeTransition::Respawn)
                    } else {
                        position.0 += remaining.normalize() * reach;
                        None
                    }
                }
            },
            PursuerMode::Spawn => {
                *velocity = Velocity {
                    speed: speed::SPAWN,
                    direction: Direction::Up,
                };
                match aligned {
                    Some(cell) if ctx.grid.is_walkable(cell) => {
                        stop(position, velocity, cell);
                        Some(ModeTransition::Primary)
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Whether an accumulated timer has reached `duration`.
pub fn timer_expired(elapsed: f32, duration: f32) -> bool {
    elapsed >= duration - TIMER_EPSILON
}

/// Starts moving toward a neighbouring cell. Turning (or starting from rest) snaps onto the cell center
/// so the pursuer stays on the grid lines.
fn head(position: &mut Position, velocity: &mut Velocity, cell: IVec2, direction: Direction, speed: f32) {
    if velocity.direction != direction || velocity.is_stopped() {
        position.0 = cell_center(cell);
    }
    *velocity = Velocity { speed, direction };
}

/// Stops on the center of `cell`, keeping the current facing.
fn stop(position: &mut Position, velocity: &mut Velocity, cell: IVec2) {
    position.0 = cell_center(cell);
    velocity.speed = 0.0;
}

/// Heads for the first step of `path`, or stops when there is nowhere to go.
fn follow(path: Option<&[IVec2]>, position: &mut Position, velocity: &mut Velocity, cell: IVec2, speed: f32) {
    match path.and_then(|path| path.first()).and_then(|&next| Direction::between(cell, next)) {
        Some(direction) => head(position, velocity, cell, direction, speed),
        None => {
            trace!(x = cell.x, y = cell.y, "No path, pursuer stops");
            stop(position, velocity, cell);
        }
    }
}

/// Picks one of `options` uniformly at random; stops when there are none.
fn wander(
    rng: &mut SmallRng,
    options: &[Direction],
    position: &mut Position,
    velocity: &mut Velocity,
    cell: IVec2,
    speed: f32,
) {
    match options.choose(rng) {
        Some(&direction) => head(position, velocity, cell, direction, speed),
        None => stop(position, velocity, cell),
    }
}

/// Walks up to [`ai::CUNNING_PREDICT_DISTANCE`] cells ahead of the player along its heading,
/// deflecting sideways around walls. A standing player is predicted to stay put.
pub fn predict_target(grid: &NavGrid, sighting: Sighting) -> IVec2 {
    let mut target = sighting.cell;
    let Some(heading) = sighting.direction else {
        return target;
    };

    for _ in 0..ai::CUNNING_PREDICT_DISTANCE {
        if grid.is_open(target, heading) {
            target += heading.as_ivec2();
        } else if let Some(turn) = heading.perpendicular().into_iter().find(|&turn| grid.is_open(target, turn)) {
            target += turn.as_ivec2();
        }
    }
    target
}
