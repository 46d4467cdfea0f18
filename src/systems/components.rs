use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use rand::{rngs::SmallRng, SeedableRng};
use strum_macros::AsRefStr;

use crate::map::direction::Direction;
use crate::systems::ai::{ModeKind, PursuerMode};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Pursuer,
    Dot,
    PowerBall,
}

/// Continuous world position, in world units. Actors are positioned by their center.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Scalar speed (world units per second) along a facing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub speed: f32,
    pub direction: Direction,
}

impl Velocity {
    pub fn stopped(direction: Direction) -> Self {
        Self { speed: 0.0, direction }
    }

    /// Facing angle in degrees.
    pub fn angle(&self) -> f32 {
        self.direction.angle()
    }

    pub fn is_stopped(&self) -> bool {
        self.speed == 0.0
    }
}

/// Axis-aligned bounding box, centered on the entity's position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extent: f32,
}

impl Collider {
    /// Whether `point` lies inside this box when centered at `center`.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        (point - center).abs().cmple(Vec2::splat(self.half_extent)).all()
    }

    /// Whether this box and `other` overlap.
    pub fn intersects(&self, center: Vec2, other: &Collider, other_center: Vec2) -> bool {
        (other_center - center)
            .abs()
            .cmple(Vec2::splat(self.half_extent + other.half_extent))
            .all()
    }
}

/// Marker components for collision filtering
#[derive(Component)]
pub struct PlayerCollider;

#[derive(Component)]
pub struct PursuerCollider;

#[derive(Component)]
pub struct ItemCollider;

/// Grid-locked steering state of the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSteering {
    /// Direction taken at the next cell center, if open.
    pub desired: Option<Direction>,
    /// A turn requested while blocked, applied once it opens up.
    pub queued: Option<Direction>,
    /// The cell whose center the player is walking toward.
    pub target: IVec2,
}

impl PlayerSteering {
    pub fn new(start: IVec2) -> Self {
        Self {
            desired: None,
            queued: None,
            target: start,
        }
    }
}

/// Whether the player is still in play.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum PlayerLifecycle {
    #[default]
    Alive,
    /// Captured: input, movement and collisions are frozen while the death clip plays.
    Hit {
        /// Seconds into the death clip.
        clip_elapsed: f32,
        /// Whether the clip's "gameover" marker has been reported.
        signalled: bool,
    },
}

impl PlayerLifecycle {
    pub fn hit() -> Self {
        PlayerLifecycle::Hit {
            clip_elapsed: 0.0,
            signalled: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, PlayerLifecycle::Hit { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerAnimation {
    #[default]
    Standing,
    Walk,
    Die,
}

/// What the rendering collaborator needs to draw the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub animation: PlayerAnimation,
    /// Root rotation in degrees.
    pub rotation: f32,
    pub flip_x: bool,
}

impl Pose {
    /// Walking pose for a heading: left is a mirrored right, up and down are rotations.
    pub fn walking(direction: Direction) -> Self {
        let (rotation, flip_x) = match direction {
            Direction::Right => (0.0, false),
            Direction::Left => (0.0, true),
            Direction::Up => (90.0, false),
            Direction::Down => (270.0, false),
        };
        Self {
            animation: PlayerAnimation::Walk,
            rotation,
            flip_x,
        }
    }
}

/// A pursuer's default behaviour, restored after scared and retreat interludes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryMode(pub ModeKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Appearance {
    #[default]
    Primary,
    Scared,
    Dead,
}

/// Which skin a pursuer is drawn with.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub primary: &'static str,
    pub appearance: Appearance,
}

impl Skin {
    pub fn new(primary: &'static str) -> Self {
        Self {
            primary,
            appearance: Appearance::Primary,
        }
    }

    /// The skin name as the renderer knows it.
    pub fn name(&self) -> &'static str {
        match self.appearance {
            Appearance::Primary => self.primary,
            Appearance::Scared => "scared",
            Appearance::Dead => "dead",
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub steering: PlayerSteering,
    pub lifecycle: PlayerLifecycle,
    pub pose: Pose,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub player_collider: PlayerCollider,
}

#[derive(Bundle)]
pub struct PursuerBundle {
    pub position: Position,
    pub velocity: Velocity,
    pub mode: PursuerMode,
    pub primary: PrimaryMode,
    pub skin: Skin,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub pursuer_collider: PursuerCollider,
}

#[derive(Bundle)]
pub struct ItemBundle {
    pub position: Position,
    pub entity_type: EntityType,
    pub item_collider: ItemCollider,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResource(pub u32);

/// Dots left on the level; reaching zero completes it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DotCount(pub u32);

/// Length of the current simulation step, in seconds.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime(pub f32);

/// Seconds simulated since the level started.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LevelClock(pub f32);

/// The player's latest broadcast: the cell it is heading for and where it is going.
///
/// `direction` is `None` while the player stands still.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerBeacon {
    pub cell: IVec2,
    pub direction: Option<Direction>,
}

/// The level's random source, seeded so a run can be replayed.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
