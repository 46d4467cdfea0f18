use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// The world is y-up: [`Direction::Up`] increases the y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is also the order in which neighbouring cells are explored, which keeps pathfinding deterministic.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions perpendicular to this one, in the order they are tried when deflecting.
    ///
    /// Horizontal directions deflect up before down; vertical ones deflect right before left.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Right, Direction::Left],
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Facing angle in degrees: East 0, North 90, West 180, South 270.
    pub const fn angle(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Left => 180.0,
            Direction::Down => 270.0,
        }
    }

    /// Returns the grid offset of one step in this direction.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Returns the unit vector of this direction in world space.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// The direction of a single 4-adjacent step from `from` to `to`.
    ///
    /// Horizontal displacement wins over vertical; `None` when the cells are identical.
    pub fn between(from: IVec2, to: IVec2) -> Option<Direction> {
        if from.x < to.x {
            Some(Direction::Right)
        } else if from.x > to.x {
            Some(Direction::Left)
        } else if from.y < to.y {
            Some(Direction::Up)
        } else if from.y > to.y {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => IVec2::Y,
            Direction::Down => -IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}
