//! The navigation grid: per-cell walkability and the world/cell coordinate conversions.

use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::{ALIGN_EPSILON, GRID_DIMENSION};
use crate::map::direction::Direction;

/// Walkability of every cell in a level. Fixed once the level is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGrid {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

impl NavGrid {
    /// Builds a grid by asking `walkable` about every cell.
    pub fn from_fn(width: usize, height: usize, mut walkable: impl FnMut(IVec2) -> bool) -> Self {
        let (width, height) = (width as i32, height as i32);
        let mut cells = Vec::with_capacity((width * height).max(0) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(walkable(IVec2::new(x, y)));
            }
        }
        Self {
            width,
            height,
            walkable: cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        self.in_bounds(cell) && self.walkable[(cell.y * self.width + cell.x) as usize]
    }

    /// Whether the neighbour of `cell` in `direction` can be entered.
    pub fn is_open(&self, cell: IVec2, direction: Direction) -> bool {
        self.is_walkable(cell + direction.as_ivec2())
    }

    /// Directions leading to walkable neighbours, in [`Direction::DIRECTIONS`] order.
    pub fn open_directions(&self, cell: IVec2) -> SmallVec<[Direction; 4]> {
        Direction::DIRECTIONS
            .into_iter()
            .filter(|&direction| self.is_open(cell, direction))
            .collect()
    }

    /// Walkable 4-neighbours of `cell`, in [`Direction::DIRECTIONS`] order.
    pub fn neighbours(&self, cell: IVec2) -> SmallVec<[IVec2; 4]> {
        self.open_directions(cell)
            .into_iter()
            .map(|direction| cell + direction.as_ivec2())
            .collect()
    }
}

/// The cell containing a world position.
pub fn cell_of(position: Vec2) -> IVec2 {
    (position / GRID_DIMENSION).floor().as_ivec2()
}

/// World position of a cell's center.
pub fn cell_center(cell: IVec2) -> Vec2 {
    (cell.as_vec2() + Vec2::splat(0.5)) * GRID_DIMENSION
}

/// Whether `position` is within [`ALIGN_EPSILON`] of its cell's center on both axes.
pub fn is_aligned(position: Vec2) -> bool {
    let offset = position - cell_center(cell_of(position));
    offset.abs().cmple(Vec2::splat(ALIGN_EPSILON)).all()
}
