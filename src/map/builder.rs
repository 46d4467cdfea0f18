//! Map construction: turns a [`LevelLayout`] into the navigation grid, spawn points and pickups.

use bevy_ecs::resource::Resource;
use glam::{IVec2, Vec2};
use tracing::{debug, warn};

use crate::constants::GRID_DIMENSION;
use crate::error::{GameResult, MapError};
use crate::map::grid::{cell_center, NavGrid};
use crate::map::layout::{footprint, LevelLayout};
use crate::map::path::reachable_from;
use crate::map::tile::{CellTag, WallSkin};

/// The pursuer pen, derived from the `GHOST_PEN` anchor at its lower-left cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Lower-left cell of the footprint.
    pub anchor: IVec2,
    /// The walkable cell just above the pen's door, which retreating pursuers path to.
    pub entrance: IVec2,
    /// Where new pursuers appear.
    pub spawn_point: Vec2,
    /// The point inside the pen a retreating pursuer walks to before respawning.
    pub home_point: Vec2,
}

impl Pen {
    pub fn new(anchor: IVec2) -> Self {
        let size = footprint(CellTag::GhostPen);
        let entrance = IVec2::new(anchor.x + size.x / 2, anchor.y + size.y);
        Self {
            anchor,
            entrance,
            spawn_point: cell_center(entrance - IVec2::Y),
            home_point: Vec2::new(
                (entrance.x as f32 + 0.5) * GRID_DIMENSION,
                (entrance.y as f32 - 2.5) * GRID_DIMENSION,
            ),
        }
    }

    /// Whether `cell` lies inside the pen's footprint.
    pub fn contains(&self, cell: IVec2) -> bool {
        let size = footprint(CellTag::GhostPen);
        cell.cmpge(self.anchor).all() && cell.cmplt(self.anchor + size).all()
    }
}

/// The playable form of a level.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    pub grid: NavGrid,
    pub player_start: IVec2,
    pub pen: Pen,
    /// One dot per empty cell reachable from the player start, in column-major order.
    pub dots: Vec<IVec2>,
    pub power_balls: Vec<IVec2>,
    pub walls: Vec<(IVec2, WallSkin)>,
}

impl Map {
    /// Creates a new `Map` from a layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty or ragged, or lacks a player start or pen.
    /// Playability beyond that (an enclosed player, a blocked pen door) is not checked.
    pub fn new(layout: &LevelLayout) -> GameResult<Map> {
        layout.validate()?;

        let mut player_start = None;
        let mut pen_anchor = None;
        let mut power_balls = Vec::new();
        let mut walls = Vec::new();

        for (cell, tag) in layout.cells() {
            match tag {
                CellTag::Wall(skin) => walls.push((cell, skin)),
                CellTag::Ball => power_balls.push(cell),
                CellTag::MunchMan if player_start.is_none() => player_start = Some(cell),
                CellTag::GhostPen if pen_anchor.is_none() => pen_anchor = Some(cell),
                duplicate => warn!(tag = %duplicate, x = cell.x, y = cell.y, "Ignoring duplicate level marker"),
            }
        }

        let player_start = player_start.ok_or(MapError::MissingPlayerStart)?;
        let pen = Pen::new(pen_anchor.ok_or(MapError::MissingGhostPen)?);

        let grid = NavGrid::from_fn(layout.width(), layout.height(), |cell| {
            !pen.contains(cell) && !layout.get(cell).is_some_and(|tag| tag.is_wall())
        });

        if !grid.is_walkable(pen.entrance) {
            warn!(x = pen.entrance.x, y = pen.entrance.y, "Pen entrance is blocked, pursuers cannot leave the pen");
        }

        let reachable = reachable_from(&grid, player_start);
        let dots: Vec<IVec2> = (0..layout.width() as i32)
            .flat_map(|x| (0..layout.height() as i32).map(move |y| IVec2::new(x, y)))
            .filter(|cell| layout.get(*cell).is_none() && reachable.contains(cell))
            .collect();

        debug!(
            width = layout.width(),
            height = layout.height(),
            walls = walls.len(),
            dots = dots.len(),
            power_balls = power_balls.len(),
            "Map built"
        );

        Ok(Map {
            grid,
            player_start,
            pen,
            dots,
            power_balls,
            walls,
        })
    }
}
