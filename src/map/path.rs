//! Shortest paths and reachability over a [`NavGrid`].

use std::collections::HashSet;

use glam::IVec2;
use pathfinding::prelude::{astar, bfs_reach};

use crate::map::grid::NavGrid;

/// Finds a shortest 4-directional path from `from` to `to` over walkable cells.
///
/// The returned cells exclude `from` and end with `to`, so the first element is the next step.
/// Identical endpoints yield an empty path; `None` means `to` cannot be reached.
/// Ties are broken by neighbour order, so the same query always returns the same path.
pub fn find_path(grid: &NavGrid, from: IVec2, to: IVec2) -> Option<Vec<IVec2>> {
    if !grid.is_walkable(to) {
        return None;
    }

    let (mut path, _cost) = astar(
        &from,
        |&cell| grid.neighbours(cell).into_iter().map(|next| (next, 1u32)),
        |&cell| manhattan(cell, to),
        |&cell| cell == to,
    )?;

    path.remove(0);
    Some(path)
}

/// All walkable cells connected to `start`, including `start` itself.
pub fn reachable_from(grid: &NavGrid, start: IVec2) -> HashSet<IVec2> {
    bfs_reach(start, |&cell| grid.neighbours(cell)).collect()
}

pub fn manhattan(a: IVec2, b: IVec2) -> u32 {
    let delta = (a - b).abs();
    (delta.x + delta.y) as u32
}
