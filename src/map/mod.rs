//! This module defines the level data, the navigation grid built from it, and pathfinding over that grid.

pub mod builder;
pub mod designer;
pub mod direction;
pub mod grid;
pub mod layout;
pub mod path;
pub mod tile;
