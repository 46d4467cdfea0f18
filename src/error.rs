//! Centralized error types for the Munch Man game.
//!
//! Level data problems surface here as structured errors; the simulation itself never fails
//! (an unreachable target just stops the pursuer until the next grid point).

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the Munch Man game.
///
/// This is the primary error type that should be used in public APIs.
/// It doubles as an ECS event so systems can report inconsistent world state without panicking.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Level tag error: {0}")]
    Parse(#[from] ParseError),

    #[error("Level file error: {0}")]
    LevelIo(#[from] LevelIoError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for the per-cell level tags.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown cell tag: {0:?}")]
    UnknownTag(String),
    #[error("Unknown wall skin: {0:?}")]
    UnknownWallSkin(String),
    #[error("Unknown character in level: {0:?}")]
    UnknownCharacter(char),
}

/// Errors raised while reading or writing `.lvl` files.
#[derive(thiserror::Error, Debug)]
pub enum LevelIoError {
    #[error("Malformed level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not access level file: {0}")]
    Io(#[from] io::Error),
}

/// Errors related to structurally unusable levels.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Level has no MUNCH_MAN start cell")]
    MissingPlayerStart,

    #[error("Level has no GHOST_PEN")]
    MissingGhostPen,

    #[error("Level has no cells")]
    EmptyLevel,

    #[error("Level column {column} has {found} cells, expected {expected}")]
    Ragged { column: usize, expected: usize, found: usize },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
