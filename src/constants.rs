//! This module contains all the constants used in the game.

use std::time::Duration;

/// The length of one simulation step. The outer loop drains wall-clock lag in steps of this size.
pub const TICK: Duration = Duration::from_millis(10);
/// [`TICK`] in seconds, as fed to every system.
pub const TICK_SECONDS: f32 = 0.01;
/// The most simulation steps the loop will run to catch up within a single frame.
pub const MAX_CATCH_UP_TICKS: u32 = 25;

/// The size of each cell, in world units.
pub const GRID_DIMENSION: f32 = 23.0;
/// How far (in world units) an actor may be from a cell center and still count as aligned with it.
pub const ALIGN_EPSILON: f32 = 1.0;
/// Slack when comparing accumulated timers against their durations. Well under one tick.
pub const TIMER_EPSILON: f32 = 1e-3;

/// The size of the level designer's canvas, in cells (columns, rows).
pub const DESIGNER_COLUMNS: usize = 32;
pub const DESIGNER_ROWS: usize = 28;

/// Footprint of the pursuer pen, in cells, anchored at its lower-left cell.
pub const PEN_WIDTH: usize = 6;
pub const PEN_HEIGHT: usize = 4;

/// Movement speeds, in world units per second.
pub mod speed {
    pub const PLAYER: f32 = 100.0;
    pub const RANDOM: f32 = 80.0;
    pub const AGGRESSIVE: f32 = 100.0;
    pub const CUNNING: f32 = 90.0;
    pub const SCARED: f32 = 50.0;
    pub const RETREAT: f32 = 100.0;
    pub const SPAWN: f32 = 10.0;
}

/// Pursuer behaviour tuning.
pub mod ai {
    /// Path length (in cells) beyond which the cunning pursuer stops chasing directly.
    pub const CUNNING_ANGER_DISTANCE: usize = 3;
    /// How many cells ahead of the player the cunning pursuer predicts.
    pub const CUNNING_PREDICT_DISTANCE: usize = 10;
    /// Seconds between optional corner turns while scared.
    pub const SCARED_TURN_INTERVAL: f32 = 5.0;
    /// Seconds a pursuer stays scared before reverting to its primary mode.
    pub const SCARED_DURATION: f32 = 10.0;
}

/// Score and timer values.
pub mod mechanics {
    pub const DOT_SCORE: u32 = 10;
    /// Seconds between eating the last dot and the level counting as complete.
    pub const LEVEL_COMPLETE_DELAY: f32 = 2.0;
    /// Seconds between the death clip's "gameover" marker and the game-over transition.
    pub const GAME_OVER_DELAY: f32 = 3.0;
    /// Time into the death clip at which its "gameover" marker fires.
    pub const DEATH_CLIP_MARKER: f32 = 1.5;
}

/// Half extents of the axis-aligned bounding boxes used for pickups and captures.
pub mod collider {
    pub const PLAYER_HALF_EXTENT: f32 = 10.0;
    pub const PURSUER_HALF_EXTENT: f32 = 9.0;
}

/// Pursuer spawn schedule: seconds after level start, primary mode, and skin.
pub mod spawn {
    use crate::systems::ai::ModeKind;

    pub const SCHEDULE: [(f32, ModeKind, &str); 4] = [
        (0.0, ModeKind::Random, "orange"),
        (3.0, ModeKind::Aggressive, "red"),
        (6.0, ModeKind::Cunning, "blue"),
        (9.0, ModeKind::Random, "pink"),
    ];
}

/// The level used when no level file is supplied, as rows from top to bottom.
///
/// `#` wall, `o` power ball, `P` player start, `G` lower-left corner of the pursuer pen, anything else empty.
/// Rows are flipped on load so that the last row becomes `y = 0`.
pub const DEFAULT_LEVEL: [&str; 21] = [
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "####.............##",
    "####..------..#####",
    "####..------..#####",
    "####..------..#####",
    "####..G-----..#####",
    "####..........#####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#.....P.....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];
