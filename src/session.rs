//! Score keeping across the levels of one sitting.

use strum_macros::AsRefStr;
use tracing::info;

use crate::systems::GameStage;

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum LevelOutcome {
    Won,
    Lost,
    /// The run was stopped before the level was decided.
    Abandoned,
}

impl LevelOutcome {
    /// The outcome implied by a stage, if the stage is final.
    pub fn from_stage(stage: GameStage) -> Option<LevelOutcome> {
        match stage {
            GameStage::Won => Some(LevelOutcome::Won),
            GameStage::GameOver => Some(LevelOutcome::Lost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRecord {
    pub score: u32,
    pub outcome: LevelOutcome,
}

/// Remembers every finished level and the best score seen so far.
#[derive(Debug, Clone, Default)]
pub struct Session {
    high_score: u32,
    levels: Vec<LevelRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a high score carried over from somewhere else.
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            levels: Vec::new(),
        }
    }

    /// Records a finished level. Returns `true` if its score set a new high score.
    pub fn record_level(&mut self, score: u32, outcome: LevelOutcome) -> bool {
        self.levels.push(LevelRecord { score, outcome });
        if score > self.high_score {
            info!(score, previous = self.high_score, "New high score");
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn levels(&self) -> &[LevelRecord] {
        &self.levels
    }

    pub fn last_level(&self) -> Option<&LevelRecord> {
        self.levels.last()
    }
}
