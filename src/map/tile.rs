//! The per-cell tags that make up a level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::error::ParseError;

const WALL_PREFIX: &str = "WALL";
const BALL_TAG: &str = "BALL";
const GHOST_PEN_TAG: &str = "GHOST_PEN";
const MUNCH_MAN_TAG: &str = "MUNCH_MAN";

/// Visual variant of a wall cell, derived from which of its four neighbours are also walls.
///
/// Names describe the open ends: a `left` wall only connects to the right, `t-top` has walls left, right and below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum WallSkin {
    #[default]
    Single,
    Left,
    Right,
    Horizontal,
    Top,
    Bottom,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    #[strum(serialize = "t-top")]
    TTop,
    #[strum(serialize = "t-bottom")]
    TBottom,
    #[strum(serialize = "t-left")]
    TLeft,
    #[strum(serialize = "t-right")]
    TRight,
    FourWay,
}

impl WallSkin {
    /// Picks the skin for a wall given which neighbours are walls (`top` is `y + 1`).
    pub fn from_neighbours(left: bool, right: bool, top: bool, bottom: bool) -> WallSkin {
        match (left, right, top, bottom) {
            (true, false, false, false) => WallSkin::Right,
            (false, true, false, false) => WallSkin::Left,
            (true, true, false, false) => WallSkin::Horizontal,
            (false, false, true, false) => WallSkin::Bottom,
            (false, true, true, false) => WallSkin::BottomLeft,
            (true, false, true, false) => WallSkin::BottomRight,
            (true, true, true, true) => WallSkin::FourWay,
            (true, true, true, false) => WallSkin::TBottom,
            (false, true, true, true) => WallSkin::TLeft,
            (true, false, true, true) => WallSkin::TRight,
            (true, true, false, true) => WallSkin::TTop,
            (false, false, false, true) => WallSkin::Top,
            (false, true, false, true) => WallSkin::TopLeft,
            (true, false, false, true) => WallSkin::TopRight,
            (false, false, true, true) => WallSkin::Vertical,
            (false, false, false, false) => WallSkin::Single,
        }
    }
}

/// The content of one level cell. An empty cell has no tag at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CellTag {
    Wall(WallSkin),
    Ball,
    /// Lower-left corner of the 6x4 pursuer pen.
    GhostPen,
    /// The player's start cell.
    MunchMan,
}

impl CellTag {
    pub fn is_wall(&self) -> bool {
        matches!(self, CellTag::Wall(_))
    }

    /// Parses a single character of an ASCII level drawing.
    ///
    /// Empty cells (`.`, `-` and space) map to `None`.
    pub fn parse_character(c: char) -> Result<Option<CellTag>, ParseError> {
        match c {
            '#' => Ok(Some(CellTag::Wall(WallSkin::Single))),
            'o' => Ok(Some(CellTag::Ball)),
            'P' => Ok(Some(CellTag::MunchMan)),
            'G' => Ok(Some(CellTag::GhostPen)),
            '.' | '-' | ' ' => Ok(None),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }
}

impl FromStr for CellTag {
    type Err = ParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            BALL_TAG => Ok(CellTag::Ball),
            GHOST_PEN_TAG => Ok(CellTag::GhostPen),
            MUNCH_MAN_TAG => Ok(CellTag::MunchMan),
            _ => match tag.strip_prefix(WALL_PREFIX) {
                Some("") => Ok(CellTag::Wall(WallSkin::Single)),
                Some(skin) => WallSkin::from_str(skin)
                    .map(CellTag::Wall)
                    .map_err(|_| ParseError::UnknownWallSkin(skin.to_string())),
                None => Err(ParseError::UnknownTag(tag.to_string())),
            },
        }
    }
}

impl fmt::Display for CellTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellTag::Wall(skin) => {
                let skin: &str = skin.as_ref();
                write!(f, "{WALL_PREFIX}{skin}")
            }
            CellTag::Ball => f.write_str(BALL_TAG),
            CellTag::GhostPen => f.write_str(GHOST_PEN_TAG),
            CellTag::MunchMan => f.write_str(MUNCH_MAN_TAG),
        }
    }
}

impl TryFrom<String> for CellTag {
    type Error = ParseError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<CellTag> for String {
    fn from(tag: CellTag) -> Self {
        tag.to_string()
    }
}
