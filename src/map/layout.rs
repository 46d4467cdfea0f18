//! The level as a plain 2D array of cell tags, plus the editing operations used to design one.
//!
//! A layout is column-major: `columns[x][y]`, with `y = 0` at the bottom. This is also the
//! on-disk `.lvl` format, serialized as JSON with `null` for empty cells.

use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{DEFAULT_LEVEL, DESIGNER_COLUMNS, DESIGNER_ROWS, PEN_HEIGHT, PEN_WIDTH};
use crate::error::{GameResult, LevelIoError, MapError};
use crate::map::tile::{CellTag, WallSkin};

/// What a designer click places into the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    Wall,
    PowerBall,
    GhostPen,
    MunchMan,
}

impl PlaceKind {
    fn tag(self) -> CellTag {
        match self {
            PlaceKind::Wall => CellTag::Wall(WallSkin::Single),
            PlaceKind::PowerBall => CellTag::Ball,
            PlaceKind::GhostPen => CellTag::GhostPen,
            PlaceKind::MunchMan => CellTag::MunchMan,
        }
    }
}

/// Size in cells of the element a tag anchors (the pen spans several cells from its lower-left corner).
pub fn footprint(tag: CellTag) -> IVec2 {
    match tag {
        CellTag::GhostPen => IVec2::new(PEN_WIDTH as i32, PEN_HEIGHT as i32),
        _ => IVec2::ONE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelLayout {
    columns: Vec<Vec<Option<CellTag>>>,
}

impl LevelLayout {
    /// An empty layout of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            columns: vec![vec![None; height]; width],
        }
    }

    /// The empty canvas the level designer starts from.
    pub fn designer_canvas() -> Self {
        Self::new(DESIGNER_COLUMNS, DESIGNER_ROWS)
    }

    /// Builds a layout from an ASCII drawing, top row first.
    ///
    /// Short rows are padded with empty cells. Wall skins are derived from the finished drawing.
    pub fn from_rows(rows: &[&str]) -> GameResult<Self> {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut layout = Self::new(width, height);

        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row;
            for (x, character) in line.chars().enumerate() {
                layout.columns[x][y] = CellTag::parse_character(character)?;
            }
        }

        layout.reskin_all();
        layout.validate()?;
        Ok(layout)
    }

    /// The built-in level.
    pub fn default_level() -> GameResult<Self> {
        Self::from_rows(&DEFAULT_LEVEL)
    }

    /// Parses a `.lvl` document.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let layout: LevelLayout = serde_json::from_str(json).map_err(LevelIoError::from)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self).map_err(LevelIoError::from)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading level file");
        let json = fs::read_to_string(path).map_err(LevelIoError::from)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), width = self.width(), height = self.height(), "Saving level file");
        fs::write(path, self.to_json()?).map_err(LevelIoError::from)?;
        Ok(())
    }

    /// Rejects layouts that have no cells or whose columns differ in length.
    pub fn validate(&self) -> Result<(), MapError> {
        let expected = self.height();
        if self.columns.is_empty() || expected == 0 {
            return Err(MapError::EmptyLevel);
        }
        match self.columns.iter().position(|column| column.len() != expected) {
            Some(column) => Err(MapError::Ragged {
                column,
                expected,
                found: self.columns[column].len(),
            }),
            None => Ok(()),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width() && (cell.y as usize) < self.height()
    }

    /// The tag anchored at `cell`, if any. Out of bounds reads as empty.
    pub fn get(&self, cell: IVec2) -> Option<CellTag> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.columns[cell.x as usize].get(cell.y as usize).copied().flatten()
    }

    fn set(&mut self, cell: IVec2, tag: Option<CellTag>) {
        if let Some(slot) = self
            .columns
            .get_mut(cell.x as usize)
            .and_then(|column| column.get_mut(cell.y as usize))
        {
            *slot = tag;
        }
    }

    /// Every tagged cell in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, CellTag)> + '_ {
        self.columns.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter_map(move |(y, tag)| tag.map(|tag| (IVec2::new(x as i32, y as i32), tag)))
        })
    }

    /// The anchor cell of the first element with the given tag.
    pub fn find(&self, wanted: CellTag) -> Option<IVec2> {
        self.cells().find(|(_, tag)| *tag == wanted).map(|(cell, _)| cell)
    }

    /// The element covering `cell`, including cells inside a multi-cell footprint.
    pub fn element_at(&self, cell: IVec2) -> Option<(IVec2, CellTag)> {
        if let Some(tag) = self.get(cell) {
            return Some((cell, tag));
        }
        self.cells().find(|(anchor, tag)| {
            let size = footprint(*tag);
            cell.cmpge(*anchor).all() && cell.cmplt(*anchor + size).all()
        })
    }

    fn wall_exists(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(|tag| tag.is_wall())
    }

    /// Re-derives the skin of the wall at `cell` from its neighbours. No-op for non-walls.
    pub fn reskin(&mut self, cell: IVec2) {
        if !self.wall_exists(cell) {
            return;
        }
        let skin = WallSkin::from_neighbours(
            self.wall_exists(cell - IVec2::X),
            self.wall_exists(cell + IVec2::X),
            self.wall_exists(cell + IVec2::Y),
            self.wall_exists(cell - IVec2::Y),
        );
        self.set(cell, Some(CellTag::Wall(skin)));
    }

    fn reskin_around(&mut self, cell: IVec2) {
        for target in [cell, cell - IVec2::X, cell + IVec2::X, cell - IVec2::Y, cell + IVec2::Y] {
            self.reskin(target);
        }
    }

    pub fn reskin_all(&mut self) {
        let walls: Vec<IVec2> = self.cells().filter(|(_, tag)| tag.is_wall()).map(|(cell, _)| cell).collect();
        for cell in walls {
            self.reskin(cell);
        }
    }

    /// Places an element anchored at `cell`.
    ///
    /// Fails (returning `false`) when the footprint leaves the layout or overlaps another element,
    /// or when a second pen or player start would be created.
    pub fn place(&mut self, kind: PlaceKind, cell: IVec2) -> bool {
        let tag = kind.tag();
        let size = footprint(tag);

        if matches!(kind, PlaceKind::GhostPen | PlaceKind::MunchMan) && self.find(tag).is_some() {
            trace!(?kind, "Only one instance allowed");
            return false;
        }
        if !self.in_bounds(cell) || !self.in_bounds(cell + size - IVec2::ONE) {
            return false;
        }
        for x in 0..size.x {
            for y in 0..size.y {
                if self.element_at(cell + IVec2::new(x, y)).is_some() {
                    return false;
                }
            }
        }

        self.set(cell, Some(tag));
        self.reskin_around(cell);
        true
    }

    /// Removes whichever element covers `cell`, returning it.
    pub fn erase(&mut self, cell: IVec2) -> Option<CellTag> {
        let (anchor, tag) = self.element_at(cell)?;
        self.set(anchor, None);
        self.reskin_around(anchor);
        Some(tag)
    }
}
