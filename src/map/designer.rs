//! Level designer model: which element the next click places, and when a design may be saved.

use std::path::Path;

use glam::IVec2;
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::map::layout::{LevelLayout, PlaceKind};
use crate::map::tile::CellTag;

pub struct LevelDesigner {
    layout: LevelLayout,
    kind: PlaceKind,
}

impl Default for LevelDesigner {
    fn default() -> Self {
        Self::new(LevelLayout::designer_canvas())
    }
}

impl LevelDesigner {
    pub fn new(layout: LevelLayout) -> Self {
        let mut designer = Self {
            layout,
            kind: PlaceKind::GhostPen,
        };
        designer.kind = designer.next_placement_kind();
        designer
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn into_layout(self) -> LevelLayout {
        self.layout
    }

    /// The element the next placement will create.
    pub fn kind(&self) -> PlaceKind {
        self.kind
    }

    /// The pen is placed first, then the player start; after that walls and power balls alternate.
    pub fn next_placement_kind(&self) -> PlaceKind {
        if self.layout.find(CellTag::GhostPen).is_none() {
            PlaceKind::GhostPen
        } else if self.layout.find(CellTag::MunchMan).is_none() {
            PlaceKind::MunchMan
        } else if self.kind == PlaceKind::Wall {
            PlaceKind::PowerBall
        } else {
            PlaceKind::Wall
        }
    }

    /// Switches between walls and power balls once the pen and player are down.
    pub fn cycle_kind(&mut self) -> PlaceKind {
        self.kind = self.next_placement_kind();
        self.kind
    }

    pub fn place(&mut self, cell: IVec2) -> bool {
        let kind = self.kind;
        let placed = self.layout.place(kind, cell);
        if placed {
            debug!(?kind, x = cell.x, y = cell.y, "Placed element");
            if matches!(kind, PlaceKind::GhostPen | PlaceKind::MunchMan) {
                self.kind = self.next_placement_kind();
            }
        }
        placed
    }

    pub fn erase(&mut self, cell: IVec2) -> Option<CellTag> {
        let erased = self.layout.erase(cell)?;
        debug!(tag = %erased, x = cell.x, y = cell.y, "Erased element");
        if matches!(erased, CellTag::GhostPen | CellTag::MunchMan) {
            self.kind = self.next_placement_kind();
        }
        Some(erased)
    }

    /// A design is only playable once it has both a pen and a player start.
    pub fn can_save(&self) -> bool {
        self.layout.find(CellTag::GhostPen).is_some() && self.layout.find(CellTag::MunchMan).is_some()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        if !self.can_save() {
            return Err(GameError::InvalidState(
                "A level needs a ghost pen and a player start before it can be saved".to_string(),
            ));
        }
        self.layout.save(path.as_ref())?;
        info!(path = %path.as_ref().display(), "Level saved");
        Ok(())
    }
}
