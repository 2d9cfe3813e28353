use serde::Serialize;

use crate::piece::Piece;
use crate::shapes::ShapeOffsets;
use crate::types::{Cell, Position, ShapeKind, Status, Tag, BLOCKS_PER_PIECE};

/// Active piece as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub tag: Tag,
    pub cells: [Position; BLOCKS_PER_PIECE],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            tag: value.tag,
            cells: value.cells(),
        }
    }
}

/// Next piece for the preview box (relative offsets only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NextSnapshot {
    pub kind: ShapeKind,
    pub tag: Tag,
    pub offsets: ShapeOffsets,
}

impl From<Piece> for NextSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            tag: value.tag,
            offsets: value.blocks,
        }
    }
}

/// Read-only copy of everything a presentation layer needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Grid rows, top row first
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub status: Status,
    pub gravity_ms: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == Status::Active
    }

    /// Cell at `(x, y)` with the active piece drawn over the grid
    pub fn composed_cell(&self, x: usize, y: usize) -> Option<Cell> {
        let base = *self.grid.get(y)?.get(x)?;
        let covered = self.active.as_ref().and_then(|active| {
            active
                .cells
                .iter()
                .any(|p| p.x == x as i32 && p.y == y as i32)
                .then_some(Cell::Occupied(active.tag))
        });
        Some(covered.unwrap_or(base))
    }
}
