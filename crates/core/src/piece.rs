//! Piece module - an active shape instance on the grid

use crate::shapes::{pivot_index, rest_offsets, rotate_offsets, spawn_origin, ShapeOffsets};
use crate::types::{Position, ShapeKind, Tag, BLOCKS_PER_PIECE};

/// A shape placed at an absolute origin
///
/// Block positions are `origin + offset`. Rotation rewrites the offsets in
/// place about the pivot block and never moves the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub origin: Position,
    pub tag: Tag,
    pub blocks: ShapeOffsets,
    /// Index into `blocks` used as the rotation center (`None` for O)
    pub pivot: Option<usize>,
}

impl Piece {
    /// Piece of `kind` in its rest orientation at `origin`
    pub fn new(kind: ShapeKind, origin: Position, tag: Tag) -> Self {
        Self {
            kind,
            origin,
            tag,
            blocks: rest_offsets(kind),
            pivot: pivot_index(kind),
        }
    }

    /// Piece of `kind` at the spawn origin for a `width`-column grid,
    /// carrying the kind's canonical tag
    pub fn spawn(kind: ShapeKind, width: usize) -> Self {
        Self::new(kind, spawn_origin(width), Tag::for_kind(kind))
    }

    /// Absolute positions of the four blocks
    pub fn cells(&self) -> [Position; BLOCKS_PER_PIECE] {
        self.blocks
            .map(|(dx, dy)| self.origin.offset(dx, dy))
    }

    /// Copy shifted by `(dx, dy)`
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.offset(dx, dy),
            ..*self
        }
    }

    /// Copy rotated 90° about the pivot, `None` if this kind never rotates
    pub fn rotated(&self) -> Option<Self> {
        let pivot = self.pivot?;
        Some(Self {
            blocks: rotate_offsets(&self.blocks, pivot),
            ..*self
        })
    }
}
