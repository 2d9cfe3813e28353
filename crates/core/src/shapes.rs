//! Shape catalog - rest offsets and pivots for the seven kinds
//!
//! Offsets are `(dx, dy)` relative to the piece origin, with `y` pointing
//! down. Every kind has exactly four blocks and pivots on block index 1,
//! except `O`, which never rotates.
//!
//! ```text
//! I  ####     J  ###     L  ###     O  ##
//!                  #        #          ##
//!
//! S   ##      T  ###     Z  ##
//!    ##           #          ##
//! ```

use crate::types::{Position, ShapeKind, BLOCKS_PER_PIECE};

/// Offset of a single block relative to the piece origin
pub type BlockOffset = (i32, i32);

/// The four block offsets of a piece
pub type ShapeOffsets = [BlockOffset; BLOCKS_PER_PIECE];

/// Index of the pivot block for every rotating kind
pub const PIVOT_INDEX: usize = 1;

/// Rest offsets for a kind
pub fn rest_offsets(kind: ShapeKind) -> ShapeOffsets {
    match kind {
        ShapeKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        ShapeKind::J => [(-1, 0), (0, 0), (1, 0), (1, 1)],
        ShapeKind::L => [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        ShapeKind::S => [(-1, 1), (0, 1), (0, 0), (1, 0)],
        ShapeKind::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        ShapeKind::Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
    }
}

/// Pivot block index, `None` for kinds that never rotate
pub fn pivot_index(kind: ShapeKind) -> Option<usize> {
    match kind {
        ShapeKind::O => None,
        _ => Some(PIVOT_INDEX),
    }
}

/// Rotate offsets 90° about the block at `pivot`
///
/// Each block's position relative to the pivot `(dx, dy)` maps to
/// `(-dy, dx)`, which is a clockwise quarter turn on a y-down grid.
/// Four applications give back the input exactly.
pub fn rotate_offsets(offsets: &ShapeOffsets, pivot: usize) -> ShapeOffsets {
    let (pdx, pdy) = offsets[pivot];
    offsets.map(|(dx, dy)| {
        let (rel_x, rel_y) = (dx - pdx, dy - pdy);
        (pdx - rel_y, pdy + rel_x)
    })
}

/// Spawn origin for a grid of `width` columns
///
/// Horizontally centered (rounding left on even widths) on the top row.
pub fn spawn_origin(width: usize) -> Position {
    Position::new((width as i32 - 1) / 2, 0)
}
