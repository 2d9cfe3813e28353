//! Lock module - commit a piece into the grid and clear full rows

use arrayvec::ArrayVec;
use tracing::debug;

use crate::grid::Grid;
use crate::piece::Piece;
use crate::scoring::calculate_line_score;
use crate::types::{Cell, Position, BLOCKS_PER_PIECE};

/// What a single lock did to the grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Blocks written into the grid (those above row 0 are dropped)
    pub written: ArrayVec<Position, BLOCKS_PER_PIECE>,
    /// Removed row indices, bottom row first
    pub cleared_rows: Vec<usize>,
    /// Points earned by the clear
    pub points: u32,
}

impl LockOutcome {
    pub fn rows_cleared(&self) -> u32 {
        self.cleared_rows.len() as u32
    }
}

/// Write `piece` into `grid`, then clear and compact full rows
///
/// Blocks outside the grid are skipped rather than treated as an error.
pub fn lock_piece(grid: &mut Grid, piece: &Piece) -> LockOutcome {
    let mut written = ArrayVec::new();
    for pos in piece.cells() {
        if grid.set(pos.x, pos.y, Cell::Occupied(piece.tag)) {
            written.push(pos);
        }
    }

    let cleared_rows = grid.clear_full_rows();
    let points = calculate_line_score(cleared_rows.len() as u32);

    debug!(
        kind = piece.kind.as_str(),
        x = piece.origin.x,
        y = piece.origin.y,
        written = written.len(),
        cleared = cleared_rows.len(),
        "piece locked"
    );

    LockOutcome {
        written,
        cleared_rows,
        points,
    }
}
