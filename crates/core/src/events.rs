//! Change events emitted by a session after each successful mutation
//!
//! The session only buffers events; it has no opinion on how they are
//! delivered. Observers pull them with
//! [`GameSession::drain_events`](crate::session::GameSession::drain_events).

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Position, ShapeKind, BLOCKS_PER_PIECE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Grid reset and two fresh pieces drawn
    NewGame,
    /// Active piece translated
    Moved { dx: i32, dy: i32 },
    /// Active piece rotated about its pivot
    Rotated,
    /// Active piece committed to the grid
    Locked {
        kind: ShapeKind,
        written: ArrayVec<Position, BLOCKS_PER_PIECE>,
        rows_cleared: u32,
        points: u32,
    },
    /// Level went up; gravity now runs at `interval_ms`
    LevelChanged { level: u32, interval_ms: u64 },
    /// Next piece became active
    Spawned { kind: ShapeKind },
    Paused,
    Resumed,
    /// A freshly spawned piece collided; the session is over
    GameOver,
}
