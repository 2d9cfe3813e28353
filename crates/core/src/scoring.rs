//! Scoring module - line points, level and gravity speed
//!
//! Every cleared row is worth a flat [`POINTS_PER_LINE`]; there is no
//! multi-line bonus and no combo. Level is `lines / 10`. Gravity starts at
//! one row per second and speeds up by 100ms per level down to 100ms.

use std::time::Duration;

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL, MIN_GRAVITY_MS, POINTS_PER_LINE,
};

/// Points for clearing `rows` rows in a single lock
pub fn calculate_line_score(rows: u32) -> u32 {
    rows.saturating_mul(POINTS_PER_LINE)
}

/// Level for a running total of cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval in milliseconds for a level
pub fn gravity_interval_ms(level: u32) -> u64 {
    BASE_GRAVITY_MS
        .saturating_sub(GRAVITY_STEP_MS.saturating_mul(level as u64))
        .max(MIN_GRAVITY_MS)
}

/// Gravity interval for a level
pub fn gravity_interval(level: u32) -> Duration {
    Duration::from_millis(gravity_interval_ms(level))
}
