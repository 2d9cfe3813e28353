//! Falling-block engine core - pure, deterministic, and testable
//!
//! This crate owns the rules: the grid, the shape catalog, movement and
//! rotation, locking and line clears, scoring, levels and gravity speed.
//! It never renders, never reads input and never touches a platform timer.
//!
//! - **Deterministic**: shape order comes from an injected [`ShapeGenerator`]
//! - **Soft-fail**: illegal moves return `false` and leave state untouched
//! - **Single entry point**: commands and gravity ticks both go through
//!   [`GameSession`]
//!
//! # Module Structure
//!
//! - [`grid`]: playfield storage and the placement validator
//! - [`shapes`]: rest offsets, pivots and the rotation formula
//! - [`piece`]: an active shape instance
//! - [`rng`]: seedable random sources and shape generators
//! - [`lock`]: committing a piece and clearing full rows
//! - [`scoring`]: points, level and gravity interval
//! - [`gravity`]: the timer abstraction and its scheduler
//! - [`session`]: the game aggregate and its command surface
//! - [`events`] / [`snapshot`]: what observers and renderers read
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{GameConfig, GameSession};
//! use falling_blocks_core::types::{GameCommand, Status};
//!
//! let mut game = GameSession::new(GameConfig::default().with_seed(12345)).unwrap();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::Rotate);
//! game.apply(GameCommand::HardDrop);
//!
//! assert_eq!(game.status(), Status::Active);
//! assert_eq!(game.grid().occupied().count(), 4);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod gravity;
pub mod grid;
pub mod lock;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use falling_blocks_types as types;

pub use config::GameConfig;
pub use error::ConfigError;
pub use events::SessionEvent;
pub use gravity::{GravityScheduler, ManualTimer, TickTimer};
pub use grid::Grid;
pub use lock::{lock_piece, LockOutcome};
pub use piece::Piece;
pub use rng::{RandomSource, SequenceGenerator, ShapeGenerator, SimpleRng, UniformGenerator};
pub use scoring::{calculate_level, calculate_line_score, gravity_interval};
pub use session::{GameSession, SessionBuilder};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
