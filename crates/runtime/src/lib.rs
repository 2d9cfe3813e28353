//! Runtime - drives a game session from a tokio event loop
//!
//! The core engine is synchronous and timer-free. This crate supplies the
//! two pieces a live game needs around it:
//!
//! - [`TokioTimer`]: a [`TickTimer`](falling_blocks_core::TickTimer) that
//!   posts gravity ticks onto a channel at the current interval
//! - [`SessionDriver`]: the single consumer of that channel, applying user
//!   commands and gravity ticks to the session strictly one at a time
//!
//! # Flow
//!
//! ```text
//! DriverHandle::send ──┐
//!                      ├─> mpsc ─> SessionDriver ─> GameSession
//! TokioTimer task ─────┘                 │
//!                                        ├─> watch<GameSnapshot>
//!                                        └─> broadcast<SessionEvent>
//! ```
//!
//! Every restart or stop of the timer bumps a shared generation counter.
//! Gravity ticks carry the generation they were scheduled under, and the
//! driver drops any tick from an older generation, so a tick already queued
//! when the game paused or restarted never reaches the new state.
//!
//! # Example
//!
//! ```no_run
//! use falling_blocks_core::{GameConfig, GameSession};
//! use falling_blocks_runtime::SessionDriver;
//! use falling_blocks_types::GameCommand;
//!
//! # async fn demo() -> Result<(), falling_blocks_runtime::DriverError> {
//! let (driver, handle) = SessionDriver::new(GameSession::builder(GameConfig::default()))?;
//! let task = tokio::spawn(driver.run());
//!
//! handle.send(GameCommand::MoveLeft);
//! handle.send(GameCommand::HardDrop);
//! println!("score: {}", handle.snapshot().score);
//!
//! handle.shutdown();
//! let _session = task.await.expect("driver task panicked");
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod timer;

pub use driver::{DriverError, DriverHandle, SessionDriver, SessionInput};
pub use timer::TokioTimer;
