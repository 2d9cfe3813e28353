//! Falling blocks (workspace facade crate).
//!
//! Re-exports the engine crates under one path so hosts and integration
//! tests can write `falling_blocks::{core, runtime, types}` without naming
//! each crate under `crates/`.

pub use falling_blocks_core as core;
pub use falling_blocks_runtime as runtime;
pub use falling_blocks_types as types;
