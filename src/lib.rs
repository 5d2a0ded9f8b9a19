//! Tile World style input (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof:
//! `tworld_input::{core, term, types}`.

pub use tworld_input_core as core;
pub use tworld_input_term as term;
pub use tworld_input_types as types;
