//! Terminal input module.
//!
//! Feeds `crossterm` key and mouse events into the input core as scan-code
//! press/release and mouse-button events. Works with terminals that report key
//! releases (keyboard enhancement protocol) and, through a release timeout,
//! with terminals that don't.

pub mod config;
pub mod map;
pub mod source;

pub use tworld_input_core as core;
pub use tworld_input_types as types;

pub use config::TermConfig;
pub use map::scancode_for;
pub use source::TermEventSource;
