//! Input core - pure, deterministic, and testable
//!
//! This crate turns raw key and mouse events into game commands, one command
//! per poll. It performs no I/O of its own: hardware events arrive through an
//! [`EventSource`], which the resolver pumps once per tick.
//!
//! # Module Structure
//!
//! - [`keys`]: per-scan-code state table and its two tick transition tables
//! - [`mouse`]: pending click and its three-poll linger
//! - [`keymap`]: ordered game / text-entry command tables and the merge table
//! - [`resolver`]: [`InputResolver`], the per-tick command resolution and mode control
//! - [`help`]: static key-binding help for each screen
//! - [`source`]: the [`EventSource`] / [`InputSink`] seam
//! - [`script`]: [`ScriptedSource`], a deterministic source for tests and benches
//!
//! # Repeat Styles
//!
//! - **Keyboard style**: a fresh press is reported once, then lingers for two
//!   polls (answered with [`Command::PRESERVE`]) before the key settles to
//!   `Down`. Hold bindings (movement) keep firing while `Down`.
//! - **Joystick style**: held keys collapse straight to `Down`, and two held
//!   perpendicular directions merge into one diagonal command.
//!
//! # Example
//!
//! ```
//! use tworld_input_core::{InputResolver, RawEvent, ScriptedSource};
//! use tworld_input_core::types::{Command, Scancode};
//!
//! let mut source = ScriptedSource::new();
//! source.tick([RawEvent::press(Scancode::UP), RawEvent::press(Scancode::RIGHT)]);
//!
//! let mut input = InputResolver::new(source);
//! input.set_repeat_style(true);
//! assert_eq!(
//!     input.poll_command(false).unwrap(),
//!     Some(Command::NORTH | Command::EAST)
//! );
//! ```

pub mod config;
pub mod help;
pub mod keymap;
pub mod keys;
pub mod mouse;
pub mod resolver;
pub mod script;
pub mod source;

pub use tworld_input_types as types;

pub use config::InputConfig;
pub use help::{help_table, HelpContext, HelpEntry, HelpTable};
pub use keymap::KeyBinding;
pub use keys::KeyStates;
pub use mouse::{MouseAction, MouseTracker};
pub use resolver::{InputResolver, InputState};
pub use script::ScriptedSource;
pub use source::{EventSource, InputSink, RawEvent};

pub use types::Command;
