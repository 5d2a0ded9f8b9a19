//! Mouse-state tracker.
//!
//! Only the most recent button press is kept. Once consumed, a primary-button
//! click keeps answering [`Command::PRESERVE`] for three more polls so a single
//! click acts like a short hold.

use crate::types::{Command, KeyState, MouseButton};

/// The last mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseAction {
    pub state: KeyState,
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
}

impl Default for MouseAction {
    fn default() -> Self {
        Self {
            state: KeyState::Off,
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    action: MouseAction,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> MouseAction {
        self.action
    }

    /// Record a button event. Releases are ignored; a press replaces whatever
    /// was pending.
    pub fn apply_click(&mut self, x: i32, y: i32, button: MouseButton, pressed: bool) {
        if pressed {
            self.action = MouseAction {
                state: KeyState::Pressed,
                x,
                y,
                button,
            };
        }
    }

    /// Step the pending action once and return the command it yields.
    ///
    /// `map_position` turns a pointer position into a grid cell index.
    pub fn take_command(
        &mut self,
        map_position: impl FnOnce(i32, i32) -> Option<u32>,
    ) -> Option<Command> {
        let action = &mut self.action;
        match action.state {
            KeyState::Pressed => {
                action.state = KeyState::Off;
                match action.button {
                    MouseButton::Left => {
                        let cmd = map_position(action.x, action.y)
                            .and_then(Command::abs_mouse_move)?;
                        action.state = KeyState::DownButOff1;
                        Some(cmd)
                    }
                    MouseButton::WheelDown => Some(Command::NEXT),
                    MouseButton::WheelUp => Some(Command::PREV),
                    _ => None,
                }
            }
            KeyState::DownButOff1 => {
                action.state = KeyState::DownButOff2;
                Some(Command::PRESERVE)
            }
            KeyState::DownButOff2 => {
                action.state = KeyState::DownButOff3;
                Some(Command::PRESERVE)
            }
            KeyState::DownButOff3 => {
                action.state = KeyState::Off;
                Some(Command::PRESERVE)
            }
            _ => None,
        }
    }
}
