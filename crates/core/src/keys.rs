//! Key-state tracker.
//!
//! Holds one [`KeyState`] per scan code. Raw press/release callbacks move keys
//! into `Pressed`/`Struck`/`Repeating`, and [`KeyStates::advance_tick`] ages them
//! once per polling cycle through one of two fixed transition tables.

use crate::types::{KeyState, Modifier, Scancode, SCANCODE_COUNT};

use KeyState::*;

/// Joystick style: anything held collapses straight to `Down`.
const JOYSTICK_TRANS: [KeyState; KeyState::COUNT] = [
    /* Off         => */ Off,
    /* On          => */ On,
    /* Down        => */ Down,
    /* Struck      => */ Off,
    /* Pressed     => */ Down,
    /* DownButOff1 => */ Down,
    /* DownButOff2 => */ Down,
    /* DownButOff3 => */ Down,
    /* Repeating   => */ Down,
];

/// Keyboard style: a fresh press lingers for two ticks before going steady.
const KEYBOARD_TRANS: [KeyState; KeyState::COUNT] = [
    /* Off         => */ Off,
    /* On          => */ On,
    /* Down        => */ Down,
    /* Struck      => */ Off,
    /* Pressed     => */ DownButOff1,
    /* DownButOff1 => */ DownButOff2,
    /* DownButOff2 => */ Down,
    /* DownButOff3 => */ Down,
    /* Repeating   => */ Down,
];

/// The complete table of key states.
#[derive(Debug, Clone)]
pub struct KeyStates {
    states: [KeyState; SCANCODE_COUNT],
}

impl KeyStates {
    pub fn new() -> Self {
        Self {
            states: [Off; SCANCODE_COUNT],
        }
    }

    /// Current state of `code`; untracked codes read as `Off`.
    #[inline]
    pub fn get(&self, code: Scancode) -> KeyState {
        code.index().map_or(Off, |n| self.states[n])
    }

    /// Record a raw press or release.
    ///
    /// Modifier-class keys track physical state only (`On`/`Off`). Codes
    /// outside the table are dropped.
    pub fn apply_event(&mut self, code: Scancode, pressed: bool) {
        let Some(n) = code.index() else {
            return;
        };
        let state = &mut self.states[n];
        *state = if code.is_modifier() {
            if pressed {
                On
            } else {
                Off
            }
        } else if pressed {
            if *state == Off {
                Pressed
            } else {
                Repeating
            }
        } else if *state == Pressed {
            Struck
        } else {
            Off
        };
    }

    /// Age every key by one polling cycle.
    pub fn advance_tick(&mut self, joystick_style: bool) {
        let trans = if joystick_style {
            &JOYSTICK_TRANS
        } else {
            &KEYBOARD_TRANS
        };
        for state in self.states.iter_mut() {
            *state = trans[*state as usize];
        }
    }

    /// Reinitialize every key to `Off`, then replay a press for each code
    /// `is_held` reports as physically down.
    pub fn reset_all(&mut self, mut is_held: impl FnMut(Scancode) -> bool) {
        self.states = [Off; SCANCODE_COUNT];
        for n in 0..SCANCODE_COUNT {
            let code = Scancode(n as u16);
            if is_held(code) {
                self.apply_event(code, true);
            }
        }
    }

    /// True if either the left or right key of `modifier` is down.
    #[inline]
    pub fn modifier_down(&self, modifier: Modifier) -> bool {
        modifier
            .scancodes()
            .iter()
            .any(|&code| !self.get(code).is_off())
    }

    /// First key (in scan-code order) that was struck, pressed or repeated
    /// this tick.
    pub fn first_fresh_key(&self) -> Option<Scancode> {
        self.states
            .iter()
            .position(|s| s.is_fresh())
            .map(|n| Scancode(n as u16))
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}
