//! Command tables: which key (plus modifier requirements) produces which command.
//!
//! Tables are ordered. Earlier entries win when several bindings are asserted
//! in the same poll, so the order encodes priority between overlapping
//! bindings (e.g. `Q` vs. `Shift-Q`).

use crate::types::{Command, KeyReq, Scancode};

use KeyReq::{Any, Down, Up};

/// One entry of a command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub scancode: Scancode,
    pub shift: KeyReq,
    pub ctrl: KeyReq,
    pub alt: KeyReq,
    pub cmd: Command,
    /// Keep firing every tick while the key is held.
    pub hold: bool,
}

const fn bind(
    scancode: Scancode,
    shift: KeyReq,
    ctrl: KeyReq,
    alt: KeyReq,
    cmd: Command,
    hold: bool,
) -> KeyBinding {
    KeyBinding {
        scancode,
        shift,
        ctrl,
        alt,
        cmd,
        hold,
    }
}

const fn letter(scancode: Scancode, c: u8) -> KeyBinding {
    bind(scancode, Any, Up, Up, Command::letter(c), false)
}

/// Commands recognized while playing.
pub static GAME_KEYS: &[KeyBinding] = &[
    bind(Scancode::UP, Up, Up, Up, Command::NORTH, true),
    bind(Scancode::LEFT, Up, Up, Up, Command::WEST, true),
    bind(Scancode::DOWN, Up, Up, Up, Command::SOUTH, true),
    bind(Scancode::RIGHT, Up, Up, Up, Command::EAST, true),
    bind(Scancode::KP_8, Up, Up, Up, Command::NORTH, true),
    bind(Scancode::KP_4, Up, Up, Up, Command::WEST, true),
    bind(Scancode::KP_2, Up, Up, Up, Command::SOUTH, true),
    bind(Scancode::KP_6, Up, Up, Up, Command::EAST, true),
    bind(Scancode::Q, Up, Up, Up, Command::QUIT_LEVEL, false),
    bind(Scancode::P, Up, Down, Up, Command::PREV_LEVEL, false),
    bind(Scancode::R, Up, Down, Up, Command::SAME_LEVEL, false),
    bind(Scancode::N, Up, Down, Up, Command::NEXT_LEVEL, false),
    bind(Scancode::G, Up, Any, Up, Command::GOTO_LEVEL, false),
    bind(Scancode::Q, Down, Up, Up, Command::QUIT, false),
    bind(Scancode::PAGEUP, Any, Any, Up, Command::PREV_10, false),
    bind(Scancode::P, Up, Up, Up, Command::PREV, false),
    bind(Scancode::R, Up, Up, Up, Command::SAME, false),
    bind(Scancode::N, Up, Up, Up, Command::NEXT, false),
    bind(Scancode::PAGEDOWN, Any, Any, Up, Command::NEXT_10, false),
    bind(Scancode::BACKSPACE, Any, Any, Up, Command::PAUSE_GAME, false),
    bind(Scancode::F1, Any, Any, Up, Command::HELP, false),
    bind(Scancode::O, Up, Up, Up, Command::STEPPING, false),
    bind(Scancode::O, Down, Up, Up, Command::SUB_STEPPING, false),
    bind(Scancode::F, Up, Up, Up, Command::RND_SLIDE_DIR, false),
    bind(Scancode::TAB, Up, Any, Up, Command::PLAYBACK, false),
    bind(Scancode::TAB, Down, Any, Up, Command::CHECK_SOLUTION, false),
    bind(Scancode::X, Up, Down, Up, Command::REPL_SOLUTION, false),
    bind(Scancode::X, Down, Down, Up, Command::KILL_SOLUTION, false),
    bind(Scancode::S, Up, Up, Up, Command::SEE_SCORES, false),
    bind(Scancode::S, Up, Down, Up, Command::SEE_SOLUTION_FILES, false),
    bind(Scancode::V, Down, Up, Up, Command::VOLUME_UP, false),
    bind(Scancode::V, Up, Up, Up, Command::VOLUME_DOWN, false),
    bind(Scancode::RETURN, Any, Any, Up, Command::PROCEED, false),
    bind(Scancode::KP_ENTER, Any, Any, Up, Command::PROCEED, false),
    bind(Scancode::SPACE, Any, Any, Up, Command::PROCEED, false),
    bind(Scancode::D, Up, Up, Up, Command::DEBUG_CMD_1, false),
    bind(Scancode::D, Down, Up, Up, Command::DEBUG_CMD_2, false),
    bind(Scancode::UP, Down, Up, Up, Command::CHEAT_NORTH, true),
    bind(Scancode::LEFT, Down, Up, Up, Command::CHEAT_WEST, true),
    bind(Scancode::DOWN, Down, Up, Up, Command::CHEAT_SOUTH, true),
    bind(Scancode::RIGHT, Down, Up, Up, Command::CHEAT_EAST, true),
    bind(Scancode::HOME, Down, Up, Up, Command::CHEAT_HOME, false),
    bind(Scancode::F10, Up, Up, Up, Command::CHEAT_STUFF, false),
    bind(Scancode::F4, Up, Up, Down, Command::QUIT, false),
];

/// Commands recognized while the user is typing (e.g. a level password).
pub static TEXT_ENTRY_KEYS: &[KeyBinding] = &[
    bind(Scancode::UP, Any, Any, Up, Command::NORTH, false),
    bind(Scancode::LEFT, Any, Any, Up, Command::WEST, false),
    bind(Scancode::DOWN, Any, Any, Up, Command::SOUTH, false),
    bind(Scancode::RIGHT, Any, Any, Up, Command::EAST, false),
    bind(Scancode::BACKSPACE, Any, Any, Up, Command::WEST, false),
    bind(Scancode::SPACE, Any, Any, Up, Command::EAST, false),
    bind(Scancode::RETURN, Any, Any, Up, Command::PROCEED, false),
    bind(Scancode::KP_ENTER, Any, Any, Up, Command::PROCEED, false),
    bind(Scancode::ESCAPE, Any, Any, Up, Command::QUIT_LEVEL, false),
    letter(Scancode::A, b'a'),
    letter(Scancode::B, b'b'),
    letter(Scancode::C, b'c'),
    letter(Scancode::D, b'd'),
    letter(Scancode::E, b'e'),
    letter(Scancode::F, b'f'),
    letter(Scancode::G, b'g'),
    letter(Scancode::H, b'h'),
    letter(Scancode::I, b'i'),
    letter(Scancode::J, b'j'),
    letter(Scancode::K, b'k'),
    letter(Scancode::L, b'l'),
    letter(Scancode::M, b'm'),
    letter(Scancode::N, b'n'),
    letter(Scancode::O, b'o'),
    letter(Scancode::P, b'p'),
    letter(Scancode::Q, b'q'),
    letter(Scancode::R, b'r'),
    letter(Scancode::S, b's'),
    letter(Scancode::T, b't'),
    letter(Scancode::U, b'u'),
    letter(Scancode::V, b'v'),
    letter(Scancode::W, b'w'),
    letter(Scancode::X, b'x'),
    letter(Scancode::Y, b'y'),
    letter(Scancode::Z, b'z'),
    bind(Scancode::F4, Up, Up, Down, Command::QUIT, false),
];

/// Directions `cmd` may be OR-combined with when held together.
///
/// Only single directional commands have partners; everything else returns 0.
///
/// ```
/// use tworld_input_core::keymap::merge_mask;
/// use tworld_input_core::types::Command;
///
/// assert_eq!(merge_mask(Command::NORTH), (Command::WEST | Command::EAST).0);
/// assert_eq!(merge_mask(Command::QUIT), 0);
/// ```
pub fn merge_mask(cmd: Command) -> u32 {
    match cmd {
        Command::NORTH | Command::SOUTH => (Command::WEST | Command::EAST).0,
        Command::WEST | Command::EAST => (Command::NORTH | Command::SOUTH).0,
        _ => 0,
    }
}

/// True if `other` may be merged into `primary`.
#[inline]
pub fn can_merge(primary: Command, other: Command) -> bool {
    primary.is_key_move() && merge_mask(primary) & other.0 == other.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_hold_in_game_but_not_in_text_entry() {
        let up = GAME_KEYS.iter().find(|b| b.scancode == Scancode::UP).unwrap();
        assert_eq!(up.cmd, Command::NORTH);
        assert!(up.hold);

        let up = TEXT_ENTRY_KEYS
            .iter()
            .find(|b| b.scancode == Scancode::UP)
            .unwrap();
        assert!(!up.hold);
    }

    #[test]
    fn plain_q_precedes_shift_q() {
        let pos = |cmd| GAME_KEYS.iter().position(|b| b.scancode == Scancode::Q && b.cmd == cmd);
        assert!(pos(Command::QUIT_LEVEL) < pos(Command::QUIT));
    }

    #[test]
    fn text_entry_covers_every_letter() {
        for c in b'a'..=b'z' {
            let code = Scancode::from_letter(c as char).unwrap();
            let b = TEXT_ENTRY_KEYS
                .iter()
                .find(|b| b.scancode == code && b.cmd == Command::letter(c));
            assert!(b.is_some(), "missing letter {}", c as char);
        }
    }

    #[test]
    fn tables_have_no_sentinel_entries() {
        for b in GAME_KEYS.iter().chain(TEXT_ENTRY_KEYS) {
            assert_ne!(b.scancode, Scancode::UNKNOWN);
            assert_ne!(b.cmd, Command::NONE);
        }
    }

    #[test]
    fn only_perpendicular_directions_merge() {
        assert!(can_merge(Command::NORTH, Command::EAST));
        assert!(can_merge(Command::WEST, Command::SOUTH));
        assert!(!can_merge(Command::NORTH, Command::SOUTH));
        assert!(!can_merge(Command::EAST, Command::WEST));
        assert!(!can_merge(Command::NORTH, Command::QUIT));
        assert!(!can_merge(Command::PROCEED, Command::EAST));
    }
}
