//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the input stack.
//! All types are pure data with no external dependencies, so they can be used
//! by the state machine, the terminal event source, and the demo binary alike.
//!
//! # Scan Codes
//!
//! [`Scancode`] follows the USB HID usage numbering (the same numbering SDL
//! uses), so a scan code identifies a physical key independent of layout.
//! Only codes below [`SCANCODE_COUNT`] are tracked.
//!
//! # Command Space
//!
//! Commands are opaque integers wrapped in [`Command`]:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | `0` | no command (never produced, see [`Command::NONE`]) |
//! | `1..=15` | directional moves, one bit per direction |
//! | `16..=96` | absolute mouse moves onto a 9x9 grid |
//! | `'a'..='z'` | letters produced in text-entry mode |
//! | `129..` | named commands (above [`Command::RESERVED`]) |
//!
//! Directional commands are bit flags so two of them can be merged:
//!
//! ```
//! use tworld_input_types::Command;
//!
//! let diagonal = Command::NORTH | Command::EAST;
//! assert!(diagonal.is_key_move());
//! assert!(diagonal.contains(Command::NORTH));
//! assert!(!diagonal.contains(Command::WEST));
//! ```
//!
//! # Key States
//!
//! | State | Meaning |
//! |-------|---------|
//! | `Off` | not pressed |
//! | `On` | modifier-class key held down |
//! | `Down` | held, already reported |
//! | `Struck` | pressed and released within one tick |
//! | `Pressed` | first tick observing a press |
//! | `DownButOff1..3` | held, aging through the linger window |
//! | `Repeating` | pressed again while already down |

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Number of scan codes tracked by the key-state table.
pub const SCANCODE_COUNT: usize = 512;

/// Polling interval of the game loop in milliseconds (20 ticks per second).
pub const TICK_MS: u32 = 50;

/// Width of the logical grid addressed by absolute mouse moves.
pub const GRID_WIDTH: u32 = 9;

/// Height of the logical grid addressed by absolute mouse moves.
pub const GRID_HEIGHT: u32 = 9;

/// A hardware scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scancode(pub u16);

impl Scancode {
    pub const UNKNOWN: Scancode = Scancode(0);

    pub const A: Scancode = Scancode(4);
    pub const B: Scancode = Scancode(5);
    pub const C: Scancode = Scancode(6);
    pub const D: Scancode = Scancode(7);
    pub const E: Scancode = Scancode(8);
    pub const F: Scancode = Scancode(9);
    pub const G: Scancode = Scancode(10);
    pub const H: Scancode = Scancode(11);
    pub const I: Scancode = Scancode(12);
    pub const J: Scancode = Scancode(13);
    pub const K: Scancode = Scancode(14);
    pub const L: Scancode = Scancode(15);
    pub const M: Scancode = Scancode(16);
    pub const N: Scancode = Scancode(17);
    pub const O: Scancode = Scancode(18);
    pub const P: Scancode = Scancode(19);
    pub const Q: Scancode = Scancode(20);
    pub const R: Scancode = Scancode(21);
    pub const S: Scancode = Scancode(22);
    pub const T: Scancode = Scancode(23);
    pub const U: Scancode = Scancode(24);
    pub const V: Scancode = Scancode(25);
    pub const W: Scancode = Scancode(26);
    pub const X: Scancode = Scancode(27);
    pub const Y: Scancode = Scancode(28);
    pub const Z: Scancode = Scancode(29);

    /// Digit row `1` (digits `1..=9` follow, then `0`).
    pub const NUM_1: Scancode = Scancode(30);
    pub const NUM_0: Scancode = Scancode(39);

    pub const RETURN: Scancode = Scancode(40);
    pub const ESCAPE: Scancode = Scancode(41);
    pub const BACKSPACE: Scancode = Scancode(42);
    pub const TAB: Scancode = Scancode(43);
    pub const SPACE: Scancode = Scancode(44);

    pub const CAPSLOCK: Scancode = Scancode(57);

    pub const F1: Scancode = Scancode(58);
    pub const F2: Scancode = Scancode(59);
    pub const F3: Scancode = Scancode(60);
    pub const F4: Scancode = Scancode(61);
    pub const F5: Scancode = Scancode(62);
    pub const F6: Scancode = Scancode(63);
    pub const F7: Scancode = Scancode(64);
    pub const F8: Scancode = Scancode(65);
    pub const F9: Scancode = Scancode(66);
    pub const F10: Scancode = Scancode(67);
    pub const F11: Scancode = Scancode(68);
    pub const F12: Scancode = Scancode(69);

    pub const INSERT: Scancode = Scancode(73);
    pub const HOME: Scancode = Scancode(74);
    pub const PAGEUP: Scancode = Scancode(75);
    pub const DELETE: Scancode = Scancode(76);
    pub const END: Scancode = Scancode(77);
    pub const PAGEDOWN: Scancode = Scancode(78);
    pub const RIGHT: Scancode = Scancode(79);
    pub const LEFT: Scancode = Scancode(80);
    pub const DOWN: Scancode = Scancode(81);
    pub const UP: Scancode = Scancode(82);

    pub const NUMLOCKCLEAR: Scancode = Scancode(83);
    pub const KP_ENTER: Scancode = Scancode(88);
    pub const KP_1: Scancode = Scancode(89);
    pub const KP_2: Scancode = Scancode(90);
    pub const KP_3: Scancode = Scancode(91);
    pub const KP_4: Scancode = Scancode(92);
    pub const KP_5: Scancode = Scancode(93);
    pub const KP_6: Scancode = Scancode(94);
    pub const KP_7: Scancode = Scancode(95);
    pub const KP_8: Scancode = Scancode(96);
    pub const KP_9: Scancode = Scancode(97);
    pub const KP_0: Scancode = Scancode(98);

    pub const LCTRL: Scancode = Scancode(224);
    pub const LSHIFT: Scancode = Scancode(225);
    pub const LALT: Scancode = Scancode(226);
    pub const LGUI: Scancode = Scancode(227);
    pub const RCTRL: Scancode = Scancode(228);
    pub const RSHIFT: Scancode = Scancode(229);
    pub const RALT: Scancode = Scancode(230);
    pub const RGUI: Scancode = Scancode(231);
    pub const MODE: Scancode = Scancode(257);

    /// Index into the key-state table, or `None` for untracked codes.
    #[inline]
    pub fn index(self) -> Option<usize> {
        let n = self.0 as usize;
        (n < SCANCODE_COUNT).then_some(n)
    }

    /// Modifier-class keys only ever take the `On`/`Off` states.
    ///
    /// ```
    /// use tworld_input_types::Scancode;
    ///
    /// assert!(Scancode::LSHIFT.is_modifier());
    /// assert!(Scancode::CAPSLOCK.is_modifier());
    /// assert!(!Scancode::Q.is_modifier());
    /// ```
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Scancode::LSHIFT
                | Scancode::RSHIFT
                | Scancode::LCTRL
                | Scancode::RCTRL
                | Scancode::LALT
                | Scancode::RALT
                | Scancode::LGUI
                | Scancode::RGUI
                | Scancode::NUMLOCKCLEAR
                | Scancode::CAPSLOCK
                | Scancode::MODE
        )
    }

    /// Scan code of a lowercase ASCII letter.
    pub fn from_letter(c: char) -> Option<Self> {
        c.is_ascii_lowercase()
            .then(|| Scancode(Scancode::A.0 + (c as u16 - 'a' as u16)))
    }
}

/// The aggregated modifiers a key binding can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    /// The left and right physical keys making up this modifier.
    pub fn scancodes(self) -> [Scancode; 2] {
        match self {
            Modifier::Shift => [Scancode::LSHIFT, Scancode::RSHIFT],
            Modifier::Ctrl => [Scancode::LCTRL, Scancode::RCTRL],
            Modifier::Alt => [Scancode::LALT, Scancode::RALT],
        }
    }
}

/// Per-key state, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum KeyState {
    #[default]
    Off = 0,
    On,
    Down,
    Struck,
    Pressed,
    DownButOff1,
    DownButOff2,
    DownButOff3,
    Repeating,
}

impl KeyState {
    pub const COUNT: usize = 9;

    #[inline]
    pub fn is_off(self) -> bool {
        self == KeyState::Off
    }

    /// States observed on the tick a key was freshly struck, pressed or repeated.
    #[inline]
    pub fn is_fresh(self) -> bool {
        matches!(
            self,
            KeyState::Struck | KeyState::Pressed | KeyState::Repeating
        )
    }
}

/// Tri-state modifier requirement of a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyReq {
    /// The modifier must be held.
    Down,
    /// The modifier must not be held.
    Up,
    /// Don't care.
    Any,
}

impl KeyReq {
    #[inline]
    pub fn accepts(self, down: bool) -> bool {
        match self {
            KeyReq::Down => down,
            KeyReq::Up => !down,
            KeyReq::Any => true,
        }
    }
}

/// Mouse buttons reported by an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    Other(u8),
}

/// A command identifier.
///
/// `Command` is a thin wrapper over the integer command space so merged
/// directional commands keep their exact bit positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Command(pub u32);

impl Command {
    pub const NONE: Command = Command(0);

    pub const NORTH: Command = Command(1);
    pub const WEST: Command = Command(2);
    pub const SOUTH: Command = Command(4);
    pub const EAST: Command = Command(8);
    /// Highest value a (possibly merged) directional command can take.
    pub const KEY_MOVE_LAST: Command = Command(15);

    pub const ABS_MOUSE_MOVE_FIRST: Command = Command(16);
    pub const ABS_MOUSE_MOVE_LAST: Command =
        Command(16 + GRID_WIDTH * GRID_HEIGHT - 1);

    /// Values at or below this are reserved for moves and text-entry letters.
    pub const RESERVED: Command = Command(128);

    pub const PREV_LEVEL: Command = Command(129);
    pub const NEXT_LEVEL: Command = Command(130);
    pub const SAME_LEVEL: Command = Command(131);
    pub const QUIT_LEVEL: Command = Command(132);
    pub const GOTO_LEVEL: Command = Command(133);
    pub const PREV: Command = Command(134);
    pub const NEXT: Command = Command(135);
    pub const SAME: Command = Command(136);
    pub const PREV_10: Command = Command(137);
    pub const NEXT_10: Command = Command(138);
    pub const PAUSE_GAME: Command = Command(139);
    pub const HELP: Command = Command(140);
    pub const PLAYBACK: Command = Command(141);
    pub const CHECK_SOLUTION: Command = Command(142);
    pub const REPL_SOLUTION: Command = Command(143);
    pub const KILL_SOLUTION: Command = Command(144);
    pub const SEE_SCORES: Command = Command(145);
    pub const SEE_SOLUTION_FILES: Command = Command(146);
    pub const VOLUME_UP: Command = Command(147);
    pub const VOLUME_DOWN: Command = Command(148);
    pub const STEPPING: Command = Command(149);
    pub const SUB_STEPPING: Command = Command(150);
    pub const RND_SLIDE_DIR: Command = Command(151);
    pub const PROCEED: Command = Command(152);
    pub const DEBUG_CMD_1: Command = Command(153);
    pub const DEBUG_CMD_2: Command = Command(154);
    pub const QUIT: Command = Command(155);
    /// Continue treating the previous tick's command as still active.
    pub const PRESERVE: Command = Command(156);
    pub const CHEAT_NORTH: Command = Command(157);
    pub const CHEAT_WEST: Command = Command(158);
    pub const CHEAT_SOUTH: Command = Command(159);
    pub const CHEAT_EAST: Command = Command(160);
    pub const CHEAT_HOME: Command = Command(161);
    pub const CHEAT_STUFF: Command = Command(162);

    /// Directional move, possibly merged from two directions.
    #[inline]
    pub fn is_key_move(self) -> bool {
        self.0 >= Command::NORTH.0 && self.0 <= Command::KEY_MOVE_LAST.0
    }

    /// Absolute mouse move onto grid cell `index`, if the cell is on the grid.
    ///
    /// ```
    /// use tworld_input_types::Command;
    ///
    /// assert_eq!(Command::abs_mouse_move(3), Some(Command(19)));
    /// assert_eq!(Command::abs_mouse_move(81), None);
    /// ```
    pub fn abs_mouse_move(index: u32) -> Option<Command> {
        (index < GRID_WIDTH * GRID_HEIGHT).then(|| Command(Command::ABS_MOUSE_MOVE_FIRST.0 + index))
    }

    /// Grid cell of an absolute mouse move.
    pub fn mouse_cell(self) -> Option<u32> {
        (self >= Command::ABS_MOUSE_MOVE_FIRST && self <= Command::ABS_MOUSE_MOVE_LAST)
            .then(|| self.0 - Command::ABS_MOUSE_MOVE_FIRST.0)
    }

    /// Text-entry letter command.
    pub const fn letter(c: u8) -> Command {
        Command(c as u32)
    }

    /// The letter a text-entry command stands for.
    pub fn as_letter(self) -> Option<char> {
        char::from_u32(self.0).filter(|c| c.is_ascii_lowercase())
    }

    /// True if every bit of `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: Command) -> bool {
        self.0 & other.0 == other.0
    }

    /// Human readable name for logs and the demo binary.
    pub fn name(self) -> &'static str {
        match self {
            Command::NONE => "none",
            Command::NORTH => "north",
            Command::WEST => "west",
            Command::SOUTH => "south",
            Command::EAST => "east",
            Command::PREV_LEVEL => "prevLevel",
            Command::NEXT_LEVEL => "nextLevel",
            Command::SAME_LEVEL => "sameLevel",
            Command::QUIT_LEVEL => "quitLevel",
            Command::GOTO_LEVEL => "gotoLevel",
            Command::PREV => "prev",
            Command::NEXT => "next",
            Command::SAME => "same",
            Command::PREV_10 => "prev10",
            Command::NEXT_10 => "next10",
            Command::PAUSE_GAME => "pauseGame",
            Command::HELP => "help",
            Command::PLAYBACK => "playback",
            Command::CHECK_SOLUTION => "checkSolution",
            Command::REPL_SOLUTION => "replSolution",
            Command::KILL_SOLUTION => "killSolution",
            Command::SEE_SCORES => "seeScores",
            Command::SEE_SOLUTION_FILES => "seeSolutionFiles",
            Command::VOLUME_UP => "volumeUp",
            Command::VOLUME_DOWN => "volumeDown",
            Command::STEPPING => "stepping",
            Command::SUB_STEPPING => "subStepping",
            Command::RND_SLIDE_DIR => "rndSlideDir",
            Command::PROCEED => "proceed",
            Command::DEBUG_CMD_1 => "debugCmd1",
            Command::DEBUG_CMD_2 => "debugCmd2",
            Command::QUIT => "quit",
            Command::PRESERVE => "preserve",
            Command::CHEAT_NORTH => "cheatNorth",
            Command::CHEAT_WEST => "cheatWest",
            Command::CHEAT_SOUTH => "cheatSouth",
            Command::CHEAT_EAST => "cheatEast",
            Command::CHEAT_HOME => "cheatHome",
            Command::CHEAT_STUFF => "cheatStuff",
            c if c.is_key_move() => "move",
            c if c.mouse_cell().is_some() => "absMouseMove",
            c if c.as_letter().is_some() => "letter",
            _ => "unknown",
        }
    }
}

impl BitOr for Command {
    type Output = Command;

    #[inline]
    fn bitor(self, rhs: Command) -> Command {
        Command(self.0 | rhs.0)
    }
}

impl BitOrAssign for Command {
    #[inline]
    fn bitor_assign(&mut self, rhs: Command) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({}:{})", self.0, self.name())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.as_letter() {
            return write!(f, "letter '{c}'");
        }
        if let Some(cell) = self.mouse_cell() {
            return write!(f, "absMouseMove({cell})");
        }
        if self.is_key_move() && self.0.count_ones() > 1 {
            let mut first = true;
            for dir in [Command::NORTH, Command::WEST, Command::SOUTH, Command::EAST] {
                if self.contains(dir) {
                    if !first {
                        f.write_str("|")?;
                    }
                    f.write_str(dir.name())?;
                    first = false;
                }
            }
            return Ok(());
        }
        f.write_str(self.name())
    }
}
