//! Command resolver: one command (or none) per poll.
//!
//! Each poll advances the key states, pumps the event source, then scans the
//! active command table in order:
//!
//! - A binding whose key was just pressed (or is held, for hold bindings) is a
//!   *primary* command. The first one wins outright, except that in joystick
//!   style a directional command waits for a perpendicular partner and returns
//!   the merged command (e.g. `NORTH | EAST`) if one is asserted.
//! - A binding whose key was struck or repeated becomes the *fallback*; the
//!   last such binding wins, but only if no primary command was found.
//! - A binding whose key is in the first two linger ticks marks the poll as
//!   lingering.
//!
//! With nothing found on the keyboard the mouse tracker is consulted. A
//! non-waiting poll that still finds nothing answers [`Command::PRESERVE`] if
//! some key was lingering.

use anyhow::Result;
use tracing::{debug, trace};

use crate::keymap::{can_merge, merge_mask, KeyBinding, GAME_KEYS, TEXT_ENTRY_KEYS};
use crate::keys::KeyStates;
use crate::mouse::MouseTracker;
use crate::source::{EventSource, InputSink};
use crate::types::{Command, KeyState, Modifier, MouseButton, Scancode};
use crate::InputConfig;

/// Key and mouse trackers, fed by the event source during a pump.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: KeyStates,
    pub mouse: MouseTracker,
}

impl InputSink for InputState {
    fn key_event(&mut self, code: Scancode, pressed: bool) {
        self.keys.apply_event(code, pressed);
    }

    fn mouse_event(&mut self, x: i32, y: i32, button: MouseButton, pressed: bool) {
        self.mouse.apply_click(x, y, button, pressed);
    }
}

/// Outcome of scanning the command table once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Scan {
    cmd: Option<Command>,
    lingering: bool,
}

/// Polls an [`EventSource`] and turns key and mouse activity into commands.
pub struct InputResolver<S> {
    source: S,
    state: InputState,
    bindings: &'static [KeyBinding],
    text_entry: bool,
    joystick_style: bool,
}

impl<S: EventSource> InputResolver<S> {
    /// Resolver in game mode with keyboard-style repeat.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: InputState::default(),
            bindings: GAME_KEYS,
            text_entry: false,
            joystick_style: false,
        }
    }

    pub fn with_config(source: S, config: InputConfig) -> Self {
        let mut resolver = Self::new(source);
        resolver.set_text_entry_mode(config.text_entry);
        resolver.set_repeat_style(config.joystick_style);
        resolver
    }

    /// Poll for the active command.
    ///
    /// With `wait` set, keep pumping (blocking on the source) until some
    /// command is produced. Without it, poll once; `None` means no command.
    pub fn poll_command(&mut self, wait: bool) -> Result<Option<Command>> {
        let mut lingering;
        loop {
            self.state.keys.advance_tick(self.joystick_style);
            self.source.pump(wait, &mut self.state)?;

            let scan = self.scan();
            lingering = scan.lingering;
            let found = scan.cmd.or_else(|| {
                self.state
                    .mouse
                    .take_command(|x, y| self.source.map_position(x, y))
            });
            if let Some(cmd) = found {
                trace!(%cmd, "resolved command");
                return Ok(Some(cmd));
            }
            if !wait {
                break;
            }
        }
        Ok(lingering.then_some(Command::PRESERVE))
    }

    fn scan(&self) -> Scan {
        let keys = &self.state.keys;
        let mut primary: Option<Command> = None;
        let mut fallback = None;
        let mut lingering = false;

        for binding in self.bindings {
            let state = keys.get(binding.scancode);
            if state.is_off() || !self.modifiers_match(binding) {
                continue;
            }

            if state == KeyState::Pressed || (binding.hold && state == KeyState::Down) {
                match primary {
                    None => {
                        primary = Some(binding.cmd);
                        if !self.joystick_style || merge_mask(binding.cmd) == 0 {
                            return Scan {
                                cmd: primary,
                                lingering,
                            };
                        }
                    }
                    Some(first) if can_merge(first, binding.cmd) => {
                        return Scan {
                            cmd: Some(first | binding.cmd),
                            lingering,
                        };
                    }
                    Some(_) => {}
                }
            } else if matches!(state, KeyState::Struck | KeyState::Repeating) {
                fallback = Some(binding.cmd);
            } else if matches!(state, KeyState::DownButOff1 | KeyState::DownButOff2) {
                lingering = true;
            }
        }

        Scan {
            cmd: primary.or(fallback),
            lingering,
        }
    }

    fn modifiers_match(&self, binding: &KeyBinding) -> bool {
        let keys = &self.state.keys;
        binding.shift.accepts(keys.modifier_down(Modifier::Shift))
            && binding.ctrl.accepts(keys.modifier_down(Modifier::Ctrl))
            && binding.alt.accepts(keys.modifier_down(Modifier::Alt))
    }

    /// Block until a non-modifier key is struck, pressed or repeated.
    ///
    /// Keys already down when this is called are ignored. Returns `false` if
    /// the key was Q or Escape (the user wants out), `true` for anything else.
    pub fn wait_for_any_key(&mut self) -> Result<bool> {
        self.state.keys.advance_tick(self.joystick_style);
        self.source.pump(false, &mut self.state)?;
        loop {
            self.state.keys.advance_tick(self.joystick_style);
            self.source.pump(true, &mut self.state)?;
            if let Some(code) = self.state.keys.first_fresh_key() {
                debug!(scancode = code.0, "any key");
                return Ok(code != Scancode::Q && code != Scancode::ESCAPE);
            }
        }
    }

    /// Swap between the gameplay and text-entry command tables.
    pub fn set_text_entry_mode(&mut self, enabled: bool) {
        self.text_entry = enabled;
        self.bindings = if enabled { TEXT_ENTRY_KEYS } else { GAME_KEYS };
        debug!(enabled, "text entry mode");
    }

    /// Switch repeat style and re-synchronize key states with the hardware.
    pub fn set_repeat_style(&mut self, joystick_style: bool) {
        self.joystick_style = joystick_style;
        let source = &self.source;
        self.state.keys.reset_all(|code| source.is_key_down(code));
        debug!(joystick_style, "repeat style");
    }

    pub fn is_text_entry(&self) -> bool {
        self.text_entry
    }

    pub fn is_joystick_style(&self) -> bool {
        self.joystick_style
    }

    pub fn keys(&self) -> &KeyStates {
        &self.state.keys
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptedSource;
    use crate::source::RawEvent;

    fn resolver() -> InputResolver<ScriptedSource> {
        InputResolver::new(ScriptedSource::new())
    }

    #[test]
    fn tap_yields_command_once() {
        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::N), RawEvent::release(Scancode::N)])
            .idle(1);

        assert_eq!(r.poll_command(false).unwrap(), Some(Command::NEXT));
        assert_eq!(r.poll_command(false).unwrap(), None);
    }

    #[test]
    fn first_primary_short_circuits_in_keyboard_style() {
        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::S), RawEvent::press(Scancode::N)]);
        // N precedes S in the game table.
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::NEXT));
    }

    #[test]
    fn primary_beats_fallback() {
        let mut r = resolver();
        r.source_mut().tick([
            RawEvent::press(Scancode::R),
            RawEvent::release(Scancode::R),
            RawEvent::press(Scancode::S),
        ]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::SEE_SCORES));
    }

    #[test]
    fn last_fallback_wins() {
        let mut r = resolver();
        r.source_mut().tick([
            RawEvent::press(Scancode::P),
            RawEvent::release(Scancode::P),
            RawEvent::press(Scancode::S),
            RawEvent::release(Scancode::S),
        ]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::SEE_SCORES));
    }

    #[test]
    fn modifier_requirements_select_binding() {
        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::RSHIFT), RawEvent::press(Scancode::Q)]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::QUIT));

        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::LCTRL), RawEvent::press(Scancode::R)]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::SAME_LEVEL));

        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::LALT), RawEvent::press(Scancode::F4)]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::QUIT));
    }

    #[test]
    fn alt_blocks_unmodified_bindings() {
        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::RALT), RawEvent::press(Scancode::N)]);
        assert_eq!(r.poll_command(false).unwrap(), None);
    }

    #[test]
    fn lingering_key_answers_preserve() {
        let mut r = resolver();
        r.source_mut().tick([RawEvent::press(Scancode::P)]).idle(3);

        assert_eq!(r.poll_command(false).unwrap(), Some(Command::PREV));
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::PRESERVE));
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::PRESERVE));
        assert_eq!(r.poll_command(false).unwrap(), None);
    }

    #[test]
    fn text_entry_table_produces_letters() {
        let mut r = resolver();
        r.set_text_entry_mode(true);
        assert!(r.is_text_entry());
        r.source_mut().tick([RawEvent::press(Scancode::Q)]);
        assert_eq!(r.poll_command(false).unwrap(), Some(Command::letter(b'q')));

        r.set_text_entry_mode(false);
        assert!(!r.is_text_entry());
    }

    #[test]
    fn waiting_poll_loops_until_a_command() {
        let mut r = resolver();
        r.source_mut()
            .tick([RawEvent::press(Scancode::K)])
            .tick([RawEvent::press(Scancode::RETURN)]);
        assert_eq!(r.poll_command(true).unwrap(), Some(Command::PROCEED));
        assert_eq!(r.source().pumps(), 2);
    }

    #[test]
    fn waiting_poll_surfaces_source_errors() {
        let mut r = resolver();
        assert!(r.poll_command(true).is_err());
    }

    #[test]
    fn with_config_applies_mode() {
        let cfg = InputConfig::new().with_joystick_style(true).with_text_entry(true);
        let r = InputResolver::with_config(ScriptedSource::new(), cfg);
        assert!(r.is_joystick_style());
        assert!(r.is_text_entry());
    }
}
