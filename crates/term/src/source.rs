//! Terminal event source.
//!
//! Drains `crossterm` events into an [`InputSink`]. Terminals that support the
//! keyboard enhancement protocol report real key releases. Everywhere else a
//! key is considered released once no press or auto-repeat for it has been
//! seen for a short timeout, so a tap still reads as a press followed by a
//! release.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
    KeyboardEnhancementFlags, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::{debug, warn};

use crate::core::{EventSource, InputSink};
use crate::map::{self, MODIFIER_FLAGS};
use crate::types::{MouseButton, Scancode, GRID_HEIGHT, GRID_WIDTH, SCANCODE_COUNT};
use crate::TermConfig;

/// Keys held without release reporting; further presses are dropped.
const MAX_TIMED_KEYS: usize = 32;

pub struct TermEventSource {
    config: TermConfig,
    release_events: bool,
    held: [bool; SCANCODE_COUNT],
    timed: ArrayVec<(Scancode, Instant), MAX_TIMED_KEYS>,
    interrupted: bool,
    entered: bool,
}

impl TermEventSource {
    pub fn new(config: TermConfig) -> Self {
        Self {
            config,
            release_events: false,
            held: [false; SCANCODE_COUNT],
            timed: ArrayVec::new(),
            interrupted: false,
            entered: false,
        }
    }

    /// Enter raw mode, capture the mouse, and ask for key release events.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture)?;

        self.release_events =
            self.config.release_events && terminal::supports_keyboard_enhancement()?;
        if self.release_events {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
            debug!("keyboard enhancement enabled");
        } else {
            warn!(
                timeout_ms = self.config.release_timeout.as_millis() as u64,
                "terminal does not report key releases, using timeout"
            );
        }
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        let mut stdout = io::stdout();
        if self.release_events {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(stdout, DisableMouseCapture)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// True once Ctrl-C has been seen.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Handle one terminal event. Returns true if anything reached the sink.
    pub fn handle_event(&mut self, event: Event, now: Instant, sink: &mut dyn InputSink) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, now, sink),
            Event::Mouse(mouse) => self.handle_mouse(mouse, sink),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant, sink: &mut dyn InputSink) -> bool {
        if key.kind != KeyEventKind::Release && map::is_interrupt(key) {
            self.interrupted = true;
        }

        let mut delivered = false;
        if !matches!(key.code, event::KeyCode::Modifier(_)) {
            delivered |= self.sync_modifiers(key, sink);
        }

        let Some(code) = map::scancode_for(key.code, key.state) else {
            return delivered;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.set_key(code, true, sink);
                if !self.release_events && !code.is_modifier() {
                    self.touch(code, now);
                }
            }
            KeyEventKind::Release => {
                self.set_key(code, false, sink);
                self.timed.retain(|(c, _)| *c != code);
            }
        }
        true
    }

    /// Bring shift/ctrl/alt in line with the flags reported on `key`.
    fn sync_modifiers(&mut self, key: KeyEvent, sink: &mut dyn InputSink) -> bool {
        let mut delivered = false;
        for (flag, left, right) in MODIFIER_FLAGS {
            let down = self.is_key_down(left) || self.is_key_down(right);
            let want = key.modifiers.contains(flag);
            if want && !down {
                self.set_key(left, true, sink);
                delivered = true;
            } else if !want && down {
                for code in [left, right] {
                    if self.is_key_down(code) {
                        self.set_key(code, false, sink);
                    }
                }
                delivered = true;
            }
        }
        delivered
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, sink: &mut dyn InputSink) -> bool {
        let (button, pressed) = match mouse.kind {
            MouseEventKind::Down(b) => (map::mouse_button(b), true),
            MouseEventKind::Up(b) => (map::mouse_button(b), false),
            MouseEventKind::ScrollUp => (MouseButton::WheelUp, true),
            MouseEventKind::ScrollDown => (MouseButton::WheelDown, true),
            _ => return false,
        };
        sink.mouse_event(i32::from(mouse.column), i32::from(mouse.row), button, pressed);
        true
    }

    fn set_key(&mut self, code: Scancode, pressed: bool, sink: &mut dyn InputSink) {
        if let Some(n) = code.index() {
            self.held[n] = pressed;
        }
        sink.key_event(code, pressed);
    }

    fn touch(&mut self, code: Scancode, now: Instant) {
        if let Some(entry) = self.timed.iter_mut().find(|(c, _)| *c == code) {
            entry.1 = now;
        } else if self.timed.try_push((code, now)).is_err() {
            warn!(scancode = code.0, "too many keys held, dropping release timer");
        }
    }

    /// Release keys whose timeout has passed. Returns true if any were released.
    pub fn expire_releases(&mut self, now: Instant, sink: &mut dyn InputSink) -> bool {
        let timeout = self.config.release_timeout;
        let mut released = false;
        let mut i = 0;
        while i < self.timed.len() {
            let (code, seen) = self.timed[i];
            if now.saturating_duration_since(seen) >= timeout {
                self.timed.swap_remove(i);
                self.set_key(code, false, sink);
                released = true;
            } else {
                i += 1;
            }
        }
        released
    }

    /// Time until the next timed release is due.
    fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.timed
            .iter()
            .map(|&(_, seen)| (seen + self.config.release_timeout).saturating_duration_since(now))
            .min()
    }
}

impl EventSource for TermEventSource {
    fn pump(&mut self, blocking: bool, sink: &mut dyn InputSink) -> Result<()> {
        let mut delivered = self.expire_releases(Instant::now(), sink);
        loop {
            if blocking && !delivered {
                match self.next_expiry(Instant::now()) {
                    Some(wait) => {
                        if !event::poll(wait)? {
                            delivered |= self.expire_releases(Instant::now(), sink);
                            continue;
                        }
                    }
                    None => {
                        let ev = event::read()?;
                        delivered |= self.handle_event(ev, Instant::now(), sink);
                        continue;
                    }
                }
            } else if !event::poll(Duration::ZERO)? {
                return Ok(());
            }
            let ev = event::read()?;
            delivered |= self.handle_event(ev, Instant::now(), sink);
        }
    }

    fn is_key_down(&self, code: Scancode) -> bool {
        code.index().is_some_and(|n| self.held[n])
    }

    fn map_position(&self, x: i32, y: i32) -> Option<u32> {
        let (x, y) = (x - self.config.origin.0, y - self.config.origin.1);
        if x < 0 || y < 0 {
            return None;
        }
        let col = (x / self.config.cell_size.0.max(1)) as u32;
        let row = (y / self.config.cell_size.1.max(1)) as u32;
        (col < GRID_WIDTH && row < GRID_HEIGHT).then_some(row * GRID_WIDTH + col)
    }
}

impl Drop for TermEventSource {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
