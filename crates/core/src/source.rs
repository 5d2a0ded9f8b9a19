//! The seam between the resolver and whatever delivers hardware events.

use anyhow::Result;

use crate::types::{MouseButton, Scancode};

/// Receives raw events while an [`EventSource`] is being pumped.
pub trait InputSink {
    fn key_event(&mut self, code: Scancode, pressed: bool);
    fn mouse_event(&mut self, x: i32, y: i32, button: MouseButton, pressed: bool);
}

/// A raw hardware event, as recorded by scripted sources and test harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Key {
        code: Scancode,
        pressed: bool,
    },
    Mouse {
        x: i32,
        y: i32,
        button: MouseButton,
        pressed: bool,
    },
}

impl RawEvent {
    pub fn press(code: Scancode) -> Self {
        RawEvent::Key {
            code,
            pressed: true,
        }
    }

    pub fn release(code: Scancode) -> Self {
        RawEvent::Key {
            code,
            pressed: false,
        }
    }

    pub fn click(x: i32, y: i32, button: MouseButton) -> Self {
        RawEvent::Mouse {
            x,
            y,
            button,
            pressed: true,
        }
    }

    /// Deliver this event to `sink`.
    pub fn dispatch(self, sink: &mut dyn InputSink) {
        match self {
            RawEvent::Key { code, pressed } => sink.key_event(code, pressed),
            RawEvent::Mouse {
                x,
                y,
                button,
                pressed,
            } => sink.mouse_event(x, y, button, pressed),
        }
    }
}

/// Delivers hardware events and answers questions about the window.
///
/// `pump` is the only place the resolver ever suspends.
pub trait EventSource {
    /// Deliver pending events to `sink`.
    ///
    /// When `blocking` is set and nothing is queued, wait until at least one
    /// event arrives; otherwise return immediately after draining the queue.
    fn pump(&mut self, blocking: bool, sink: &mut dyn InputSink) -> Result<()>;

    /// Whether `code` is physically held right now.
    fn is_key_down(&self, code: Scancode) -> bool;

    /// Map a pointer position to a grid cell index, if it lands on the grid.
    fn map_position(&self, x: i32, y: i32) -> Option<u32>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn pump(&mut self, blocking: bool, sink: &mut dyn InputSink) -> Result<()> {
        (**self).pump(blocking, sink)
    }

    fn is_key_down(&self, code: Scancode) -> bool {
        (**self).is_key_down(code)
    }

    fn map_position(&self, x: i32, y: i32) -> Option<u32> {
        (**self).map_position(x, y)
    }
}
