//! Key mapping from terminal events to scan codes.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventState, KeyModifiers, ModifierKeyCode,
    MouseButton as TermButton,
};

use crate::types::{MouseButton, Scancode};

/// Map a terminal key to the scan code of the physical key that produced it.
///
/// Letters map to the same key regardless of case, and keypad digits are only
/// recognized when the terminal flags them as keypad keys.
pub fn scancode_for(code: KeyCode, state: KeyEventState) -> Option<Scancode> {
    let keypad = state.contains(KeyEventState::KEYPAD);
    let code = match code {
        KeyCode::Char(c) if keypad => keypad_scancode(c)?,
        KeyCode::Char(c) => char_scancode(c)?,
        KeyCode::Up => Scancode::UP,
        KeyCode::Down => Scancode::DOWN,
        KeyCode::Left => Scancode::LEFT,
        KeyCode::Right => Scancode::RIGHT,
        KeyCode::Enter if keypad => Scancode::KP_ENTER,
        KeyCode::Enter => Scancode::RETURN,
        KeyCode::Esc => Scancode::ESCAPE,
        KeyCode::Backspace => Scancode::BACKSPACE,
        KeyCode::Tab | KeyCode::BackTab => Scancode::TAB,
        KeyCode::Home => Scancode::HOME,
        KeyCode::End => Scancode::END,
        KeyCode::PageUp => Scancode::PAGEUP,
        KeyCode::PageDown => Scancode::PAGEDOWN,
        KeyCode::Insert => Scancode::INSERT,
        KeyCode::Delete => Scancode::DELETE,
        KeyCode::CapsLock => Scancode::CAPSLOCK,
        KeyCode::NumLock => Scancode::NUMLOCKCLEAR,
        KeyCode::F(n @ 1..=12) => Scancode(Scancode::F1.0 + u16::from(n) - 1),
        KeyCode::Modifier(m) => modifier_scancode(m)?,
        _ => return None,
    };
    Some(code)
}

fn char_scancode(c: char) -> Option<Scancode> {
    let c = c.to_ascii_lowercase();
    match c {
        'a'..='z' => Scancode::from_letter(c),
        '1'..='9' => Some(Scancode(Scancode::NUM_1.0 + (c as u16 - '1' as u16))),
        '0' => Some(Scancode::NUM_0),
        ' ' => Some(Scancode::SPACE),
        _ => None,
    }
}

fn keypad_scancode(c: char) -> Option<Scancode> {
    match c {
        '1'..='9' => Some(Scancode(Scancode::KP_1.0 + (c as u16 - '1' as u16))),
        '0' => Some(Scancode::KP_0),
        _ => char_scancode(c),
    }
}

pub fn modifier_scancode(m: ModifierKeyCode) -> Option<Scancode> {
    let code = match m {
        ModifierKeyCode::LeftShift => Scancode::LSHIFT,
        ModifierKeyCode::RightShift => Scancode::RSHIFT,
        ModifierKeyCode::LeftControl => Scancode::LCTRL,
        ModifierKeyCode::RightControl => Scancode::RCTRL,
        ModifierKeyCode::LeftAlt => Scancode::LALT,
        ModifierKeyCode::RightAlt => Scancode::RALT,
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => Scancode::LGUI,
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => Scancode::RGUI,
        ModifierKeyCode::IsoLevel3Shift => Scancode::MODE,
        _ => return None,
    };
    Some(code)
}

/// Modifier flags a terminal reports alongside a key, with the left and right
/// scan codes of each.
pub const MODIFIER_FLAGS: [(KeyModifiers, Scancode, Scancode); 3] = [
    (KeyModifiers::SHIFT, Scancode::LSHIFT, Scancode::RSHIFT),
    (KeyModifiers::CONTROL, Scancode::LCTRL, Scancode::RCTRL),
    (KeyModifiers::ALT, Scancode::LALT, Scancode::RALT),
];

pub fn mouse_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

/// Check if key should end the program (Ctrl-C).
pub fn is_interrupt(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
