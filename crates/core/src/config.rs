//! Initial input mode.
//!
//! # Environment Variables
//!
//! - `TWORLD_JOYSTICK`: `1`/`true` starts in joystick-style repeat (default: keyboard style)
//! - `TWORLD_TEXT_ENTRY`: `1`/`true` starts with the text-entry command table

/// Mode the resolver starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputConfig {
    pub joystick_style: bool,
    pub text_entry: bool,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self {
            joystick_style: env_flag("TWORLD_JOYSTICK"),
            text_entry: env_flag("TWORLD_TEXT_ENTRY"),
        }
    }

    pub fn with_joystick_style(mut self, joystick_style: bool) -> Self {
        self.joystick_style = joystick_style;
        self
    }

    pub fn with_text_entry(mut self, text_entry: bool) -> Self {
        self.text_entry = text_entry;
        self
    }
}

/// `1` or `true` (any case) enables a flag; anything else, or unset, disables it.
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_keyboard_style_game_mode() {
        let cfg = InputConfig::new();
        assert!(!cfg.joystick_style);
        assert!(!cfg.text_entry);
    }

    #[test]
    fn builders_override() {
        let cfg = InputConfig::new()
            .with_joystick_style(true)
            .with_text_entry(true);
        assert!(cfg.joystick_style && cfg.text_entry);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" true "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn unset_variable_is_false() {
        assert!(!env_flag("TWORLD_TEST_SURELY_UNSET_VARIABLE"));
    }
}
