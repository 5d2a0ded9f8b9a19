//! Terminal source settings.
//!
//! # Environment Variables
//!
//! - `TWORLD_RELEASE_EVENTS`: `0`/`false` never asks the terminal for key release events
//! - `TWORLD_RELEASE_TIMEOUT_MS`: release timeout when the terminal has no release
//!   events (default: 150)

use std::time::Duration;

// Long enough to bridge the initial auto-repeat delay of most terminals.
const DEFAULT_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermConfig {
    /// Ask for keyboard enhancement (real release events) when supported.
    pub release_events: bool,
    pub release_timeout: Duration,
    /// Terminal cell of the grid's top-left corner (column, row).
    pub origin: (i32, i32),
    /// Terminal cells per grid cell (columns, rows).
    pub cell_size: (i32, i32),
}

impl TermConfig {
    pub fn new() -> Self {
        Self {
            release_events: true,
            release_timeout: Duration::from_millis(DEFAULT_RELEASE_TIMEOUT_MS),
            origin: (0, 0),
            cell_size: (2, 1),
        }
    }

    pub fn from_env() -> Self {
        use std::env;

        let release_events = env::var("TWORLD_RELEASE_EVENTS")
            .map(|v| {
                let v = v.trim();
                !(v == "0" || v.eq_ignore_ascii_case("false"))
            })
            .unwrap_or(true);
        let release_timeout_ms = env::var("TWORLD_RELEASE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RELEASE_TIMEOUT_MS);

        Self {
            release_events,
            release_timeout: Duration::from_millis(release_timeout_ms),
            ..Self::new()
        }
    }

    pub fn with_release_events(mut self, release_events: bool) -> Self {
        self.release_events = release_events;
        self
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn with_origin(mut self, col: i32, row: i32) -> Self {
        self.origin = (col, row);
        self
    }

    pub fn with_cell_size(mut self, cols: i32, rows: i32) -> Self {
        self.cell_size = (cols, rows);
        self
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self::new()
    }
}
