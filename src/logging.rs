//! Log setup for the demo binary.
//!
//! The terminal is in raw mode while the demo runs, so logs go to a daily
//! rotated file instead of the console:
//!
//! - `RUST_LOG`: filter (default: `warn`), e.g. `RUST_LOG=tworld_input_core=trace`
//! - `TWORLD_LOG_DIR`: directory for `tworld-input.log` (default: current dir)

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init() -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let dir = std::env::var("TWORLD_LOG_DIR").unwrap_or_else(|_| ".".to_string());
    let appender = tracing_appender::rolling::daily(dir, "tworld-input.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    guard
}
