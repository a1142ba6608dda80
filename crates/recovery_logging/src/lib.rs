#![deny(missing_docs)]
//! Shared logging utilities for the recovery workspace.
//!
//! Library crates log through the `recovery_*` macros below so that every
//! record carries the same target and can be filtered as one unit.

/// Log target shared by every record emitted through these macros.
pub const TARGET: &str = "mnemonic_repair";

/// Environment variable that overrides the level used by [`initialize_for_tests`].
pub const TEST_LEVEL_ENV: &str = "RECOVERY_TEST_LOG";

/// Logs a trace-level message under the workspace target.
#[macro_export]
macro_rules! recovery_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the workspace target.
#[macro_export]
macro_rules! recovery_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the workspace target.
#[macro_export]
macro_rules! recovery_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the workspace target.
#[macro_export]
macro_rules! recovery_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the workspace target.
#[macro_export]
macro_rules! recovery_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Parses a level name such as `"debug"` or `"off"`, case-insensitively.
pub fn parse_level(name: &str) -> Option<log::LevelFilter> {
    name.trim().parse().ok()
}

/// Initializes a terminal logger for use in tests.
///
/// The level defaults to debug in debug builds and can be overridden with
/// [`TEST_LEVEL_ENV`]. Safely no-ops if a logger is already installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let level = std::env::var(TEST_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(fallback);

    // Another test in the same binary may have won the race.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
