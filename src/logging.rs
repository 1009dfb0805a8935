//! Logging bootstrap for the CLI.
//!
//! # Invariants
//! - Logs go to stderr so stdout stays clean for command output.
//! - Initialization happens once per process; repeating it with the same
//!   level is a no-op and a different level is rejected.
//! - Initialization never panics.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use std::sync::OnceLock;

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

/// Start stderr logging at `level` (trace|debug|info|warn|error).
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logging is already active at another level.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_same_level(state, level);
    }

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        level,
        _logger: logger,
    });
    debug!("event=logging_init module=logging status=ok level={level}");
    check_same_level(state, level)
}

/// Active log level, or `None` before `init_logging` succeeded.
pub fn logging_level() -> Option<&'static str> {
    LOGGING_STATE.get().map(|state| state.level)
}

fn check_same_level(state: &LoggingState, level: &'static str) -> Result<(), String> {
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" | "none" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}
