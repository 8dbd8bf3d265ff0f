use std::time::SystemTime;

use crate::log::log_level::LogLevel;

/// A single log event travelling from a producer thread to the logger worker.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// Severity of the event.
    pub level: LogLevel,
    /// Wall-clock time of the event in milliseconds since the UNIX epoch.
    pub ts_ms: u128,
    /// Rendered message text.
    pub text: String,
    /// Module path of the producer (`module_path!()`).
    pub target: &'static str,
}

impl LogMsg {
    /// Creates a message stamped with the current time.
    pub fn new(level: LogLevel, text: impl Into<String>, target: &'static str) -> Self {
        Self {
            level,
            ts_ms: now_millis(),
            text: text.into(),
            target,
        }
    }
}

/// Milliseconds since the UNIX epoch, or zero if the clock is before it.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
