use std::fmt;

/// Severity of a log message, from most verbose to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Per-datagram detail, normally compiled out.
    Trace,
    /// Internal state useful while debugging the listener.
    Debug,
    /// Lifecycle events and connection state transitions.
    Info,
    /// Recoverable problems such as malformed datagrams.
    Warn,
    /// Failures that still let the subsystem keep running.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}
