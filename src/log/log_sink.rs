use crate::log::log_level::LogLevel;

/// Destination for log lines. Every long-lived component receives one as an
/// `Arc<dyn LogSink>` when it is built.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
