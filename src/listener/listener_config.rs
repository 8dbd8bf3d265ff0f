use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use crate::{
    config::{Config, ConfigError},
    gesture::WireFormat,
    listener::{constants::*, listener_error::ListenerError},
};

const SECTION: &str = "Listener";

/// Settings fixed for the lifetime of one listener.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerConfig {
    /// Local interface to bind. Defaults to all interfaces.
    pub bind_addr: IpAddr,
    /// UDP port; 0 asks the OS for an ephemeral port.
    pub port: u16,
    /// Field separator of the delimited format. Must be ASCII.
    pub separator: char,
    /// Grace period before a silent feed is reported `Disconnected`.
    pub warmup: Duration,
    /// Silence after which a connected feed is reported `Disconnected`.
    pub liveness_timeout: Duration,
    /// Spacing of liveness checks.
    pub poll_interval: Duration,
    /// Log every decoded sample at Info instead of Trace.
    pub debug_logs: bool,
    pub wire_format: WireFormat,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            separator: DEFAULT_SEPARATOR,
            warmup: Duration::from_secs_f32(DEFAULT_WARMUP_SECS),
            liveness_timeout: Duration::from_secs_f32(DEFAULT_LIVENESS_TIMEOUT_SECS),
            poll_interval: Duration::from_secs_f32(DEFAULT_POLL_INTERVAL_SECS),
            debug_logs: false,
            wire_format: WireFormat::default(),
        }
    }
}

impl ListenerConfig {
    /// Reads the `[Listener]` section, falling back to globals and defaults.
    ///
    /// Recognized keys: `bind_address`, `port`, `separator`, `warmup_secs`,
    /// `liveness_timeout_secs`, `poll_interval_secs`, `debug_logs`,
    /// `wire_format`.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for any key that is present but malformed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let separator = match config.lookup(SECTION, "separator") {
            None => defaults.separator,
            Some(raw) => single_char(raw).ok_or_else(|| invalid("separator", raw))?,
        };

        Ok(Self {
            bind_addr: config.parse_or(SECTION, "bind_address", defaults.bind_addr)?,
            port: config.parse_or(SECTION, "port", defaults.port)?,
            separator,
            warmup: secs(config, "warmup_secs", defaults.warmup)?,
            liveness_timeout: secs(config, "liveness_timeout_secs", defaults.liveness_timeout)?,
            poll_interval: secs(config, "poll_interval_secs", defaults.poll_interval)?,
            debug_logs: config.parse_or(SECTION, "debug_logs", defaults.debug_logs)?,
            wire_format: config.parse_or(SECTION, "wire_format", defaults.wire_format)?,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_liveness_timeout(mut self, timeout: Duration) -> Self {
        self.liveness_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_debug_logs(mut self, enabled: bool) -> Self {
        self.debug_logs = enabled;
        self
    }

    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Checks invariants the listener relies on.
    ///
    /// # Errors
    /// [`ListenerError::InvalidConfig`] for a zero duration or a separator
    /// that is non-ASCII or could appear inside a confidence value.
    pub fn validate(&self) -> Result<(), ListenerError> {
        let sep = self.separator;
        if !sep.is_ascii() || sep.is_ascii_digit() || matches!(sep, '.' | ',' | '-' | '+') {
            return Err(ListenerError::InvalidConfig(format!(
                "separator {sep:?} cannot delimit a confidence value"
            )));
        }
        for (name, value) in [
            ("warmup", self.warmup),
            ("liveness_timeout", self.liveness_timeout),
            ("poll_interval", self.poll_interval),
        ] {
            if value.is_zero() {
                return Err(ListenerError::InvalidConfig(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn secs(config: &Config, key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match config.lookup(SECTION, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<f32>()
            .ok()
            .and_then(|s| Duration::try_from_secs_f32(s).ok())
            .ok_or_else(|| invalid(key, raw)),
    }
}

fn invalid(key: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    }
}
