use std::fmt;

/// Reported health of the gesture feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Startup grace period, no datagram seen yet.
    #[default]
    Waiting,
    /// A datagram arrived recently.
    Connected,
    /// Warm-up passed without traffic, or traffic stopped.
    Disconnected,
}

impl ConnectionState {
    /// Status text shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Waiting => "Waiting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Not Connected",
        }
    }

    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Waiting => "Waiting",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        };
        f.write_str(s)
    }
}
