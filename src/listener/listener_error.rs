use std::{fmt, io, net::SocketAddr};

/// Failures that stop the listener from starting. Per-datagram problems are
/// never reported through this type.
#[derive(Debug)]
pub enum ListenerError {
    /// The configuration was rejected before any socket was opened.
    InvalidConfig(String),
    /// The UDP port could not be bound (in use, privileged, bad address).
    Bind { addr: SocketAddr, source: io::Error },
    /// The socket was bound but could not be configured.
    Socket(io::Error),
    /// The OS refused to create a worker thread.
    Spawn(io::Error),
}

impl ListenerError {
    pub fn is_bind_error(&self) -> bool {
        matches!(self, ListenerError::Bind { .. })
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerError::InvalidConfig(msg) => write!(f, "invalid listener config: {msg}"),
            ListenerError::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            ListenerError::Socket(e) => write!(f, "failed to configure socket: {e}"),
            ListenerError::Spawn(e) => write!(f, "failed to spawn worker thread: {e}"),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::InvalidConfig(_) => None,
            ListenerError::Bind { source, .. } => Some(source),
            ListenerError::Socket(e) | ListenerError::Spawn(e) => Some(e),
        }
    }
}
