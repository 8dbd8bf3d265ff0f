use std::fmt;

use crate::listener::ListenerError;

#[derive(Debug)]
pub enum MonitorError {
    Receiver(ListenerError),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Receiver(e) => write!(f, "receiver: {e}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Receiver(e) => Some(e),
        }
    }
}

impl From<ListenerError> for MonitorError {
    fn from(e: ListenerError) -> Self {
        MonitorError::Receiver(e)
    }
}
