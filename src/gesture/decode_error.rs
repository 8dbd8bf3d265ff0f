use std::fmt;

use crate::osc::OscError;

/// Why a single datagram could not be turned into a sample.
///
/// Never fatal: the listener logs it and keeps the previous sample.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Fewer than two fields after splitting on the separator.
    MissingSeparator,
    /// Field 1 is not a number (after `,` to `.` normalization).
    InvalidConfidence(String),
    /// The OSC payload was malformed or not a Wekinator output.
    Osc(OscError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingSeparator => write!(f, "expected at least two fields"),
            DecodeError::InvalidConfidence(raw) => write!(f, "invalid confidence value '{raw}'"),
            DecodeError::Osc(e) => write!(f, "OSC decode failed: {e}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<OscError> for DecodeError {
    fn from(err: OscError) -> Self {
        DecodeError::Osc(err)
    }
}
