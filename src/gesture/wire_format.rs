use std::{fmt, str::FromStr};

/// How the payload of each datagram is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// `label<sep>confidence[<sep>...]` as UTF-8 text.
    #[default]
    Delimited,
    /// An OSC message as sent by Wekinator on `/wek/outputs`.
    WekinatorOsc,
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delimited" | "text" => Ok(WireFormat::Delimited),
            "osc" | "wekinator" => Ok(WireFormat::WekinatorOsc),
            other => Err(format!("unknown wire format '{other}'")),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Delimited => f.write_str("delimited"),
            WireFormat::WekinatorOsc => f.write_str("osc"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Delimited".parse::<WireFormat>().unwrap(), WireFormat::Delimited);
        assert_eq!(" OSC ".parse::<WireFormat>().unwrap(), WireFormat::WekinatorOsc);
        assert_eq!("wekinator".parse::<WireFormat>().unwrap(), WireFormat::WekinatorOsc);
        assert!("json".parse::<WireFormat>().is_err());
    }
}
