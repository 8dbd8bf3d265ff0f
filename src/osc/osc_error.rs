use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscError {
    /// The packet ended before a string terminator or argument.
    Truncated,
    /// The address pattern does not start with `/` (bundles included).
    InvalidAddress(String),
    /// No `,`-prefixed type tag string follows the address.
    MissingTypeTags,
    /// A type tag this parser does not understand.
    UnsupportedType(char),
    /// A string field is not valid UTF-8.
    InvalidString,
    /// Well-formed message sent to an address we do not listen on.
    UnexpectedAddress(String),
    /// The message carries no arguments.
    NoArguments,
    /// The first argument is not an `f` or `i` value.
    NonNumericArgument,
}

impl fmt::Display for OscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use OscError::{
            InvalidAddress, InvalidString, MissingTypeTags, NoArguments, NonNumericArgument,
            Truncated, UnexpectedAddress, UnsupportedType,
        };
        match self {
            Truncated => write!(f, "packet truncated"),
            InvalidAddress(a) => write!(f, "invalid address pattern '{a}'"),
            MissingTypeTags => write!(f, "missing type tag string"),
            UnsupportedType(t) => write!(f, "unsupported type tag '{t}'"),
            InvalidString => write!(f, "string is not valid UTF-8"),
            UnexpectedAddress(a) => write!(f, "unexpected address '{a}'"),
            NoArguments => write!(f, "message has no arguments"),
            NonNumericArgument => write!(f, "first argument is not numeric"),
        }
    }
}

impl std::error::Error for OscError {}
