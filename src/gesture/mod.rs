//! Gesture samples and the datagram decoders that produce them.

pub mod decode_error;
pub mod decoder;
pub mod gesture_sample;
pub mod wire_format;

pub use decode_error::DecodeError;
pub use decoder::{DecodeOutcome, decode_datagram};
pub use gesture_sample::GestureSample;
pub use wire_format::WireFormat;
