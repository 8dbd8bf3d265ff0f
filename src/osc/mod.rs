//! Just enough OSC 1.0 to read Wekinator classifier outputs.

pub mod osc_error;
pub mod osc_message;
pub mod wekinator;

pub use osc_error::OscError;
pub use osc_message::{OscArg, OscMessage};
pub use wekinator::WandGesture;
