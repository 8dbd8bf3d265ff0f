use std::fmt;

use crate::osc::{OscError, OscMessage};

/// Address Wekinator publishes classifier outputs on.
pub const WEKINATOR_ADDRESS: &str = "/wek/outputs";

/// Wekinator classifiers report a class, not a score, so every recognized
/// class is published at full confidence.
pub const WEKINATOR_CONFIDENCE: f32 = 100.0;

/// Gesture classes the wand model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WandGesture {
    LeftRightWave,
    UpDownWave,
    CircularMotion,
    Unknown,
}

impl WandGesture {
    /// Maps a raw classifier output to a gesture, rounding to the nearest class.
    pub fn from_output(output: f32) -> Self {
        match output.round() as i32 {
            1 => WandGesture::LeftRightWave,
            2 => WandGesture::UpDownWave,
            3 => WandGesture::CircularMotion,
            _ => WandGesture::Unknown,
        }
    }

    /// Label published for this gesture.
    pub fn name(self) -> &'static str {
        match self {
            WandGesture::LeftRightWave => "LeftRightWave",
            WandGesture::UpDownWave => "UpDownWave",
            WandGesture::CircularMotion => "CircularMotion",
            WandGesture::Unknown => "Unknown",
        }
    }

    /// Classifier output for this gesture; `None` for `Unknown`.
    pub fn class_id(self) -> Option<i32> {
        match self {
            WandGesture::LeftRightWave => Some(1),
            WandGesture::UpDownWave => Some(2),
            WandGesture::CircularMotion => Some(3),
            WandGesture::Unknown => None,
        }
    }
}

impl fmt::Display for WandGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extracts the gesture from a `/wek/outputs` message. Only the first
/// argument is used.
///
/// # Errors
/// Wrong address, no arguments, or a non-numeric first argument.
pub fn gesture_from_message(msg: &OscMessage) -> Result<WandGesture, OscError> {
    if msg.address != WEKINATOR_ADDRESS {
        return Err(OscError::UnexpectedAddress(msg.address.clone()));
    }
    let first = msg.args.first().ok_or(OscError::NoArguments)?;
    let output = first.as_f32().ok_or(OscError::NonNumericArgument)?;
    Ok(WandGesture::from_output(output))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::osc::OscArg;

    #[test]
    fn outputs_round_to_nearest_class() {
        assert_eq!(WandGesture::from_output(1.0), WandGesture::LeftRightWave);
        assert_eq!(WandGesture::from_output(1.8), WandGesture::UpDownWave);
        assert_eq!(WandGesture::from_output(3.2), WandGesture::CircularMotion);
        assert_eq!(WandGesture::from_output(0.0), WandGesture::Unknown);
        assert_eq!(WandGesture::from_output(7.0), WandGesture::Unknown);
        assert_eq!(WandGesture::from_output(f32::NAN), WandGesture::Unknown);
    }

    #[test]
    fn class_ids_map_back() {
        for g in [
            WandGesture::LeftRightWave,
            WandGesture::UpDownWave,
            WandGesture::CircularMotion,
        ] {
            let id = g.class_id().unwrap();
            assert_eq!(WandGesture::from_output(id as f32), g);
        }
        assert_eq!(WandGesture::Unknown.class_id(), None);
    }

    #[test]
    fn int_arguments_are_accepted() {
        let msg = OscMessage::new(WEKINATOR_ADDRESS, vec![OscArg::Int(2), OscArg::Float(9.0)]);
        assert_eq!(gesture_from_message(&msg).unwrap(), WandGesture::UpDownWave);
    }

    #[test]
    fn rejects_foreign_or_empty_messages() {
        let other = OscMessage::new("/wek/inputs", vec![OscArg::Float(1.0)]);
        assert_eq!(
            gesture_from_message(&other),
            Err(OscError::UnexpectedAddress("/wek/inputs".into()))
        );

        let empty = OscMessage::new(WEKINATOR_ADDRESS, vec![]);
        assert_eq!(gesture_from_message(&empty), Err(OscError::NoArguments));

        let text = OscMessage::new(WEKINATOR_ADDRESS, vec![OscArg::Str("1".into())]);
        assert_eq!(gesture_from_message(&text), Err(OscError::NonNumericArgument));
    }
}
