use crate::{
    gesture::{DecodeError, GestureSample, WireFormat},
    osc::{OscMessage, wekinator},
};

/// Result of decoding one datagram that produced something publishable.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Label and confidence were both taken from the datagram.
    Complete(GestureSample),
    /// The label was accepted but the confidence field did not parse, so the
    /// sample carries the previous confidence. `error` describes the bad field.
    LabelOnly {
        sample: GestureSample,
        error: DecodeError,
    },
}

impl DecodeOutcome {
    pub fn sample(&self) -> &GestureSample {
        match self {
            DecodeOutcome::Complete(sample) | DecodeOutcome::LabelOnly { sample, .. } => sample,
        }
    }

    pub fn into_sample(self) -> GestureSample {
        match self {
            DecodeOutcome::Complete(sample) | DecodeOutcome::LabelOnly { sample, .. } => sample,
        }
    }
}

/// Decodes one datagram in the given wire format.
///
/// `previous` is the currently published sample; it supplies the confidence
/// when a delimited datagram carries a label but an unreadable confidence.
///
/// # Errors
/// Any [`DecodeError`] means nothing from this datagram may be published.
pub fn decode_datagram(
    format: WireFormat,
    payload: &[u8],
    separator: char,
    previous: &GestureSample,
) -> Result<DecodeOutcome, DecodeError> {
    match format {
        WireFormat::Delimited => decode_delimited(payload, separator, previous),
        WireFormat::WekinatorOsc => decode_wekinator(payload).map(DecodeOutcome::Complete),
    }
}

/// Decodes `label<sep>confidence[<sep>ignored...]`.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. The label is
/// used verbatim, including an empty one. Fields after the second are ignored.
///
/// # Errors
/// [`DecodeError::MissingSeparator`] for fewer than two fields.
pub fn decode_delimited(
    payload: &[u8],
    separator: char,
    previous: &GestureSample,
) -> Result<DecodeOutcome, DecodeError> {
    let text = String::from_utf8_lossy(payload);
    let mut fields = text.split(separator);

    let (Some(label), Some(raw_confidence)) = (fields.next(), fields.next()) else {
        return Err(DecodeError::MissingSeparator);
    };

    Ok(match parse_confidence(raw_confidence) {
        Ok(confidence) => DecodeOutcome::Complete(GestureSample::new(label, confidence)),
        Err(error) => DecodeOutcome::LabelOnly {
            sample: previous.relabeled(label),
            error,
        },
    })
}

/// Parses a confidence using `.` or `,` as the decimal point, independent of
/// locale. Surrounding whitespace is allowed. The result is not clamped.
///
/// # Errors
/// [`DecodeError::InvalidConfidence`] for non-numeric input and NaN.
pub fn parse_confidence(raw: &str) -> Result<f32, DecodeError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f32>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(DecodeError::InvalidConfidence(raw.to_string())),
    }
}

/// Decodes a Wekinator `/wek/outputs` OSC message into a full-confidence sample.
///
/// # Errors
/// [`DecodeError::Osc`] when the packet is not a usable Wekinator output.
pub fn decode_wekinator(payload: &[u8]) -> Result<GestureSample, DecodeError> {
    let message = OscMessage::parse(payload)?;
    let gesture = wekinator::gesture_from_message(&message)?;
    Ok(GestureSample::new(gesture.name(), wekinator::WEKINATOR_CONFIDENCE))
}
