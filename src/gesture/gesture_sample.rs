/// Lowest confidence a published sample can carry.
pub const MIN_CONFIDENCE: f32 = 0.0;
/// Highest confidence a published sample can carry.
pub const MAX_CONFIDENCE: f32 = 100.0;

/// One classifier output: which gesture and how sure the classifier is.
///
/// Fields are private so a sample can only be built through [`new`](Self::new),
/// which clamps the confidence into `[0, 100]`. Samples are replaced whole,
/// never edited in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureSample {
    label: String,
    confidence: f32,
}

impl GestureSample {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// New sample with `label` and this sample's confidence.
    #[must_use]
    pub fn relabeled(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: self.confidence,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Clamps into `[MIN_CONFIDENCE, MAX_CONFIDENCE]`. NaN maps to the minimum.
pub fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_empty_label_and_zero_confidence() {
        let s = GestureSample::default();
        assert_eq!(s.label(), "");
        assert_eq!(s.confidence(), 0.0);
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        assert_eq!(GestureSample::new("Wave", 120.0).confidence(), 100.0);
        assert_eq!(GestureSample::new("Wave", -3.5).confidence(), 0.0);
        assert_eq!(GestureSample::new("Wave", f32::INFINITY).confidence(), 100.0);
        assert_eq!(clamp_confidence(f32::NAN), 0.0);
    }

    #[test]
    fn relabeled_keeps_confidence() {
        let s = GestureSample::new("Circle", 42.5).relabeled("Wave");
        assert_eq!(s.label(), "Wave");
        assert_eq!(s.confidence(), 42.5);
    }
}
