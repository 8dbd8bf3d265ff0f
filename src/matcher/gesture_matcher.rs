use std::{sync::Arc, time::Duration};

use crate::read_model::GestureSource;

/// Result of one [`GestureMatcher::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// Matching is switched off; the source was not polled.
    Inactive,
    /// The current gesture is not the expected one and nothing was being held.
    Idle,
    /// The expected gesture is being held. `progress` runs from 0 to 1.
    Filling { progress: f32 },
    /// The gesture was held for the full duration. The timer has been reset.
    Completed,
    /// The gesture changed before the hold finished. The timer has been reset.
    Failed,
}

/// Hold-to-brew matching against a [`GestureSource`].
///
/// Called once per frame with the frame's delta time. The expected gesture
/// must be reported continuously for `required_hold`; any other label while
/// holding fails the attempt.
pub struct GestureMatcher {
    source: Arc<dyn GestureSource>,
    active: bool,
    catching: bool,
    held: Duration,
}

impl GestureMatcher {
    /// Creates an inactive matcher reading from `source`.
    pub fn new(source: Arc<dyn GestureSource>) -> Self {
        Self {
            source,
            active: false,
            catching: false,
            held: Duration::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enables or disables matching. Disabling drops any hold in progress.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.reset();
        }
    }

    /// Time the expected gesture has been held in the current attempt.
    pub fn held(&self) -> Duration {
        self.held
    }

    pub fn reset(&mut self) {
        self.catching = false;
        self.held = Duration::ZERO;
    }

    pub fn tick(&mut self, expected: &str, required_hold: Duration, dt: Duration) -> MatchEvent {
        if !self.active {
            return MatchEvent::Inactive;
        }

        let current = self.source.gesture();
        if !labels_match(&current, expected) {
            if self.catching {
                self.reset();
                return MatchEvent::Failed;
            }
            return MatchEvent::Idle;
        }

        self.catching = true;
        self.held += dt;
        if self.held >= required_hold {
            self.reset();
            return MatchEvent::Completed;
        }

        MatchEvent::Filling {
            progress: self.held.as_secs_f32() / required_hold.as_secs_f32(),
        }
    }
}

fn labels_match(current: &str, expected: &str) -> bool {
    !current.is_empty() && current.to_lowercase() == expected.to_lowercase()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::{gesture::GestureSample, read_model::SharedReadModel};

    const FRAME: Duration = Duration::from_millis(250);
    const HOLD: Duration = Duration::from_secs(1);

    fn setup() -> (GestureMatcher, Arc<SharedReadModel>) {
        let model = Arc::new(SharedReadModel::new());
        let mut matcher = GestureMatcher::new(model.clone());
        matcher.set_active(true);
        (matcher, model)
    }

    #[test]
    fn inactive_matcher_ignores_the_source() {
        let model = Arc::new(SharedReadModel::new());
        model.publish_sample(GestureSample::new("Wave", 99.0));
        let mut matcher = GestureMatcher::new(model);
        assert!(!matcher.is_active());
        assert_eq!(matcher.tick("Wave", HOLD, FRAME), MatchEvent::Inactive);
        assert_eq!(matcher.held(), Duration::ZERO);
    }

    #[test]
    fn holding_the_expected_gesture_completes() {
        let (mut matcher, model) = setup();
        model.publish_sample(GestureSample::new("circularmotion", 95.0));

        let mut progress = Vec::new();
        loop {
            match matcher.tick("CircularMotion", HOLD, FRAME) {
                MatchEvent::Filling { progress: p } => progress.push(p),
                MatchEvent::Completed => break,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(progress, vec![0.25, 0.5, 0.75]);
        assert_eq!(matcher.held(), Duration::ZERO);
    }

    #[test]
    fn switching_gesture_mid_hold_fails_once() {
        let (mut matcher, model) = setup();
        model.publish_sample(GestureSample::new("Wave", 90.0));
        assert!(matches!(
            matcher.tick("Wave", HOLD, FRAME),
            MatchEvent::Filling { .. }
        ));

        model.publish_sample(GestureSample::new("Stir", 90.0));
        assert_eq!(matcher.tick("Wave", HOLD, FRAME), MatchEvent::Failed);
        assert_eq!(matcher.tick("Wave", HOLD, FRAME), MatchEvent::Idle);
        assert_eq!(matcher.held(), Duration::ZERO);
    }

    #[test]
    fn empty_label_never_matches() {
        let (mut matcher, _) = setup();
        assert_eq!(matcher.tick("", HOLD, FRAME), MatchEvent::Idle);
    }

    #[test]
    fn deactivating_drops_the_hold() {
        let (mut matcher, model) = setup();
        model.publish_sample(GestureSample::new("Wave", 90.0));
        matcher.tick("Wave", HOLD, FRAME);
        matcher.set_active(false);
        matcher.set_active(true);
        assert_eq!(matcher.held(), Duration::ZERO);
    }
}
