//! Gesture samples and capture/release classification.

use crate::callback::CallbackWith;

/// Extra horizontal travel (in the carousel's pixel unit) a candidate drag
/// must show before the default capture predicate claims it. Filters out the
/// jitter of a plain tap so taps are not hijacked from item content.
pub const CAPTURE_SLOP: f32 = 1.0;

/// Displacement and velocity of an in-progress drag, relative to the point
/// where the gesture started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    /// Horizontal displacement since gesture start.
    pub dx: f32,
    /// Vertical displacement since gesture start.
    pub dy: f32,
    /// Horizontal velocity.
    pub vx: f32,
    /// Vertical velocity.
    pub vy: f32,
}

/// Pure predicate pair deciding whether a candidate move belongs to the
/// carousel and whether an in-progress capture should be ceded to an
/// ancestor.
///
/// Both predicates are side-effect free and run synchronously before any
/// state mutation. Defaults: capture once `|dx|` exceeds [`CAPTURE_SLOP`],
/// never voluntarily release.
#[derive(Clone, PartialEq)]
pub struct GestureClassifier {
    capture: CallbackWith<GestureSample, bool>,
    release: CallbackWith<GestureSample, bool>,
}

impl GestureClassifier {
    /// Build a classifier from the two predicate slots.
    pub fn new(
        capture: CallbackWith<GestureSample, bool>,
        release: CallbackWith<GestureSample, bool>,
    ) -> Self {
        Self { capture, release }
    }

    /// Should the carousel claim this candidate move?
    pub fn should_capture(&self, sample: GestureSample) -> bool {
        self.capture.call(sample)
    }

    /// Should an in-progress capture be ceded to an ancestor?
    pub fn should_release(&self, sample: GestureSample) -> bool {
        self.release.call(sample)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self {
            capture: CallbackWith::new(default_should_capture),
            release: CallbackWith::new(default_should_release),
        }
    }
}

/// Default capture policy: claim the gesture once horizontal travel exceeds
/// the tap-jitter slop.
pub fn default_should_capture(sample: GestureSample) -> bool {
    sample.dx.abs() > CAPTURE_SLOP
}

/// Default release policy: never cede an in-progress capture.
pub fn default_should_release(_sample: GestureSample) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capture_ignores_tap_jitter() {
        let classifier = GestureClassifier::default();
        for dx in [0.0, 0.5, -0.9, 1.0, -1.0] {
            let sample = GestureSample {
                dx,
                ..GestureSample::default()
            };
            assert!(!classifier.should_capture(sample), "dx = {dx}");
        }
    }

    #[test]
    fn default_capture_claims_real_drags_in_both_directions() {
        let classifier = GestureClassifier::default();
        for dx in [1.1, -1.1, 40.0, -250.0] {
            let sample = GestureSample {
                dx,
                ..GestureSample::default()
            };
            assert!(classifier.should_capture(sample), "dx = {dx}");
        }
    }

    #[test]
    fn default_release_never_cedes() {
        let classifier = GestureClassifier::default();
        let sample = GestureSample {
            dx: 500.0,
            dy: 500.0,
            vx: 9.0,
            vy: 9.0,
        };
        assert!(!classifier.should_release(sample));
    }

    #[test]
    fn overrides_replace_the_default_policies() {
        let classifier = GestureClassifier::new(
            CallbackWith::new(|s: GestureSample| s.dy.abs() > 10.0),
            CallbackWith::new(|s: GestureSample| s.vx.abs() > 2.0),
        );
        let sample = GestureSample {
            dx: 50.0,
            dy: 2.0,
            vx: 3.0,
            vy: 0.0,
        };
        assert!(!classifier.should_capture(sample));
        assert!(classifier.should_release(sample));
    }
}
