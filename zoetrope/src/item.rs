//! Item-side helpers: the per-item exposure, keyframe interpolation, and the
//! focus tween.

use std::time::{Duration, Instant};

const DEFAULT_FOCUS_DURATION: Duration = Duration::from_millis(150);

/// Everything an item renderer receives for one item.
///
/// `progress` is the live fractional index; renderers typically derive their
/// transforms from `item_index as f32 - progress` so the focused item sits at
/// zero and neighbors fall off symmetrically.
#[derive(Clone, Copy, Debug)]
pub struct RenderInfo<'a, T> {
    /// The item itself.
    pub item: &'a T,
    /// Position of this item in the dataset.
    pub item_index: usize,
    /// The engine's resolved index.
    pub current_index: usize,
    /// Total number of items.
    pub item_count: usize,
    /// Latest published progress value.
    pub progress: f32,
}

/// Default positional item key.
pub fn item_key(index: usize) -> String {
    format!("zoetrope-item-{index}")
}

/// Behavior of [`interpolate`] outside the input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Hold the edge output values.
    #[default]
    Clamp,
    /// Continue the edge segments linearly.
    Extend,
}

/// Piecewise-linear keyframe mapping.
///
/// Maps `value` through matching `input`/`output` keyframe lists. Item
/// renderers feed `progress` through ranges like
/// `[i - 1, i, i + 1] -> [0.8, 1.0, 0.8]` to scale or fade items around
/// their own index. `input` must be monotonically non-decreasing; the lists
/// are expected to be the same length with at least two entries, and the
/// first output is returned for degenerate ranges.
pub fn interpolate(value: f32, input: &[f32], output: &[f32], extrapolate: Extrapolate) -> f32 {
    let len = input.len().min(output.len());
    if len == 0 {
        return 0.0;
    }
    if len == 1 {
        return output[0];
    }

    let (first_in, last_in) = (input[0], input[len - 1]);
    if matches!(extrapolate, Extrapolate::Clamp) {
        if value <= first_in {
            return output[0];
        }
        if value >= last_in {
            return output[len - 1];
        }
    }

    // Pick the segment, extending the edge segments for out-of-range input.
    let mut segment = len - 2;
    for i in 0..len - 1 {
        if value < input[i + 1] {
            segment = i;
            break;
        }
    }

    let (in_a, in_b) = (input[segment], input[segment + 1]);
    let (out_a, out_b) = (output[segment], output[segment + 1]);
    let span = in_b - in_a;
    if span <= f32::EPSILON {
        return out_b;
    }
    out_a + (value - in_a) / span * (out_b - out_a)
}

/// Easing curves for the focus tween, quadratic family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Accelerate from rest.
    EaseIn,
    /// Decelerate into the target.
    EaseOut,
    /// Accelerate, then decelerate.
    EaseInOut,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Tick-driven 0..1 tween of one item's focus.
///
/// Tracks whether its item is the current index: target 1 when focused, 0
/// otherwise. Retargeting mid-flight restarts the tween from the current
/// value, so focus never snaps visibly.
#[derive(Clone, Debug)]
pub struct ItemFocusAnimator {
    value: f32,
    start: f32,
    target: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl ItemFocusAnimator {
    /// Create an animator resting at the focused (1) or unfocused (0) value.
    pub fn new(focused: bool) -> Self {
        let value = if focused { 1.0 } else { 0.0 };
        Self {
            value,
            start: value,
            target: value,
            started_at: None,
            duration: DEFAULT_FOCUS_DURATION,
            easing: Easing::default(),
        }
    }

    /// Override the tween duration and easing.
    pub fn with_timing(mut self, duration: Duration, easing: Easing) -> Self {
        self.duration = duration;
        self.easing = easing;
        self
    }

    /// Retarget toward focused (1) or unfocused (0), starting from the
    /// current value. A target the tween is already heading for is a no-op.
    pub fn set_focused(&mut self, focused: bool, now: Instant) {
        let target = if focused { 1.0 } else { 0.0 };
        if target == self.target {
            return;
        }
        self.start = self.value;
        self.target = target;
        self.started_at = Some(now);
    }

    /// Advance the tween and return the current focus value.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return self.value;
        };
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            self.value = self.target;
            self.started_at = None;
            return self.value;
        }
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.value = self.start + (self.target - self.start) * self.easing.apply(t);
        self.value
    }

    /// Latest computed focus value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether a tween is in flight.
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Stop the tween at its current value.
    pub fn cancel(&mut self) {
        self.started_at = None;
        self.target = self.value;
    }
}
