//! A headless stand-in for the physical scroll container.

use zoetrope::ScrollContainer;

const SNAP_DISTANCE: f32 = 0.5;

/// Scroll container simulation: applies non-animated jumps immediately and
/// tweens animated ones toward their target with frame-rate-independent
/// smoothing, the way a real scroll view eases into a programmatic offset.
pub struct SimulatedContainer {
    viewport: f32,
    offset: f32,
    target: Option<f32>,
    smoothing: f32,
}

impl SimulatedContainer {
    pub fn new(viewport: f32) -> Self {
        Self {
            viewport,
            offset: 0.0,
            target: None,
            smoothing: 0.12,
        }
    }

    /// Current visible offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether an animated transition is still in flight.
    pub fn is_settled(&self) -> bool {
        self.target.is_none()
    }

    /// Advance one simulated frame of `dt` seconds and return the visible
    /// offset, to be fed back through `CarouselEngine::report_offset`.
    pub fn step(&mut self, dt: f32) -> f32 {
        if let Some(target) = self.target {
            let diff = target - self.offset;
            if diff.abs() < SNAP_DISTANCE {
                self.offset = target;
                self.target = None;
            } else {
                let movement_factor = ((1.0 - self.smoothing) * dt * 60.0).min(1.0);
                self.offset += diff * movement_factor;
            }
        }
        self.offset
    }
}

impl ScrollContainer for SimulatedContainer {
    fn viewport_width(&self) -> f32 {
        self.viewport
    }

    fn jump_to(&mut self, offset: f32, animated: bool) {
        if animated {
            self.target = Some(offset);
        } else {
            self.offset = offset;
            self.target = None;
        }
    }
}
