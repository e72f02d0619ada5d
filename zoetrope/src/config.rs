//! Carousel configuration: the public args surface and its validated form.

use derive_setters::Setters;

use crate::{
    callback::{Callback, CallbackWith},
    error::CarouselError,
    gesture::{GestureSample, default_should_capture, default_should_release},
};

const DEFAULT_END_REACHED_THRESHOLD: f32 = 0.9;

/// Describes how a carousel item is sized along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ItemWidth {
    /// Item width fills the container's viewport.
    #[default]
    FillViewport,
    /// Item width is a fixed value in the carousel's pixel unit.
    Fixed(f32),
}

/// Configuration arguments for [`CarouselEngine`](crate::CarouselEngine).
///
/// All fields are optional with defaults matching a full-width, zero-padding
/// carousel. Callback slots are set through the dedicated builder methods.
#[derive(Clone, PartialEq, Setters)]
pub struct CarouselArgs {
    /// Width of each item along the scroll axis.
    pub item_width: ItemWidth,
    /// Symmetric padding applied before the first and after the last item.
    pub content_offset: f32,
    /// Extra drag distance (beyond the item-width midpoint) required before
    /// the resolved index crosses a boundary.
    pub threshold: f32,
    /// Whether release velocity advances the resolved index beyond the
    /// displacement-derived candidate.
    pub use_velocity_for_index: bool,
    /// Externally controlled starting/target index.
    pub index: usize,
    /// Number of items in the dataset.
    pub data_length: usize,
    /// Fraction of the viewport used as the end-reached trigger distance.
    pub on_end_reached_threshold: f32,
    /// Predicate deciding whether a candidate move belongs to the carousel.
    #[setters(skip)]
    pub should_capture: CallbackWith<GestureSample, bool>,
    /// Predicate deciding whether an in-progress capture is ceded upward.
    #[setters(skip)]
    pub should_release: CallbackWith<GestureSample, bool>,
    /// Notified with the resolved index on every gesture release.
    #[setters(skip)]
    pub on_index_change: CallbackWith<usize>,
    /// Notified when a gesture capture is granted.
    #[setters(skip)]
    pub on_gesture_start: CallbackWith<GestureSample>,
    /// Notified after a release (or granted termination) has been handled.
    #[setters(skip)]
    pub on_gesture_release: CallbackWith<GestureSample>,
    /// Notified when the scroll offset approaches the end of the content.
    #[setters(skip)]
    pub on_end_reached: Callback,
}

impl CarouselArgs {
    /// Sets the capture predicate.
    pub fn should_capture<F>(mut self, predicate: F) -> Self
    where
        F: Fn(GestureSample) -> bool + Send + Sync + 'static,
    {
        self.should_capture = CallbackWith::new(predicate);
        self
    }

    /// Sets the release predicate.
    pub fn should_release<F>(mut self, predicate: F) -> Self
    where
        F: Fn(GestureSample) -> bool + Send + Sync + 'static,
    {
        self.should_release = CallbackWith::new(predicate);
        self
    }

    /// Sets the index-change handler.
    pub fn on_index_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_index_change = CallbackWith::new(handler);
        self
    }

    /// Sets the gesture-start handler.
    pub fn on_gesture_start<F>(mut self, handler: F) -> Self
    where
        F: Fn(GestureSample) + Send + Sync + 'static,
    {
        self.on_gesture_start = CallbackWith::new(handler);
        self
    }

    /// Sets the gesture-release handler.
    pub fn on_gesture_release<F>(mut self, handler: F) -> Self
    where
        F: Fn(GestureSample) + Send + Sync + 'static,
    {
        self.on_gesture_release = CallbackWith::new(handler);
        self
    }

    /// Sets the end-reached handler.
    pub fn on_end_reached<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_end_reached = Callback::new(handler);
        self
    }
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            item_width: ItemWidth::default(),
            content_offset: 0.0,
            threshold: 0.0,
            use_velocity_for_index: true,
            index: 0,
            data_length: 0,
            on_end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            should_capture: CallbackWith::new(default_should_capture),
            should_release: CallbackWith::new(default_should_release),
            on_index_change: CallbackWith::new(|_| {}),
            on_gesture_start: CallbackWith::new(|_| {}),
            on_gesture_release: CallbackWith::new(|_| {}),
            on_end_reached: Callback::default(),
        }
    }
}

/// Validated configuration, immutable between updates.
///
/// Construction rejects anything that could poison downstream arithmetic
/// (zero/negative/non-finite item width, negative threshold) so the hot
/// gesture path never has to re-check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Resolved item width, guaranteed positive and finite.
    pub item_width: f32,
    /// Symmetric leading/trailing content padding.
    pub content_offset: f32,
    /// Boundary dead-zone distance, guaranteed non-negative and finite.
    pub threshold: f32,
    /// Whether release velocity advances the resolved index.
    pub use_velocity_for_index: bool,
    /// Number of items in the dataset.
    pub data_length: usize,
}

impl CarouselConfig {
    /// Resolve and validate `args` against the container's viewport width.
    pub fn resolve(args: &CarouselArgs, viewport_width: f32) -> Result<Self, CarouselError> {
        let item_width = match args.item_width {
            ItemWidth::FillViewport => viewport_width,
            ItemWidth::Fixed(width) => width,
        };
        if !item_width.is_finite() || item_width <= 0.0 {
            return Err(CarouselError::invalid(format!(
                "item width must be positive and finite, got {item_width}"
            )));
        }
        if !args.threshold.is_finite() || args.threshold < 0.0 {
            return Err(CarouselError::invalid(format!(
                "threshold must be non-negative and finite, got {}",
                args.threshold
            )));
        }
        if !args.content_offset.is_finite() {
            return Err(CarouselError::invalid(format!(
                "content offset must be finite, got {}",
                args.content_offset
            )));
        }
        if !args.on_end_reached_threshold.is_finite() || args.on_end_reached_threshold < 0.0 {
            return Err(CarouselError::invalid(format!(
                "end-reached threshold must be non-negative and finite, got {}",
                args.on_end_reached_threshold
            )));
        }
        Ok(Self {
            item_width,
            content_offset: args.content_offset,
            threshold: args.threshold,
            use_velocity_for_index: args.use_velocity_for_index,
            data_length: args.data_length,
        })
    }

    /// Highest valid index, or `None` while the dataset is empty.
    pub fn max_index(&self) -> Option<usize> {
        self.data_length.checked_sub(1)
    }

    /// Clamp `index` into `[0, data_length - 1]`; 0 while empty.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.max_index().unwrap_or(0))
    }
}
