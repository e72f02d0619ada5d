//! Scroll-position synchronization.
//!
//! [`ScrollSyncController`] owns the authoritative [`CarouselState`] and the
//! [`ProgressSignal`]. Its mutating operations are reducer-style transitions:
//! they update state and return a [`JumpRequest`] effect for the engine to
//! forward to the container, instead of touching the container behind the
//! engine's back.
//!
//! All positions on this level are in item space, with the leading content
//! padding removed: at rest `scroll_position == current_index * item_width`
//! for any `content_offset`, and progress is simply
//! `scroll_position / item_width`. The engine adds the content offset back
//! when it talks to the container.

use tracing::debug;

use crate::{
    config::CarouselConfig,
    error::CarouselError,
    gesture::GestureSample,
    resolver,
    signal::ProgressSignal,
};

/// Authoritative carousel state.
///
/// `scroll_position` rests at `current_index * item_width` and diverges
/// continuously during an active gesture or animated transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselState {
    /// Resolved page index.
    pub current_index: usize,
    /// Live scroll position in item space.
    pub scroll_position: f32,
}

/// A scroll request for the container, in item space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpRequest {
    /// Target offset in item space.
    pub offset: f32,
    /// Whether the container should transition over time or snap.
    pub animated: bool,
}

/// Owns [`CarouselState`] and publishes the progress signal.
pub struct ScrollSyncController {
    state: CarouselState,
    signal: ProgressSignal,
}

impl ScrollSyncController {
    /// Seed state from an externally supplied initial index, clamped into
    /// range (0 while the dataset is empty).
    pub fn new(initial_index: usize, config: &CarouselConfig) -> Self {
        let current_index = config.clamp_index(initial_index);
        let scroll_position = if config.data_length == 0 {
            0.0
        } else {
            current_index as f32 * config.item_width
        };
        Self {
            state: CarouselState {
                current_index,
                scroll_position,
            },
            signal: ProgressSignal::new(scroll_position / config.item_width),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Resolved page index.
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Latest published progress value.
    pub fn progress(&self) -> f32 {
        self.signal.get()
    }

    /// A read handle on the progress signal for item renderers.
    pub fn signal(&self) -> ProgressSignal {
        self.signal.clone()
    }

    /// An in-progress drag moved: request a non-animated jump that tracks the
    /// finger 1:1.
    ///
    /// State is not mutated here. `scroll_position` (and therefore progress)
    /// only updates from container offset reports, so the published value
    /// stays consistent with the container's actual rendered position rather
    /// than with where the finger asked it to be.
    pub fn gesture_move(
        &self,
        sample: GestureSample,
        config: &CarouselConfig,
    ) -> Result<JumpRequest, CarouselError> {
        if config.data_length == 0 {
            return Err(CarouselError::EmptyDataset);
        }
        Ok(JumpRequest {
            offset: self.state.current_index as f32 * config.item_width - sample.dx,
            animated: false,
        })
    }

    /// The container's visible position changed; ingest the container-space
    /// offset and publish the derived progress.
    pub fn report_offset(&mut self, container_offset: f32, config: &CarouselConfig) {
        if config.data_length == 0 {
            self.state.scroll_position = 0.0;
            self.signal.publish(0.0);
            return;
        }
        self.state.scroll_position = container_offset - config.content_offset;
        self.signal.publish(self.state.scroll_position / config.item_width);
    }

    /// A drag ended: resolve the target index, adopt it, and request an
    /// animated transition to its resting offset.
    pub fn gesture_release(
        &mut self,
        sample: GestureSample,
        config: &CarouselConfig,
    ) -> Result<(usize, JumpRequest), CarouselError> {
        let new_index = resolver::resolve(self.state.current_index, sample.dx, sample.vx, config)?;
        debug!(
            from = self.state.current_index,
            to = new_index,
            dx = sample.dx,
            vx = sample.vx,
            "gesture release resolved"
        );
        self.state.current_index = new_index;
        Ok((
            new_index,
            JumpRequest {
                offset: new_index as f32 * config.item_width,
                animated: true,
            },
        ))
    }

    /// An externally controlled index took effect; adopt it and request an
    /// animated transition. The caller decided this change, so no
    /// index-change notification is owed.
    pub fn apply_external_index(
        &mut self,
        index: usize,
        config: &CarouselConfig,
    ) -> Result<JumpRequest, CarouselError> {
        if config.data_length == 0 {
            return Err(CarouselError::EmptyDataset);
        }
        let index = config.clamp_index(index);
        self.state.current_index = index;
        Ok(JumpRequest {
            offset: index as f32 * config.item_width,
            animated: true,
        })
    }

    /// Item width changed without an index change: re-anchor
    /// `scroll_position` so the published progress does not jump.
    ///
    /// Progress is the anchor, not the position: the new position is
    /// `progress * new_width`, and the signal is left untouched, so restoring
    /// the previous width restores the exact previous state with no drift.
    pub fn rescale_item_width(&mut self, new_width: f32) {
        self.state.scroll_position = self.signal.get() * new_width;
    }

    /// Dataset length changed: clamp the index back into range, or enter the
    /// empty state (progress pinned to 0, resolution disabled) when the
    /// dataset emptied. Returns a re-anchoring jump when the clamp moved the
    /// index.
    pub fn reconcile_data_length(&mut self, config: &CarouselConfig) -> Option<JumpRequest> {
        let Some(max_index) = config.max_index() else {
            self.state.current_index = 0;
            self.state.scroll_position = 0.0;
            self.signal.publish(0.0);
            return None;
        };
        if self.state.current_index <= max_index {
            return None;
        }
        debug!(
            from = self.state.current_index,
            to = max_index,
            "index clamped after dataset shrink"
        );
        self.state.current_index = max_index;
        Some(JumpRequest {
            offset: max_index as f32 * config.item_width,
            animated: false,
        })
    }
}
