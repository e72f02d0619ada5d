//! The shared progress cell published by the sync controller.

use std::sync::Arc;

use parking_lot::RwLock;

/// Continuously-updated fractional-index signal.
///
/// `progress` is `scroll_position / item_width`: its integer part tracks the
/// current index at rest and interpolates smoothly while the container moves.
/// The cell has exactly one writer ([`ScrollSyncController`]); clones are
/// cheap read handles for item renderers, which compute per-item effects as
/// pure functions of `item_index - progress`.
///
/// [`ScrollSyncController`]: crate::ScrollSyncController
#[derive(Clone)]
pub struct ProgressSignal {
    cell: Arc<RwLock<f32>>,
}

impl ProgressSignal {
    pub(crate) fn new(initial: f32) -> Self {
        Self {
            cell: Arc::new(RwLock::new(initial)),
        }
    }

    pub(crate) fn publish(&self, value: f32) {
        *self.cell.write() = value;
    }

    /// Read the latest published progress value.
    pub fn get(&self) -> f32 {
        *self.cell.read()
    }

    /// Run `f` against the latest published progress value.
    pub fn with<R>(&self, f: impl FnOnce(f32) -> R) -> R {
        f(*self.cell.read())
    }
}
