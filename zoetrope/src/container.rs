//! The scroll-container capability consumed by the engine.

use crate::config::CarouselConfig;

/// Horizontal scroll container the engine drives.
///
/// The engine is headless: it never lays out or draws items itself. The
/// embedding UI implements this capability over whatever physically scrolls
/// (a virtualized list, a plain translated strip, a test fake) and feeds the
/// container's offset stream back through
/// [`CarouselEngine::report_offset`](crate::CarouselEngine::report_offset).
/// Offsets exchanged here are in container space: item space plus the leading
/// content offset.
pub trait ScrollContainer {
    /// Physical viewport extent along the scroll axis.
    fn viewport_width(&self) -> f32;

    /// Imperatively set the visible scroll offset.
    ///
    /// `animated = false` must take effect immediately (1:1 finger tracking
    /// during a drag); `animated = true` may transition over time, reporting
    /// intermediate offsets as it goes. Jump requests are fire-and-forget:
    /// a newer request supersedes an in-flight one.
    fn jump_to(&mut self, offset: f32, animated: bool);
}

/// Position and extent of one item along the scroll axis, in container space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemLayout {
    /// Leading edge of the item.
    pub offset: f32,
    /// Extent of the item.
    pub length: f32,
}

/// Deterministic item layout the physical container must agree with.
pub fn item_layout(config: &CarouselConfig, index: usize) -> ItemLayout {
    ItemLayout {
        offset: config.item_width * index as f32 + config.content_offset,
        length: config.item_width,
    }
}
