//! Headless horizontally-paging carousel engine.
//!
//! `zoetrope` resolves drag gestures into discrete page indices and keeps a
//! continuous scroll-position signal synchronized with the resolved index. It
//! never draws: the embedding UI supplies an abstract gesture stream and a
//! [`ScrollContainer`] capability, and reads back jump requests, index-change
//! notifications, and the fractional-index [`ProgressSignal`] that item
//! renderers use to drive their own transitions.
//!
//! # Usage
//!
//! ```
//! use zoetrope::{CarouselArgs, CarouselEngine, GestureSample, ItemWidth, ScrollContainer};
//!
//! struct Viewport {
//!     offset: f32,
//! }
//!
//! impl ScrollContainer for Viewport {
//!     fn viewport_width(&self) -> f32 {
//!         320.0
//!     }
//!
//!     fn jump_to(&mut self, offset: f32, _animated: bool) {
//!         self.offset = offset;
//!     }
//! }
//!
//! let args = CarouselArgs::default()
//!     .item_width(ItemWidth::Fixed(100.0))
//!     .data_length(5);
//! let mut engine = CarouselEngine::new(args, Viewport { offset: 0.0 }).unwrap();
//!
//! let drag = GestureSample {
//!     dx: -130.0,
//!     ..GestureSample::default()
//! };
//! assert!(engine.gesture_start(drag));
//! engine.gesture_move(drag);
//! engine.gesture_release(drag);
//! assert_eq!(engine.current_index(), 1);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod callback;
mod config;
mod container;
mod engine;
mod error;
mod gesture;
mod item;
mod resolver;
mod signal;
mod sync;

pub use callback::{Callback, CallbackWith};
pub use config::{CarouselArgs, CarouselConfig, ItemWidth};
pub use container::{ItemLayout, ScrollContainer, item_layout};
pub use engine::CarouselEngine;
pub use error::CarouselError;
pub use gesture::{GestureClassifier, GestureSample};
pub use item::{Easing, Extrapolate, ItemFocusAnimator, RenderInfo, interpolate, item_key};
pub use resolver::resolve;
pub use signal::ProgressSignal;
pub use sync::{CarouselState, JumpRequest, ScrollSyncController};
