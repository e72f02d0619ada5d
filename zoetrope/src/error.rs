//! Error taxonomy for the carousel engine.

use thiserror::Error;

/// Errors surfaced by the carousel engine.
///
/// Out-of-range indices are deliberately absent: any index that falls outside
/// `[0, data_length - 1]` is clamped back into range, never reported as a
/// failure. Clamping is the recovery policy for a gesture handler where a
/// dropped frame must not abort the interaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// Index resolution or a scroll jump was requested while the carousel
    /// holds zero items. Clears automatically once the dataset becomes
    /// non-empty again.
    #[error("carousel dataset is empty")]
    EmptyDataset,
    /// The configuration update was rejected before it could poison any
    /// downstream arithmetic.
    #[error("invalid carousel configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable rejection cause.
        reason: String,
    },
}

impl CarouselError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
