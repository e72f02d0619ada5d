//! Gesture-to-index resolution.

use crate::{config::CarouselConfig, error::CarouselError};

/// Resolve a finished drag into a target index.
///
/// Pure and deterministic: the result is reproducible from the four inputs
/// alone. The algorithm, in order:
///
/// 1. Back the displacement out of the resting offset:
///    `resolved = current_index * item_width - dx`.
/// 2. Bias the offset by `threshold` along the drag direction, pulling the
///    crossing point `threshold` pixels closer than the item midpoint
///    (`dx == 0` gets no bias, so a no-op release resolves to
///    `current_index` for any threshold).
/// 3. Round to the nearest index (half away from zero).
/// 4. When `use_velocity_for_index` is set, each whole unit of `|vx|` beyond
///    the first advances the candidate one extra index in the drag
///    direction: `boost = max(round(|vx|) - 1, 0)`, subtracted when
///    `dx > 0`, added otherwise. The asymmetry at `dx == 0` (flicks with no
///    net displacement boost toward higher indices) is a deliberately
///    preserved quirk of the shipped behavior, as is the boost compounding
///    across multiple boundaries.
/// 5. Clamp into `[0, data_length - 1]`.
///
/// Fails with [`CarouselError::EmptyDataset`] when `data_length == 0`; the
/// engine guards that state and never calls in.
pub fn resolve(
    current_index: usize,
    dx: f32,
    vx: f32,
    config: &CarouselConfig,
) -> Result<usize, CarouselError> {
    let Some(max_index) = config.max_index() else {
        return Err(CarouselError::EmptyDataset);
    };

    let current_offset = current_index as f32 * config.item_width;
    let resolved_offset = current_offset - dx;
    let bias = if dx > 0.0 {
        -config.threshold
    } else if dx < 0.0 {
        config.threshold
    } else {
        0.0
    };

    let mut candidate = ((resolved_offset + bias) / config.item_width).round();
    if config.use_velocity_for_index {
        let boost = (vx.abs().round() - 1.0).max(0.0);
        candidate = if dx > 0.0 {
            candidate - boost
        } else {
            candidate + boost
        };
    }

    if candidate.is_finite() {
        Ok(candidate.clamp(0.0, max_index as f32) as usize)
    } else {
        Ok(current_index.min(max_index))
    }
}
