//! Weighted outcome selection.
//!
//! Each option owns a contiguous sub-interval of `[0, total_weight)` whose
//! width is its weight; a uniform draw over that range picks the owner.

use crate::error::WheelError;
use crate::types::WeightedOption;

/// Pick a winning index from `options` using one draw from `random`.
///
/// `random` must return a float in `[0, 1)`. A draw that overshoots the total
/// (rounding, or a source returning `1.0`) selects the last option rather
/// than failing.
pub fn pick<F>(options: &[WeightedOption], random: F) -> Result<usize, WheelError>
where
    F: FnOnce() -> f64,
{
    if options.len() < 2 {
        return Err(WheelError::TooFewOptions(options.len()));
    }

    let total: f64 = options.iter().map(|o| o.weight).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(WheelError::NonPositiveTotalWeight(total));
    }

    let mut r = random() * total;
    for (i, opt) in options.iter().enumerate() {
        if r < opt.weight {
            return Ok(i);
        }
        r -= opt.weight;
    }

    Ok(options.len() - 1)
}
