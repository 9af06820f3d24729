//! Wheel geometry: the pointer convention, spin targets and landing recovery.
//!
//! Convention used everywhere (drawing, target computation, result decoding):
//! - the pointer sits at screen angle 0 and never moves;
//! - slice `i` is drawn over `[i * s + rotation, (i + 1) * s + rotation)` where
//!   `s = 2π / count`, angles increasing in the canvas direction.
//!
//! The pointer therefore reads wheel-face angle `(-rotation) mod 2π`.
//! [`final_rotation_normalized`] and [`landed_index`] are inverses of each
//! other under this mapping.

use std::f64::consts::TAU;

use crate::error::WheelError;

/// Full turns added to every spin by default.
pub const DEFAULT_EXTRA_TURNS: u32 = 8;

#[inline(always)]
pub fn slice_angle(count: usize) -> f64 {
    TAU / count as f64
}

/// Reduce an angle into `[0, 2π)`.
#[inline(always)]
pub fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Wheel-face angle of slice `index`'s midpoint, measured from slice 0's start.
#[inline(always)]
pub fn target_pointer_position(index: usize, count: usize) -> f64 {
    let s = slice_angle(count);
    index as f64 * s + s / 2.0
}

/// Normalized rotation that puts the midpoint of slice `index` under the pointer.
pub fn final_rotation_normalized(index: usize, count: usize) -> f64 {
    normalize(TAU - target_pointer_position(index, count))
}

/// Wheel-face angle currently under the pointer.
#[inline(always)]
pub fn pointer_position(rotation: f64) -> f64 {
    normalize(TAU - normalize(rotation))
}

/// Slice index under the pointer for a given cumulative rotation.
///
/// Clamped to `[0, count - 1]` so rounding at the 2π wraparound can never
/// produce an out-of-range index.
pub fn landed_index(rotation: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let raw = (pointer_position(rotation) / slice_angle(count)).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}

/// Forward angular displacement from `current` that lands the pointer on the
/// midpoint of slice `index`, plus `extra_turns` full turns.
///
/// The result is always strictly positive and at least `extra_turns * 2π`.
pub fn compute_target_delta(
    index: usize,
    count: usize,
    current: f64,
    extra_turns: u32,
) -> Result<f64, WheelError> {
    if count < 2 {
        return Err(WheelError::TooFewOptions(count));
    }
    if index >= count {
        return Err(WheelError::IndexOutOfRange { index, count });
    }

    let final_norm = final_rotation_normalized(index, count);
    let mut delta = final_norm - normalize(current);
    if delta <= 0.0 {
        delta += TAU;
    }

    Ok(f64::from(extra_turns) * TAU + delta)
}

/// Quartic ease-out: fast start, smooth stop.
///
/// `progress` is clamped to `[0, 1]`; the endpoints map exactly to 0 and 1.
#[inline(always)]
pub fn ease_out_quart(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints_exact() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(-0.5), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn test_easing_monotone() {
        let mut prev = ease_out_quart(0.0);
        for step in 1..=1000 {
            let v = ease_out_quart(step as f64 / 1000.0);
            assert!(v >= prev, "easing decreased at step {step}");
            prev = v;
        }
    }

    #[test]
    fn test_easing_decelerates() {
        // First tenth covers far more ground than the last tenth.
        let head = ease_out_quart(0.1) - ease_out_quart(0.0);
        let tail = ease_out_quart(1.0) - ease_out_quart(0.9);
        assert!(head > tail * 100.0);
    }

    #[test]
    fn test_normalize_range() {
        for &a in &[0.0, TAU, -TAU, 37.5, -0.1, -1e-18, 1e6] {
            let n = normalize(a);
            assert!((0.0..TAU).contains(&n), "normalize({a}) = {n}");
        }
    }

    #[test]
    fn test_landed_index_inverts_target() {
        for count in 2..=12 {
            for index in 0..count {
                let rotation = final_rotation_normalized(index, count);
                assert_eq!(landed_index(rotation, count), index, "count {count} index {index}");
            }
        }
    }

    #[test]
    fn test_landed_index_clamped() {
        // Pointer reading just below 2π must still map to the last slice.
        let count = 6;
        let rotation = 1e-15;
        let idx = landed_index(rotation, count);
        assert!(idx < count);
        assert_eq!(idx, count - 1);
    }

    #[test]
    fn test_delta_forward_and_at_least_one_turn() {
        let starts = [0.0, 0.1, 1.0, 3.3, TAU, 37.5, 1234.567, 50.0 * TAU + 0.001];
        for count in 2..=10 {
            for index in 0..count {
                for &start in &starts {
                    let delta = compute_target_delta(index, count, start, 1).unwrap();
                    assert!(delta > 0.0);
                    assert!(delta >= TAU);
                    assert!(delta <= 2.0 * TAU + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_delta_lands_on_winner() {
        let starts = [0.0, 0.5, 2.0, 37.5, 100.25, 9999.0];
        for count in 2..=16 {
            for index in 0..count {
                for &start in &starts {
                    let delta = compute_target_delta(index, count, start, DEFAULT_EXTRA_TURNS).unwrap();
                    assert_eq!(landed_index(start + delta, count), index);
                }
            }
        }
    }

    #[test]
    fn test_delta_already_aligned_takes_full_turn() {
        let count = 4;
        let aligned = final_rotation_normalized(2, count);
        let delta = compute_target_delta(2, count, aligned, 0).unwrap();
        assert!((delta - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_delta_rejects_bad_input() {
        assert!(matches!(
            compute_target_delta(3, 3, 0.0, 8),
            Err(WheelError::IndexOutOfRange { index: 3, count: 3 })
        ));
        assert!(matches!(compute_target_delta(0, 1, 0.0, 8), Err(WheelError::TooFewOptions(1))));
    }
}
