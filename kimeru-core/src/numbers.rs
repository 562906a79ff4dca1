//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count or index to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Floor a f64 and clamp it into `0..upper`, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_index(value: f64, upper: usize) -> usize {
    if !value.is_finite() || upper == 0 {
        return 0;
    }
    let floored = value.floor().max(0.0);
    cast::<f64, usize>(floored)
        .unwrap_or(usize::MAX)
        .min(upper - 1)
}

/// Convert a u32 to f64 (lossless).
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}
