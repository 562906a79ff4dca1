//! Cubic easing curves shared by the wheel and the ladder trace animation.

/// Accelerating cubic curve; `t` is clamped to `0..=1`.
#[must_use]
pub fn ease_in_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Decelerating cubic curve; `t` is clamped to `0..=1`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of `duration` covered by `elapsed`, clamped to `0..=1`.
///
/// A non-positive duration counts as already finished.
#[must_use]
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
