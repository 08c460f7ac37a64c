//! Easing curves for counter animation.

/// Cubic ease-out: starts fast and decelerates smoothly into the target.
///
/// `eased(t) = 1 − (1 − t)³` with `t` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
