// Scaling raw category values onto a fixed point budget.

/// Denominators at or below this are treated as zero.
pub const NORM_EPSILON: f64 = 1e-9;

/// Largest value in the sequence, or `None` when empty.
pub fn max_value(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().reduce(f64::max)
}

/// Smallest value in the sequence, or `None` when empty.
pub fn min_value(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().reduce(f64::min)
}

/// `value / max * cap`, clamped into `[0, cap]`.
///
/// Returns 0.0 when `max` is approximately zero or negative, so an all-zero
/// population scores nothing instead of dividing by zero.
pub fn scale_to_max(value: f64, max: f64, cap: f64) -> f64 {
    let cap = cap.max(0.0);
    if max.is_nan() || max < NORM_EPSILON || !value.is_finite() {
        return 0.0;
    }
    (value / max * cap).clamp(0.0, cap)
}

/// Inverse scaling: `min / value * cap`, clamped into `[0, cap]`.
///
/// The smallest value in the population earns the full `cap`; larger values
/// earn proportionally less. A value at or below zero is the worst possible
/// outcome and earns the full `cap`.
pub fn scale_inverse(value: f64, min: f64, cap: f64) -> f64 {
    let cap = cap.max(0.0);
    if !value.is_finite() {
        return 0.0;
    }
    if value < NORM_EPSILON {
        return cap;
    }
    (min.max(0.0) / value * cap).clamp(0.0, cap)
}
