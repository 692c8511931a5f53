//! Rounding helpers for hours, money and ratios.

/// Round to two decimal places (hours and currency amounts).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to four decimal places (utilization ratios).
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round a currency amount to whole units for persisted invoice totals.
///
/// Halves round away from zero. Non-finite input maps to zero.
pub fn to_whole_units(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}
