//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a dollar amount to whole cents, returning 0 for non-finite values.
#[must_use]
pub fn dollars_to_cents(value: f64) -> i64 {
    round_f64_to_i64(value * 100.0)
}

/// Convert cents back to dollars for display.
#[must_use]
pub fn cents_to_dollars(cents: i64) -> f64 {
    i64_to_f64(cents) / 100.0
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Round a percentage and clamp it into `0..=100`.
#[must_use]
pub fn round_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.clamp(0.0, 100.0).round();
    cast::<f64, u8>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Format cents as a `$12.34` price tag.
#[must_use]
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
