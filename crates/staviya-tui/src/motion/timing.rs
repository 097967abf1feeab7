//! L4 Atomic Layer: Time and range arithmetic for motion
//!
//! Pure functions shared by the progress tracker, parallax bindings and
//! entrance transitions. Time is always passed in, never sampled here.

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if `duration` has fully elapsed since `start`
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor, not clamped
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Position of `value` within `[from, to]` as a fraction, clamped to [0, 1].
///
/// A degenerate range is a step at `from`.
#[inline]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    let span = to - from;
    if span.abs() <= f64::EPSILON {
        return if value < from { 0.0 } else { 1.0 };
    }
    ((value - from) / span).clamp(0.0, 1.0)
}

/// Map `value` from the input range to the output range, clamping at the ends
#[inline]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    lerp(output.0, output.1, inverse_lerp(input.0, input.1, value))
}
