//! L4 Atomic Layer: Time calculation utilities for notch animations
//!
//! Time is passed in explicitly as elapsed seconds so the same code runs under
//! a fixed-step simulation and a wall-clock frame loop.

/// Calculate animation progress (0.0 to 1.0) from elapsed time and duration
///
/// # Arguments
/// * `elapsed` - Seconds since the animation started
/// * `duration` - Total animation duration in seconds
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(elapsed: f64, duration: f64) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
