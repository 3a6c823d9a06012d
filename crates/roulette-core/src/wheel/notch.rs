//! L4 Atomic Layer: Notch arithmetic
//!
//! Notches are the values `anchor + k * interval` for integer `k`.

use crate::config::GridConfig;

/// Periodic grid of stopping values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchGrid {
    interval: f64,
    anchor: f64,
}

impl NotchGrid {
    /// Create a grid, rejecting a non-positive or non-finite interval
    pub fn new(interval: f64, anchor: f64) -> crate::Result<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(crate::Error::InvalidInterval(interval));
        }
        if !anchor.is_finite() {
            return Err(crate::Error::Config(format!(
                "anchor must be finite, got {}",
                anchor
            )));
        }
        Ok(Self { interval, anchor })
    }

    pub fn from_config(grid: &GridConfig) -> crate::Result<Self> {
        Self::new(grid.interval, grid.anchor)
    }

    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    #[inline]
    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    /// Position in units of notches relative to the anchor
    #[inline]
    fn steps(&self, scroll: f64) -> f64 {
        (scroll - self.anchor) / self.interval
    }

    #[inline]
    fn notch_at(&self, n: f64) -> f64 {
        self.anchor + n * self.interval
    }

    /// Exact membership test; use [`NotchGrid::near_notch`] when tolerance is needed
    pub fn is_on_notch(&self, scroll: f64) -> bool {
        (scroll - self.anchor) % self.interval == 0.0
    }

    /// Nearest notch to `scroll`
    ///
    /// Exact midpoints between two notches resolve to the notch with an even
    /// index (round half to even), so 0.5 goes to 0 and 1.5 goes to 2.
    pub fn nearest_notch(&self, scroll: f64) -> f64 {
        self.notch_at(self.steps(scroll).round_ties_even())
    }

    /// Next notch in the direction of `velocity`
    ///
    /// Moving forward takes the ceiling, moving backward the floor. A value
    /// already on a notch returns that notch. Zero velocity has no direction
    /// and falls back to [`NotchGrid::nearest_notch`].
    pub fn next_notch(&self, scroll: f64, velocity: f64) -> f64 {
        if velocity > 0.0 {
            self.notch_at(self.steps(scroll).ceil())
        } else if velocity < 0.0 {
            self.notch_at(self.steps(scroll).floor())
        } else {
            self.nearest_notch(scroll)
        }
    }

    /// Fractional distance from `scroll` to `notch`, normalized by the interval
    #[inline]
    fn fraction_to(&self, scroll: f64, notch: f64) -> f64 {
        ((notch - scroll) / self.interval).abs() % 1.0
    }

    /// Nearest notch if `scroll` lies within `tol` intervals of it
    pub fn near_notch(&self, scroll: f64, tol: f64) -> Option<f64> {
        let nearest = self.nearest_notch(scroll);
        (self.fraction_to(scroll, nearest) < tol).then_some(nearest)
    }

    /// Next notch in the direction of travel if `scroll` lies within `tol` intervals of it
    pub fn near_next_notch(&self, scroll: f64, velocity: f64, tol: f64) -> Option<f64> {
        let next = self.next_notch(scroll, velocity);
        (self.fraction_to(scroll, next) < tol).then_some(next)
    }

    /// Check if at least one notch lies inside `[min, max]`
    pub fn has_notch_within(&self, min: f64, max: f64) -> bool {
        min <= max && self.notch_at(self.steps(min).ceil()) <= max
    }

    /// Closest notch to `notch` that lies inside `[min, max]`
    ///
    /// Falls back to clamping into the bounds when no notch fits between them.
    pub fn clamp_notch(&self, notch: f64, min: f64, max: f64) -> f64 {
        let candidate = if notch > max {
            self.notch_at(self.steps(max).floor())
        } else if notch < min {
            self.notch_at(self.steps(min).ceil())
        } else {
            return notch;
        };

        if candidate < min || candidate > max {
            notch.clamp(min, max)
        } else {
            candidate
        }
    }
}
