//! L3 Molecular Layer: Notch animation slot
//!
//! Holds at most one tween of the scroll value toward a target notch. The
//! owner advances it explicitly every tick, so cancellation and completion
//! happen at well-defined points of the frame loop.

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};

/// Single-slot tween state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Animation {
    #[default]
    Idle,
    Animating {
        /// Scroll value when the animation started
        from: f64,
        /// Target notch
        target: f64,
        /// Seconds advanced so far
        elapsed: f64,
        /// Total duration in seconds
        duration: f64,
        easing: EasingType,
    },
}

/// Result of advancing an animation by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStep {
    /// Nothing is animating
    Idle,
    /// Interpolated value for this tick
    Running(f64),
    /// The animation reached its target this tick and is now gone
    Finished(f64),
}

impl Animation {
    /// Check if an animation is currently active
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Animation::Animating { .. })
    }

    /// Target of the live animation, if any
    pub fn target(&self) -> Option<f64> {
        match self {
            Animation::Animating { target, .. } => Some(*target),
            Animation::Idle => None,
        }
    }

    pub fn easing(&self) -> Option<EasingType> {
        match self {
            Animation::Animating { easing, .. } => Some(*easing),
            Animation::Idle => None,
        }
    }

    /// Replace whatever is running with a tween from `from` to `target`
    pub fn start_to(&mut self, from: f64, target: f64, duration: f64, easing: EasingType) {
        if self.cancel() {
            tracing::trace!("Replaced running notch animation");
        }
        *self = Animation::Animating {
            from,
            target,
            elapsed: 0.0,
            duration,
            easing,
        };
    }

    /// Drop the live animation without completing it
    ///
    /// Returns true if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        *self = Animation::Idle;
        was_active
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f64) -> AnimationStep {
        let Animation::Animating {
            from,
            target,
            elapsed,
            duration,
            easing,
        } = self
        else {
            return AnimationStep::Idle;
        };

        *elapsed += dt;
        if is_complete(*elapsed, *duration) {
            let target = *target;
            *self = Animation::Idle;
            AnimationStep::Finished(target)
        } else {
            let t = easing.apply(progress(*elapsed, *duration));
            AnimationStep::Running(lerp(*from, *target, t))
        }
    }
}
