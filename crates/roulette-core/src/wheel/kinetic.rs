//! L3 Molecular Layer: Base kinetic scroll state
//!
//! Tracks the scroll value and its velocity, integrates touch movement while a
//! gesture is held and estimates the release velocity from recent samples.
//! Per-tick motion after release is left to the owner (see `effect`).

use std::collections::VecDeque;

/// Number of touch samples kept for velocity estimation
pub const MAX_HISTORY: usize = 5;

/// Movement required before a drag starts moving the value
pub const DEFAULT_DRAG_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    t: f64,
    value: f64,
}

/// Kinetic scroll state shared by all effects built on top of it
#[derive(Debug, Clone)]
pub struct KineticScroll {
    /// Current position along the axis
    scroll: f64,
    /// Signed rate of change in units per second
    velocity: f64,
    /// Per-tick multiplicative decay coefficient
    friction: f64,
    min: f64,
    max: f64,
    drag_threshold: f64,
    /// A touch is currently held
    is_manual: bool,
    /// Total touch travel since `start`
    displacement: f64,
    /// Touch value already turned into scroll distance
    applied_value: f64,
    history: VecDeque<Sample>,
    velocity_update_requested: bool,
}

impl Default for KineticScroll {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl KineticScroll {
    pub fn new(friction: f64) -> Self {
        Self {
            scroll: 0.0,
            velocity: 0.0,
            friction,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            is_manual: false,
            displacement: 0.0,
            applied_value: 0.0,
            history: VecDeque::with_capacity(MAX_HISTORY + 1),
            velocity_update_requested: false,
        }
    }

    /// Restrict the reachable scroll range
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self.scroll = self.scroll.clamp(min, max);
        self
    }

    #[inline]
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Place the value directly, still respecting the bounds
    pub fn set_scroll(&mut self, scroll: f64) {
        self.scroll = scroll.clamp(self.min, self.max);
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[inline]
    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    pub fn set_drag_threshold(&mut self, threshold: f64) {
        self.drag_threshold = threshold.max(0.0);
    }

    #[inline]
    pub fn is_manual(&self) -> bool {
        self.is_manual
    }

    /// Move the value by `distance`, clamped to the bounds
    ///
    /// Returns the new scroll value.
    pub fn apply_distance(&mut self, distance: f64) -> f64 {
        self.scroll = (self.scroll + distance).clamp(self.min, self.max);
        self.scroll
    }

    /// Begin a touch gesture at touch value `val`, time `t` (seconds)
    pub fn start(&mut self, val: f64, t: f64) {
        if !val.is_finite() || !t.is_finite() {
            tracing::warn!(val, t, "Ignoring gesture start with a non-finite sample");
            return;
        }
        self.is_manual = true;
        self.velocity = 0.0;
        self.displacement = 0.0;
        self.applied_value = val;
        self.velocity_update_requested = false;
        self.history.clear();
        self.history.push_back(Sample { t, value: val });
    }

    /// Feed a touch move
    pub fn update(&mut self, val: f64, t: f64) {
        if !self.is_manual {
            return;
        }
        self.record(val, t);
    }

    /// Release the touch and derive the fling velocity from recent samples
    pub fn stop(&mut self, val: f64, t: f64) {
        if !self.is_manual {
            return;
        }
        self.record(val, t);
        self.is_manual = false;

        self.velocity = match (self.history.front(), self.history.back()) {
            (Some(first), Some(last)) if self.is_dragging() && last.t > first.t => {
                (last.value - first.value) / (last.t - first.t)
            }
            _ => 0.0,
        };
        tracing::debug!(
            scroll = self.scroll,
            velocity = self.velocity,
            samples = self.history.len(),
            "Touch released"
        );

        self.history.clear();
        self.trigger_velocity_update();
    }

    /// End a held touch without deriving a velocity from it
    pub fn release(&mut self) {
        self.is_manual = false;
        self.displacement = 0.0;
        self.history.clear();
    }

    fn is_dragging(&self) -> bool {
        self.displacement >= self.drag_threshold
    }

    fn record(&mut self, val: f64, t: f64) {
        if !val.is_finite() || !t.is_finite() {
            tracing::warn!(val, t, "Ignoring non-finite touch sample");
            return;
        }
        if let Some(last) = self.history.back() {
            if t < last.t {
                tracing::trace!(t, last = last.t, "Ignoring touch sample older than the last one");
                return;
            }
            self.displacement += (val - last.value).abs();
        }

        self.history.push_back(Sample { t, value: val });
        while self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }

        if self.is_dragging() {
            self.apply_distance(val - self.applied_value);
            self.applied_value = val;
        }
    }

    /// Ask the tick driver for another velocity update
    #[inline]
    pub fn trigger_velocity_update(&mut self) {
        self.velocity_update_requested = true;
    }

    #[inline]
    pub fn cancel_velocity_update(&mut self) {
        self.velocity_update_requested = false;
    }

    #[inline]
    pub fn velocity_update_requested(&self) -> bool {
        self.velocity_update_requested
    }
}
