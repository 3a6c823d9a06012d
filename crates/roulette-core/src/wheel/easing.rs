//! L4 Atomic Layer: Easing curves for notch animations
//!
//! Maps progress in [0, 1] to eased progress in [0, 1].

use serde::{Deserialize, Serialize};

/// Easing curve applied to an animation's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Constant speed, used when coasting to the next notch
    Linear,
    /// Circular ease-in-out, used when pulling back to the nearest notch
    InOutCirc,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::InOutCirc => in_out_circ(t),
        }
    }
}

/// Circular ease-in-out: a quarter circle into the midpoint, mirrored out of it
#[inline]
fn in_out_circ(t: f64) -> f64 {
    let p = t * 2.0;
    if p < 1.0 {
        -0.5 * ((1.0 - p * p).sqrt() - 1.0)
    } else {
        let p = p - 2.0;
        0.5 * ((1.0 - p * p).sqrt() + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in [EasingType::Linear, EasingType::InOutCirc] {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [EasingType::Linear, EasingType::InOutCirc] {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_in_out_circ_symmetric() {
        let easing = EasingType::InOutCirc;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        for i in 1..10 {
            let t = i as f64 / 20.0;
            let mirrored = 1.0 - easing.apply(1.0 - t);
            assert!((easing.apply(t) - mirrored).abs() < 1e-12);
        }
        // Slow start
        assert!(easing.apply(0.1) < 0.1);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(EasingType::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingType::InOutCirc.apply(2.0), 1.0);
    }
}
