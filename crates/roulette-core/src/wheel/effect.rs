//! L3 Molecular Layer: Roulette scroll effect
//!
//! Decides every tick whether a released scroll value keeps decaying under
//! friction, coasts to the next notch ahead, or is pulled back to the nearest
//! notch, and reports when it settles on one.

use std::fmt;

use serde::Serialize;

use super::animation::{Animation, AnimationStep};
use super::easing::EasingType;
use super::kinetic::KineticScroll;
use super::notch::NotchGrid;
use crate::config::{AppConfig, PhysicsConfig};

/// Speed below which coasting to the next notch is attempted
///
/// `exp(friction) * interval * coasting_alpha / pull_duration`
#[inline]
pub fn terminal_velocity(friction: f64, interval: f64, coasting_alpha: f64, pull_duration: f64) -> f64 {
    friction.exp() * interval * coasting_alpha / pull_duration
}

/// Inverse of [`terminal_velocity`]: the pull duration yielding `terminal_velocity`
#[inline]
pub fn pull_duration_for(
    friction: f64,
    interval: f64,
    coasting_alpha: f64,
    terminal_velocity: f64,
) -> f64 {
    friction.exp() * interval * coasting_alpha / terminal_velocity
}

/// What a single call to [`RouletteScroll::update_velocity`] did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickOutcome {
    /// Degenerate `dt`; nothing changed
    Skipped,
    /// No motion pending
    Idle,
    /// Velocity decayed and the value moved freely
    Decayed { scroll: f64, velocity: f64 },
    /// Motion stopped on a notch without needing an animation
    Rested { scroll: f64 },
    /// Coasting toward the next notch in the direction of travel began
    CoastStarted { target: f64, duration: f64 },
    /// Pull-back toward the nearest notch began
    PullBackStarted { target: f64, duration: f64 },
    /// A running animation moved the value
    Animating { scroll: f64 },
    /// The value came to rest on a notch and the settle event fired
    Settled { notch: f64 },
}

type SettleObserver = Box<dyn FnMut(f64)>;

/// Kinetic scroll that snaps onto a periodic grid of notches
pub struct RouletteScroll {
    kinetic: KineticScroll,
    grid: NotchGrid,
    coasting_alpha: f64,
    pull_duration: f64,
    pull_back_velocity: f64,
    min_velocity: f64,
    animation: Animation,
    observers: Vec<SettleObserver>,
    settle_count: u64,
    last_settled: Option<f64>,
}

impl fmt::Debug for RouletteScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouletteScroll")
            .field("kinetic", &self.kinetic)
            .field("grid", &self.grid)
            .field("coasting_alpha", &self.coasting_alpha)
            .field("pull_duration", &self.pull_duration)
            .field("pull_back_velocity", &self.pull_back_velocity)
            .field("min_velocity", &self.min_velocity)
            .field("animation", &self.animation)
            .field("observers", &self.observers.len())
            .field("settle_count", &self.settle_count)
            .finish()
    }
}

impl RouletteScroll {
    /// Build on top of an existing kinetic scroll with default tuning
    ///
    /// The drag threshold of `kinetic` is forced to zero: any movement drags.
    pub fn new(grid: NotchGrid, mut kinetic: KineticScroll) -> Self {
        kinetic.set_drag_threshold(0.0);
        let physics = PhysicsConfig::default();
        Self {
            kinetic,
            grid,
            coasting_alpha: physics.coasting_alpha,
            pull_duration: physics.pull_duration,
            pull_back_velocity: physics.pull_back_velocity,
            min_velocity: physics.min_velocity,
            animation: Animation::Idle,
            observers: Vec::new(),
            settle_count: 0,
            last_settled: None,
        }
    }

    /// Build from application configuration, validating it first
    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        config.validate()?;
        let grid = NotchGrid::from_config(&config.grid)?;
        let (min, max) = config.grid.bounds();
        let physics = &config.physics;
        let kinetic = KineticScroll::new(physics.friction).with_bounds(min, max);

        let mut effect = Self::new(grid, kinetic);
        effect.coasting_alpha = physics.coasting_alpha;
        effect.pull_duration = physics.effective_pull_duration(grid.interval());
        effect.pull_back_velocity = physics.pull_back_velocity;
        effect.min_velocity = physics.min_velocity;
        Ok(effect)
    }

    #[inline]
    pub fn grid(&self) -> &NotchGrid {
        &self.grid
    }

    #[inline]
    pub fn kinetic(&self) -> &KineticScroll {
        &self.kinetic
    }

    #[inline]
    pub fn scroll(&self) -> f64 {
        self.kinetic.scroll()
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.kinetic.velocity()
    }

    pub fn coasting_alpha(&self) -> f64 {
        self.coasting_alpha
    }

    pub fn set_coasting_alpha(&mut self, alpha: f64) {
        self.coasting_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn pull_duration(&self) -> f64 {
        self.pull_duration
    }

    pub fn set_pull_duration(&mut self, duration: f64) -> crate::Result<()> {
        if !(duration > 0.0) {
            return Err(crate::Error::Config(format!(
                "pull_duration must be > 0, got {}",
                duration
            )));
        }
        self.pull_duration = duration;
        Ok(())
    }

    pub fn pull_back_velocity(&self) -> f64 {
        self.pull_back_velocity
    }

    pub fn set_pull_back_velocity(&mut self, velocity: f64) {
        self.pull_back_velocity = velocity.max(0.0);
    }

    pub fn set_min_velocity(&mut self, velocity: f64) {
        self.min_velocity = velocity.max(0.0);
    }

    /// Current coasting threshold, derived from friction, interval, alpha and pull duration
    pub fn terminal_velocity(&self) -> f64 {
        terminal_velocity(
            self.kinetic.friction(),
            self.grid.interval(),
            self.coasting_alpha,
            self.pull_duration,
        )
    }

    /// Set the coasting threshold by solving for the pull duration
    pub fn set_terminal_velocity(&mut self, velocity: f64) -> crate::Result<()> {
        if !(velocity > 0.0) || !velocity.is_finite() {
            return Err(crate::Error::Config(format!(
                "terminal_velocity must be finite and > 0, got {}",
                velocity
            )));
        }
        self.pull_duration = pull_duration_for(
            self.kinetic.friction(),
            self.grid.interval(),
            self.coasting_alpha,
            velocity,
        );
        Ok(())
    }

    /// Register a callback fired with the final value each time the wheel settles
    pub fn on_coasted_to_stop<F>(&mut self, observer: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Number of settle events fired so far
    #[inline]
    pub fn settle_count(&self) -> u64 {
        self.settle_count
    }

    #[inline]
    pub fn last_settled(&self) -> Option<f64> {
        self.last_settled
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Check if the tick driver should keep calling [`RouletteScroll::update_velocity`]
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_active() || self.kinetic.velocity_update_requested()
    }

    /// Cancel any running notch animation without settling
    pub fn cancel_all(&mut self) {
        if self.animation.cancel() {
            tracing::debug!(scroll = self.scroll(), "Cancelled notch animation");
        }
    }

    /// Begin a touch gesture; a running animation is dropped first
    pub fn start(&mut self, val: f64, t: f64) {
        self.cancel_all();
        self.kinetic.start(val, t);
    }

    /// Feed a touch move
    pub fn update(&mut self, val: f64, t: f64) {
        self.kinetic.update(val, t);
    }

    /// Release the touch; the wheel keeps moving with the estimated velocity
    pub fn stop(&mut self, val: f64, t: f64) {
        self.kinetic.stop(val, t);
    }

    /// Release the wheel at `scroll` with `velocity`, bypassing touch tracking
    ///
    /// A held touch is ended first. Non-finite input is rejected and leaves
    /// the wheel untouched.
    pub fn fling(&mut self, scroll: f64, velocity: f64) -> crate::Result<()> {
        if !scroll.is_finite() || !velocity.is_finite() {
            return Err(crate::Error::InvalidMotion { scroll, velocity });
        }
        self.cancel_all();
        self.kinetic.release();
        self.kinetic.set_scroll(scroll);
        self.kinetic.set_velocity(velocity);
        self.kinetic.trigger_velocity_update();
        tracing::debug!(scroll = self.scroll(), velocity, "Fling");
        Ok(())
    }

    /// Advance the wheel by `dt` seconds
    ///
    /// A running animation is advanced first. Otherwise, when motion is
    /// pending, the first matching branch wins:
    /// 1. coast to the next notch ahead when the speed lies between the
    ///    pull-back velocity and the terminal velocity and that notch is
    ///    within `coasting_alpha` intervals;
    /// 2. pull back to the nearest notch when slow and off the grid;
    /// 3. rest when stopped on a notch;
    /// 4. decay velocity by friction and move.
    pub fn update_velocity(&mut self, dt: f64) -> TickOutcome {
        if !(dt > 0.0) || !dt.is_finite() {
            return TickOutcome::Skipped;
        }

        match self.animation.advance(dt) {
            AnimationStep::Running(scroll) => {
                self.kinetic.set_scroll(scroll);
                tracing::trace!(scroll = self.scroll(), "Animating");
                return TickOutcome::Animating {
                    scroll: self.scroll(),
                };
            }
            AnimationStep::Finished(notch) => {
                self.kinetic.set_scroll(notch);
                return self.settle();
            }
            AnimationStep::Idle => {}
        }

        if self.kinetic.is_manual() || !self.kinetic.velocity_update_requested() {
            return TickOutcome::Idle;
        }

        let scroll = self.scroll();
        let velocity = self.velocity();
        let speed = velocity.abs();

        if self.pull_back_velocity < speed && speed < self.terminal_velocity() {
            if let Some(next) = self
                .grid
                .near_next_notch(scroll, velocity, self.coasting_alpha)
            {
                let target = self.bounded_notch(next);
                let duration = ((target - scroll) / velocity).abs();
                if !(duration > 0.0) {
                    self.kinetic.set_scroll(target);
                    return self.settle();
                }
                tracing::debug!(scroll, velocity, target, duration, "Coasting to next notch");
                self.animation
                    .start_to(scroll, target, duration, EasingType::Linear);
                return TickOutcome::CoastStarted { target, duration };
            }
        }

        let stopped = speed <= self.min_velocity;
        if (speed < self.pull_back_velocity || stopped) && !self.grid.is_on_notch(scroll) {
            let target = self.bounded_notch(self.grid.nearest_notch(scroll));
            let duration = self.pull_duration;
            tracing::debug!(scroll, velocity, target, duration, "Pulling back to nearest notch");
            self.animation
                .start_to(scroll, target, duration, EasingType::InOutCirc);
            return TickOutcome::PullBackStarted { target, duration };
        }

        if stopped {
            self.kinetic.set_velocity(0.0);
            self.kinetic.cancel_velocity_update();
            tracing::debug!(scroll, "Resting on notch");
            return TickOutcome::Rested { scroll };
        }

        let velocity = velocity - velocity * self.kinetic.friction();
        self.kinetic.set_velocity(velocity);
        let scroll = self.kinetic.apply_distance(velocity * dt);
        self.kinetic.trigger_velocity_update();
        tracing::trace!(scroll, velocity, "Decayed");
        TickOutcome::Decayed { scroll, velocity }
    }

    fn bounded_notch(&self, notch: f64) -> f64 {
        let (min, max) = self.kinetic.bounds();
        self.grid.clamp_notch(notch, min, max)
    }

    fn settle(&mut self) -> TickOutcome {
        let notch = self.scroll();
        self.kinetic.set_velocity(0.0);
        self.kinetic.cancel_velocity_update();

        // Bounds without a notch inside: stop at the bound, but make no selection
        if self.grid.near_notch(notch, 1e-9).is_none() {
            tracing::warn!(scroll = notch, "Stopped between notches at a bound");
            return TickOutcome::Rested { scroll: notch };
        }

        self.settle_count += 1;
        self.last_settled = Some(notch);
        tracing::debug!(notch, settle_count = self.settle_count, "Coasted to stop");

        for observer in self.observers.iter_mut() {
            observer(notch);
        }
        TickOutcome::Settled { notch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f64 = 1.0 / 60.0;

    /// interval=1, anchor=0, coasting_alpha=0.5, pull_back_velocity=10,
    /// pull_duration=0.2, friction=0.1
    fn wheel() -> RouletteScroll {
        let mut config = AppConfig::default();
        config.physics.friction = 0.1;
        config.physics.pull_back_velocity = 10.0;
        config.physics.min_velocity = 0.0;
        RouletteScroll::from_config(&config).unwrap()
    }

    fn recorder(wheel: &mut RouletteScroll) -> Rc<RefCell<Vec<f64>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        wheel.on_coasted_to_stop(move |value| sink.borrow_mut().push(value));
        events
    }

    fn run_until_idle(wheel: &mut RouletteScroll, dt: f64) -> usize {
        let mut ticks = 0;
        while wheel.needs_update() {
            wheel.update_velocity(dt);
            ticks += 1;
            assert!(ticks < 100_000, "wheel never settled");
        }
        ticks
    }

    #[test]
    fn test_terminal_velocity_formula() {
        let wheel = wheel();
        let expected = 0.1_f64.exp() * 1.0 * 0.5 / 0.2;
        assert!((wheel.terminal_velocity() - expected).abs() < 1e-12);
        assert!((wheel.terminal_velocity() - 2.763).abs() < 1e-3);
    }

    #[test]
    fn test_set_terminal_velocity_back_solves_duration() {
        let mut wheel = wheel();
        wheel.set_terminal_velocity(5.0).unwrap();
        assert!((wheel.terminal_velocity() - 5.0).abs() < 1e-12);
        assert!((wheel.pull_duration() - 0.1_f64.exp() * 0.5 / 5.0).abs() < 1e-12);
        assert!(wheel.set_terminal_velocity(0.0).is_err());
        assert!(wheel.set_pull_duration(-1.0).is_err());
    }

    #[test]
    fn test_drag_threshold_forced_to_zero() {
        let wheel = RouletteScroll::new(NotchGrid::new(1.0, 0.0).unwrap(), KineticScroll::default());
        assert_eq!(wheel.kinetic().drag_threshold(), 0.0);
    }

    #[test]
    fn test_from_config_rejects_bad_interval() {
        let mut config = AppConfig::default();
        config.grid.interval = 0.0;
        assert!(matches!(
            RouletteScroll::from_config(&config),
            Err(crate::Error::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_fast_fling_decays_freely() {
        let mut wheel = wheel();
        wheel.fling(4.7, 15.0).unwrap();
        let outcome = wheel.update_velocity(0.1);
        match outcome {
            TickOutcome::Decayed { scroll, velocity } => {
                assert!((velocity - 13.5).abs() < 1e-12);
                assert!((scroll - 6.05).abs() < 1e-12);
            }
            other => panic!("expected free decay, got {:?}", other),
        }
        assert!(wheel.needs_update());
        assert!(!wheel.is_animating());
    }

    #[test]
    fn test_slow_fling_pulls_back_to_nearest() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.fling(4.7, 1.0).unwrap();

        assert_eq!(
            wheel.update_velocity(DT),
            TickOutcome::PullBackStarted {
                target: 5.0,
                duration: 0.2
            }
        );
        assert_eq!(wheel.animation().easing(), Some(EasingType::InOutCirc));

        run_until_idle(&mut wheel, DT);
        assert_eq!(wheel.scroll(), 5.0);
        assert_eq!(wheel.velocity(), 0.0);
        assert_eq!(*events.borrow(), vec![5.0]);
    }

    #[test]
    fn test_pull_back_ignores_direction() {
        let mut wheel = wheel();
        wheel.fling(4.3, 1.0).unwrap();
        assert!(matches!(
            wheel.update_velocity(DT),
            TickOutcome::PullBackStarted { target, .. } if target == 4.0
        ));
    }

    #[test]
    fn test_moderate_fling_coasts_to_next_notch() {
        let mut wheel = wheel();
        wheel.set_pull_back_velocity(1.0);
        let events = recorder(&mut wheel);
        wheel.fling(4.7, 2.0).unwrap();

        match wheel.update_velocity(DT) {
            TickOutcome::CoastStarted { target, duration } => {
                assert_eq!(target, 5.0);
                assert!((duration - 0.15).abs() < 1e-9);
            }
            other => panic!("expected coasting, got {:?}", other),
        }
        assert_eq!(wheel.animation().easing(), Some(EasingType::Linear));

        let mut previous = wheel.scroll();
        while wheel.needs_update() {
            wheel.update_velocity(DT);
            assert!(wheel.scroll() >= previous);
            previous = wheel.scroll();
        }
        assert_eq!(wheel.scroll(), 5.0);
        assert_eq!(*events.borrow(), vec![5.0]);
    }

    #[test]
    fn test_coast_backwards() {
        let mut wheel = wheel();
        wheel.set_pull_back_velocity(1.0);
        wheel.fling(4.3, -2.0).unwrap();
        assert!(matches!(
            wheel.update_velocity(DT),
            TickOutcome::CoastStarted { target, .. } if target == 4.0
        ));
        run_until_idle(&mut wheel, DT);
        assert_eq!(wheel.scroll(), 4.0);
    }

    #[test]
    fn test_coast_from_notch_settles_immediately() {
        let mut wheel = wheel();
        wheel.set_pull_back_velocity(1.0);
        let events = recorder(&mut wheel);
        wheel.fling(5.0, 2.0).unwrap();
        assert_eq!(wheel.update_velocity(DT), TickOutcome::Settled { notch: 5.0 });
        assert!(!wheel.needs_update());
        assert_eq!(*events.borrow(), vec![5.0]);
    }

    #[test]
    fn test_resting_on_notch_stays_idle() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.fling(5.0, 0.0).unwrap();
        assert_eq!(wheel.update_velocity(DT), TickOutcome::Rested { scroll: 5.0 });
        assert!(!wheel.is_animating());
        assert!(!wheel.needs_update());
        assert_eq!(wheel.update_velocity(DT), TickOutcome::Idle);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_zero_velocity_off_notch_pulls_back() {
        let mut wheel = wheel();
        wheel.set_pull_back_velocity(0.0);
        wheel.fling(2.2, 0.0).unwrap();
        assert!(matches!(
            wheel.update_velocity(DT),
            TickOutcome::PullBackStarted { target, .. } if target == 2.0
        ));
    }

    #[test]
    fn test_degenerate_dt_is_noop() {
        let mut wheel = wheel();
        wheel.fling(4.7, 15.0).unwrap();
        assert_eq!(wheel.update_velocity(0.0), TickOutcome::Skipped);
        assert_eq!(wheel.update_velocity(-0.1), TickOutcome::Skipped);
        assert_eq!(wheel.update_velocity(f64::NAN), TickOutcome::Skipped);
        assert_eq!(wheel.scroll(), 4.7);
        assert_eq!(wheel.velocity(), 15.0);
    }

    #[test]
    fn test_free_decay_clamps_to_bounds() {
        let mut config = AppConfig::default();
        config.grid.min = Some(0.0);
        config.grid.max = Some(10.0);
        config.physics.friction = 0.1;
        config.physics.pull_back_velocity = 10.0;
        let mut wheel = RouletteScroll::from_config(&config).unwrap();

        wheel.fling(9.9, 100.0).unwrap();
        assert_eq!(
            wheel.update_velocity(0.1),
            TickOutcome::Decayed {
                scroll: 10.0,
                velocity: 90.0
            }
        );
        run_until_idle(&mut wheel, 0.1);
        assert_eq!(wheel.scroll(), 10.0);
        assert_eq!(wheel.velocity(), 0.0);
    }

    #[test]
    fn test_pull_back_target_stays_in_bounds() {
        let mut config = AppConfig::default();
        config.grid.max = Some(9.6);
        let mut wheel = RouletteScroll::from_config(&config).unwrap();
        wheel.fling(9.6, 1.0).unwrap();
        assert!(matches!(
            wheel.update_velocity(DT),
            TickOutcome::PullBackStarted { target, .. } if target == 9.0
        ));
    }

    #[test]
    fn test_decay_converges_without_sign_flip() {
        let mut wheel = wheel();
        wheel.set_pull_back_velocity(0.0);
        wheel.set_coasting_alpha(0.0);
        wheel.fling(0.3, -40.0).unwrap();

        let mut previous = wheel.velocity().abs();
        for _ in 0..200 {
            match wheel.update_velocity(DT) {
                TickOutcome::Decayed { velocity, .. } => {
                    assert!(velocity < 0.0);
                    assert!(velocity.abs() < previous);
                    previous = velocity.abs();
                }
                other => panic!("expected free decay, got {:?}", other),
            }
        }
        assert!(previous < 1e-6);
    }

    #[test]
    fn test_start_cancels_animation_silently() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.fling(4.7, 1.0).unwrap();
        wheel.update_velocity(DT);
        wheel.update_velocity(DT);
        assert!(wheel.is_animating());
        let interrupted_at = wheel.scroll();

        wheel.start(200.0, 1.0);
        assert!(!wheel.is_animating());
        assert_eq!(wheel.update_velocity(DT), TickOutcome::Idle);
        assert_eq!(wheel.scroll(), interrupted_at);
        assert!(events.borrow().is_empty());
        assert_eq!(wheel.settle_count(), 0);
    }

    #[test]
    fn test_fling_replaces_running_animation() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.fling(4.7, 1.0).unwrap();
        wheel.update_velocity(DT);
        assert_eq!(wheel.animation().target(), Some(5.0));

        wheel.fling(7.2, 1.0).unwrap();
        assert!(!wheel.is_animating());
        wheel.update_velocity(DT);
        assert_eq!(wheel.animation().target(), Some(7.0));
        run_until_idle(&mut wheel, DT);
        assert_eq!(*events.borrow(), vec![7.0]);
    }

    #[test]
    fn test_settle_is_terminal() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.fling(4.7, 15.0).unwrap();
        run_until_idle(&mut wheel, DT);

        let settled = wheel.scroll();
        assert!((settled - wheel.grid().nearest_notch(settled)).abs() < 1e-9);
        assert_eq!(wheel.velocity(), 0.0);
        assert_eq!(wheel.last_settled(), Some(settled));
        assert_eq!(events.borrow().len(), 1);

        for _ in 0..10 {
            assert_eq!(wheel.update_velocity(DT), TickOutcome::Idle);
        }
        assert_eq!(wheel.scroll(), settled);
        assert_eq!(wheel.settle_count(), 1);
    }

    #[test]
    fn test_drag_and_release() {
        let mut wheel = RouletteScroll::from_config(&AppConfig::default()).unwrap();
        let events = recorder(&mut wheel);

        wheel.start(0.0, 0.0);
        wheel.update(0.6, 0.05);
        assert!(!wheel.needs_update());
        assert_eq!(wheel.update_velocity(DT), TickOutcome::Idle);
        wheel.stop(1.3, 0.1);
        assert!((wheel.velocity() - 13.0).abs() < 1e-9);

        run_until_idle(&mut wheel, DT);
        assert_eq!(wheel.scroll(), 1.0);
        assert_eq!(*events.borrow(), vec![1.0]);
    }

    #[test]
    fn test_fling_ends_held_touch() {
        let mut wheel = wheel();
        let events = recorder(&mut wheel);
        wheel.start(0.0, 0.0);
        wheel.fling(4.7, 1.0).unwrap();
        assert!(!wheel.kinetic().is_manual());

        let ticks = run_until_idle(&mut wheel, DT);
        assert!(ticks < 100);
        assert_eq!(wheel.scroll(), 5.0);
        assert_eq!(*events.borrow(), vec![5.0]);
    }

    #[test]
    fn test_fling_rejects_non_finite() {
        let mut wheel = wheel();
        for (scroll, velocity) in [
            (1.2, f64::INFINITY),
            (1.2, f64::NAN),
            (f64::NEG_INFINITY, 1.0),
        ] {
            assert!(matches!(
                wheel.fling(scroll, velocity),
                Err(crate::Error::InvalidMotion { .. })
            ));
        }
        assert_eq!(wheel.scroll(), 0.0);
        assert_eq!(wheel.velocity(), 0.0);
        assert!(!wheel.needs_update());
    }

    #[test]
    fn test_no_selection_between_notches_at_bounds() {
        let grid = NotchGrid::new(1.0, 0.0).unwrap();
        let kinetic = KineticScroll::new(0.1).with_bounds(0.2, 0.8);
        let mut wheel = RouletteScroll::new(grid, kinetic);
        let events = recorder(&mut wheel);

        wheel.fling(0.5, 1.0).unwrap();
        run_until_idle(&mut wheel, DT);

        assert_eq!(wheel.scroll(), 0.2);
        assert_eq!(wheel.velocity(), 0.0);
        assert_eq!(wheel.settle_count(), 0);
        assert_eq!(wheel.last_settled(), None);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_multiple_observers() {
        let mut wheel = wheel();
        let first = recorder(&mut wheel);
        let second = recorder(&mut wheel);
        wheel.fling(-2.4, -3.0).unwrap();
        run_until_idle(&mut wheel, DT);
        assert_eq!(*first.borrow(), vec![-2.0]);
        assert_eq!(*second.borrow(), vec![-2.0]);
    }
}
