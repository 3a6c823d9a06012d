//! Notched kinetic scrolling
//!
//! Simulates a roulette (a notched wheel, like a date picker drum): a scroll
//! value flung by the user decays under friction and then either coasts to the
//! next notch in its direction of travel or is pulled back to the nearest one.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves (linear, circular in-out)
//! - `timing` - Progress and interpolation on explicit elapsed time
//! - `notch` - Notch arithmetic on a periodic grid
//!
//! ## L3 Molecular Layer
//! - `kinetic` - Base kinetic scroll state (position, velocity, touch history)
//! - `animation` - Single-slot tween toward a notch
//! - `effect` - Decay/coast/pull-back policy and settle events
//!
//! # Usage
//!
//! ```ignore
//! use roulette_core::{AppConfig, RouletteScroll};
//!
//! let mut wheel = RouletteScroll::from_config(&AppConfig::default())?;
//! wheel.on_coasted_to_stop(|value| println!("selected {}", value));
//!
//! wheel.start(0.0, 0.0);
//! wheel.update(0.6, 0.05);
//! wheel.stop(1.3, 0.1);
//!
//! // In the frame loop
//! while wheel.needs_update() {
//!     wheel.update_velocity(1.0 / 60.0);
//! }
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod notch;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod effect;
pub mod kinetic;

// Re-exports for convenient access
pub use animation::Animation;
pub use easing::EasingType;
pub use effect::{RouletteScroll, TickOutcome};
pub use kinetic::KineticScroll;
pub use notch::NotchGrid;
