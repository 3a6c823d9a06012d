pub mod config;
pub mod error;
pub mod wheel;

pub use config::{AppConfig, GridConfig, PhysicsConfig};
pub use error::{Error, Result};
pub use wheel::{EasingType, NotchGrid, RouletteScroll, TickOutcome};
