use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::wheel::effect::pull_duration_for;
use crate::wheel::NotchGrid;

/// Highest tick rate honoured by the driver
pub const MAX_FPS: u32 = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Notch layout along the scroll axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Spacing between notches
    #[serde(default = "default_interval")]
    pub interval: f64,
    /// Any valid stopping value; all notches are `anchor + k * interval`
    #[serde(default)]
    pub anchor: f64,
    /// Lower scroll bound (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper scroll bound (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            anchor: 0.0,
            min: None,
            max: None,
        }
    }
}

impl GridConfig {
    /// Bounds as a closed range, with missing ends mapped to infinity
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.min.unwrap_or(f64::NEG_INFINITY),
            self.max.unwrap_or(f64::INFINITY),
        )
    }
}

/// Friction, coasting and pull-back tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Per-tick multiplicative velocity decay (0.0-1.0)
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Fraction of the interval within which coasting to the next notch triggers (0.0-1.0)
    #[serde(default = "default_coasting_alpha")]
    pub coasting_alpha: f64,
    /// Duration of the pull-back animation in seconds
    #[serde(default = "default_pull_duration")]
    pub pull_duration: f64,
    /// Speed below which the value is drawn to the nearest notch instead of the next one
    #[serde(default = "default_pull_back_velocity")]
    pub pull_back_velocity: f64,
    /// Speed at or below which motion counts as stopped
    #[serde(default = "default_min_velocity")]
    pub min_velocity: f64,
    /// Optional coasting threshold; when set, `pull_duration` is derived from it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_velocity: Option<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: default_friction(),
            coasting_alpha: default_coasting_alpha(),
            pull_duration: default_pull_duration(),
            pull_back_velocity: default_pull_back_velocity(),
            min_velocity: default_min_velocity(),
            terminal_velocity: None,
        }
    }
}

impl PhysicsConfig {
    /// Pull duration after applying a configured terminal velocity, if any
    pub fn effective_pull_duration(&self, interval: f64) -> f64 {
        match self.terminal_velocity {
            Some(velocity) => {
                pull_duration_for(self.friction, interval, self.coasting_alpha, velocity)
            }
            None => self.pull_duration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Frames per second for the tick driver
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Upper bound on simulated ticks for a single gesture
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl TickerConfig {
    /// Seconds between ticks, with `fps` capped at [`MAX_FPS`]
    pub fn tick_seconds(&self) -> f64 {
        if self.fps == 0 {
            0.016 // ~60fps fallback
        } else {
            1.0 / self.fps.min(MAX_FPS) as f64
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_interval() -> f64 {
    1.0
}

fn default_friction() -> f64 {
    0.05
}

fn default_coasting_alpha() -> f64 {
    0.5
}

fn default_pull_duration() -> f64 {
    0.2
}

fn default_pull_back_velocity() -> f64 {
    50.0
}

fn default_min_velocity() -> f64 {
    0.5
}

fn default_fps() -> u32 {
    60
}

fn default_max_ticks() -> u32 {
    10_000
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load and validate configuration from a specific path, falling back to defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a specific path without validating it
    ///
    /// Callers that adjust the values afterwards must call [`AppConfig::validate`].
    pub fn read_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/roulette/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("roulette")
            .join("config.toml")
    }

    /// Reject parameters the physics cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let grid = &self.grid;
        if !grid.interval.is_finite() || grid.interval <= 0.0 {
            return Err(crate::Error::InvalidInterval(grid.interval));
        }
        if !grid.anchor.is_finite() {
            return Err(crate::Error::Config(format!(
                "anchor must be finite, got {}",
                grid.anchor
            )));
        }
        let (min, max) = grid.bounds();
        if min.is_nan() || max.is_nan() {
            return Err(crate::Error::Config("min and max must be numbers".to_string()));
        }
        if min > max {
            return Err(crate::Error::Config(format!(
                "min ({}) is greater than max ({})",
                min, max
            )));
        }
        if !NotchGrid::new(grid.interval, grid.anchor)?.has_notch_within(min, max) {
            return Err(crate::Error::Config(format!(
                "no notch lies between min ({}) and max ({})",
                min, max
            )));
        }

        let physics = &self.physics;
        if !(0.0..1.0).contains(&physics.friction) {
            return Err(crate::Error::Config(format!(
                "friction must be in [0, 1), got {}",
                physics.friction
            )));
        }
        if !(0.0..=1.0).contains(&physics.coasting_alpha) {
            return Err(crate::Error::Config(format!(
                "coasting_alpha must be in [0, 1], got {}",
                physics.coasting_alpha
            )));
        }
        if !(physics.pull_duration > 0.0) {
            return Err(crate::Error::Config(format!(
                "pull_duration must be > 0, got {}",
                physics.pull_duration
            )));
        }
        if !(physics.pull_back_velocity >= 0.0) || !(physics.min_velocity >= 0.0) {
            return Err(crate::Error::Config(
                "pull_back_velocity and min_velocity must be >= 0".to_string(),
            ));
        }
        if let Some(velocity) = physics.terminal_velocity {
            if !(velocity > 0.0) || !velocity.is_finite() {
                return Err(crate::Error::Config(format!(
                    "terminal_velocity must be finite and > 0, got {}",
                    velocity
                )));
            }
        }

        Ok(())
    }
}
