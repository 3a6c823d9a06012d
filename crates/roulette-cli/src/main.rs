use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roulette_core::AppConfig;

mod commands;
mod driver;

#[derive(Parser)]
#[command(name = "roulette")]
#[command(author, version, about = "Simulate a notched roulette scroll wheel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file (defaults to ~/.config/roulette/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

/// Command-line overrides applied on top of the configuration file
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Spacing between notches
    #[arg(long, global = true)]
    interval: Option<f64>,
    /// Any notch value
    #[arg(long, global = true, allow_hyphen_values = true)]
    anchor: Option<f64>,
    /// Lower scroll bound
    #[arg(long, global = true, allow_hyphen_values = true)]
    min: Option<f64>,
    /// Upper scroll bound
    #[arg(long, global = true, allow_hyphen_values = true)]
    max: Option<f64>,
    /// Per-tick velocity decay (0.0-1.0)
    #[arg(long, global = true)]
    friction: Option<f64>,
    /// Speed below which the wheel is pulled to the nearest notch
    #[arg(long, global = true)]
    pull_back_velocity: Option<f64>,
    /// Coasting threshold; derives the pull duration
    #[arg(long, global = true)]
    terminal_velocity: Option<f64>,
}

impl Overrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(interval) = self.interval {
            config.grid.interval = interval;
        }
        if let Some(anchor) = self.anchor {
            config.grid.anchor = anchor;
        }
        if self.min.is_some() {
            config.grid.min = self.min;
        }
        if self.max.is_some() {
            config.grid.max = self.max;
        }
        if let Some(friction) = self.friction {
            config.physics.friction = friction;
        }
        if let Some(velocity) = self.pull_back_velocity {
            config.physics.pull_back_velocity = velocity;
        }
        if self.terminal_velocity.is_some() {
            config.physics.terminal_velocity = self.terminal_velocity;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Release the wheel at a position with a given velocity
    Fling {
        /// Starting scroll value
        #[arg(short = 'f', long, allow_hyphen_values = true)]
        from: f64,
        /// Release velocity in units per second
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        velocity: f64,
        #[command(flatten)]
        run: commands::RunArgs,
    },
    /// Replay touch samples (time:value pairs) as a drag, then release
    Drag {
        /// Comma-separated samples, e.g. "0:0,0.05:0.6,0.1:1.3"
        #[arg(short = 's', long, allow_hyphen_values = true)]
        samples: String,
        #[command(flatten)]
        run: commands::RunArgs,
    },
    /// Show notch information for a value
    Notch {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Direction of travel for the next notch
        #[arg(short = 'v', long, default_value_t = 0.0, allow_hyphen_values = true)]
        velocity: f64,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the effective configuration to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::read_from(&config_path)?;
    cli.overrides.apply(&mut config);
    config.validate()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Fling {
            from,
            velocity,
            run,
        } => commands::fling::run(&config, from, velocity, &run).await,
        Commands::Drag { samples, run } => commands::drag::run(&config, &samples, &run).await,
        Commands::Notch { value, velocity } => commands::notch::run(&config, value, velocity),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Init { force } => commands::config::init(&config, &config_path, force),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        let overrides = Overrides {
            interval: Some(30.0),
            max: Some(300.0),
            terminal_velocity: Some(4.0),
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.grid.interval, 30.0);
        assert_eq!(config.grid.max, Some(300.0));
        assert_eq!(config.grid.min, None);
        assert_eq!(config.physics.terminal_velocity, Some(4.0));
        assert_eq!(config.physics.friction, 0.05);
    }

    #[test]
    fn test_overrides_fix_invalid_file() {
        let dir = std::env::temp_dir().join(format!("roulette-cli-overrides-{}", std::process::id()));
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[grid]\ninterval = 0.0\n").unwrap();

        let mut config = AppConfig::read_from(&path).unwrap();
        let overrides = Overrides {
            interval: Some(2.0),
            ..Default::default()
        };
        overrides.apply(&mut config);
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.interval, 2.0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cli_parses_fling() {
        let cli = Cli::try_parse_from([
            "roulette", "fling", "--from", "4.7", "--velocity", "-15", "--interval", "0.5",
        ])
        .unwrap();
        assert_eq!(cli.overrides.interval, Some(0.5));
        match cli.command {
            Commands::Fling { from, velocity, .. } => {
                assert_eq!(from, 4.7);
                assert_eq!(velocity, -15.0);
            }
            _ => panic!("expected fling"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
