use std::path::Path;

use anyhow::{bail, Result};

use roulette_core::{wheel::effect::terminal_velocity, AppConfig};

/// Print the effective configuration with derived values
pub fn show(config: &AppConfig) -> Result<()> {
    println!("{}", toml::to_string_pretty(config)?);

    let physics = &config.physics;
    let pull_duration = physics.effective_pull_duration(config.grid.interval);
    println!("# derived");
    println!("# pull_duration = {}", pull_duration);
    println!(
        "# terminal_velocity = {}",
        terminal_velocity(
            physics.friction,
            config.grid.interval,
            physics.coasting_alpha,
            pull_duration
        )
    );
    Ok(())
}

pub fn path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

/// Write the effective configuration to disk
pub fn init(config: &AppConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    config.save_to(path)?;
    tracing::info!(path = %path.display(), "Wrote configuration");
    println!("Configuration written to {}", path.display());
    Ok(())
}
