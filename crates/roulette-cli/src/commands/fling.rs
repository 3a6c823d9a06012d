use anyhow::Result;

use roulette_core::{AppConfig, RouletteScroll};

use super::{drive, RunArgs};

pub async fn run(config: &AppConfig, from: f64, velocity: f64, args: &RunArgs) -> Result<()> {
    let mut wheel = RouletteScroll::from_config(config)?;
    wheel.on_coasted_to_stop(|notch| tracing::info!(notch, "Selection made"));

    if !args.json {
        println!("Flinging from {} at {} units/s\n", from, velocity);
    }
    wheel.fling(from, velocity)?;

    drive(config, &mut wheel, args).await
}
