pub mod config;
pub mod drag;
pub mod fling;
pub mod notch;

use std::time::Duration;

use anyhow::Result;
use clap::Args;

use roulette_core::{AppConfig, RouletteScroll};

use crate::driver::{print_trace, run_fixed, run_realtime};

/// Options shared by commands that run a simulation
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Frames per second (defaults to ticker.fps from the configuration)
    #[arg(long)]
    pub fps: Option<u32>,
    /// Give up after this many ticks (defaults to ticker.max_ticks)
    #[arg(long)]
    pub max_ticks: Option<u32>,
    /// Pace ticks on the wall clock instead of simulating time
    #[arg(long)]
    pub realtime: bool,
    /// Print the full trace as JSON
    #[arg(long)]
    pub json: bool,
    /// Print every tick, not only decisions
    #[arg(long)]
    pub verbose: bool,
}

/// Drive a released wheel to rest and print what happened
pub async fn drive(config: &AppConfig, wheel: &mut RouletteScroll, args: &RunArgs) -> Result<()> {
    let mut ticker = config.ticker.clone();
    if let Some(fps) = args.fps {
        ticker.fps = fps;
    }
    let max_ticks = args.max_ticks.unwrap_or(ticker.max_ticks);
    let dt = ticker.tick_seconds();

    tracing::info!(
        scroll = wheel.scroll(),
        velocity = wheel.velocity(),
        terminal_velocity = wheel.terminal_velocity(),
        pull_duration = wheel.pull_duration(),
        dt,
        "Driving wheel"
    );

    let trace = if args.realtime {
        run_realtime(wheel, Duration::from_secs_f64(dt), max_ticks).await
    } else {
        run_fixed(wheel, dt, max_ticks)
    };

    print_trace(&trace, args.json, args.verbose)
}
