use anyhow::Result;

use roulette_core::{AppConfig, NotchGrid};

pub fn run(config: &AppConfig, value: f64, velocity: f64) -> Result<()> {
    let grid = NotchGrid::from_config(&config.grid)?;
    let alpha = config.physics.coasting_alpha;

    println!("Value: {}", value);
    println!("  Interval: {}  Anchor: {}", grid.interval(), grid.anchor());
    println!("  On notch: {}", grid.is_on_notch(value));
    println!("  Nearest notch: {}", grid.nearest_notch(value));
    println!(
        "  Next notch (velocity {}): {}",
        velocity,
        grid.next_notch(value, velocity)
    );

    match grid.near_next_notch(value, velocity, alpha) {
        Some(notch) => println!("  Within coasting range ({}) of {}", alpha, notch),
        None => println!("  Outside coasting range ({})", alpha),
    }

    Ok(())
}
