//! Tick drivers for the roulette effect
//!
//! The fixed-step driver advances simulated time by a constant `dt`; the
//! real-time driver paces ticks on a tokio interval and feeds the measured
//! frame time.

use std::time::Duration;

use serde::Serialize;
use tokio::time::{interval, Instant, MissedTickBehavior};

use roulette_core::{RouletteScroll, TickOutcome};

/// One tick of a simulation trace
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub tick: u32,
    /// Simulated seconds since release
    pub time: f64,
    pub scroll: f64,
    pub velocity: f64,
    pub outcome: TickOutcome,
}

/// Outcome of driving the wheel until it stops
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub ticks: Vec<TickRecord>,
    /// Notch the wheel settled on, if it fired the settle event
    pub settled: Option<f64>,
    pub final_scroll: f64,
    /// The tick budget ran out before the wheel stopped
    pub truncated: bool,
}

fn record(wheel: &RouletteScroll, tick: u32, time: f64, outcome: TickOutcome) -> TickRecord {
    TickRecord {
        tick,
        time,
        scroll: wheel.scroll(),
        velocity: wheel.velocity(),
        outcome,
    }
}

fn finish(wheel: &RouletteScroll, ticks: Vec<TickRecord>, truncated: bool) -> Trace {
    let settled = ticks.iter().rev().find_map(|record| match record.outcome {
        TickOutcome::Settled { notch } => Some(notch),
        _ => None,
    });
    Trace {
        ticks,
        settled,
        final_scroll: wheel.scroll(),
        truncated,
    }
}

/// Run with a constant step until the wheel stops or `max_ticks` is reached
pub fn run_fixed(wheel: &mut RouletteScroll, dt: f64, max_ticks: u32) -> Trace {
    let mut ticks = Vec::new();
    let mut time = 0.0;
    let mut tick = 0;

    while wheel.needs_update() && tick < max_ticks {
        let outcome = wheel.update_velocity(dt);
        tick += 1;
        time += dt;
        ticks.push(record(wheel, tick, time, outcome));
    }

    let truncated = wheel.needs_update();
    if truncated {
        tracing::warn!(max_ticks, "Tick budget exhausted before the wheel stopped");
    }
    finish(wheel, ticks, truncated)
}

/// Shortest frame the real-time driver waits for
pub const MIN_FRAME: Duration = Duration::from_millis(1);

/// Run at wall-clock pace, one tick per frame
///
/// Frames shorter than [`MIN_FRAME`] are stretched to it.
pub async fn run_realtime(wheel: &mut RouletteScroll, frame: Duration, max_ticks: u32) -> Trace {
    let mut ticker = interval(frame.max(MIN_FRAME));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = Vec::new();
    let started = Instant::now();
    let mut last = started;
    let mut tick = 0;

    // The first interval tick completes immediately
    ticker.tick().await;
    while wheel.needs_update() && tick < max_ticks {
        let now = ticker.tick().await;
        let dt = now.duration_since(last).as_secs_f64();
        last = now;

        let outcome = wheel.update_velocity(dt);
        tick += 1;
        ticks.push(record(wheel, tick, now.duration_since(started).as_secs_f64(), outcome));
    }

    let truncated = wheel.needs_update();
    if truncated {
        tracing::warn!(max_ticks, "Tick budget exhausted before the wheel stopped");
    }
    finish(wheel, ticks, truncated)
}

/// Print a trace as text or JSON
pub fn print_trace(trace: &Trace, json: bool, verbose: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(trace)?);
        return Ok(());
    }

    for record in &trace.ticks {
        let interesting = !matches!(
            record.outcome,
            TickOutcome::Decayed { .. } | TickOutcome::Animating { .. }
        );
        if verbose || interesting {
            println!(
                "  #{:<5} t={:>7.3}s  scroll={:>10.4}  velocity={:>10.4}  {}",
                record.tick,
                record.time,
                record.scroll,
                record.velocity,
                describe(&record.outcome)
            );
        }
    }

    println!();
    match trace.settled {
        Some(notch) => println!("Settled on {} after {} ticks.", notch, trace.ticks.len()),
        None if trace.truncated => println!(
            "Still moving after {} ticks (scroll = {}).",
            trace.ticks.len(),
            trace.final_scroll
        ),
        None => println!("Came to rest at {}.", trace.final_scroll),
    }
    Ok(())
}

fn describe(outcome: &TickOutcome) -> String {
    match outcome {
        TickOutcome::Skipped => "skipped".to_string(),
        TickOutcome::Idle => "idle".to_string(),
        TickOutcome::Decayed { .. } => "decay".to_string(),
        TickOutcome::Rested { scroll } => format!("rest on {}", scroll),
        TickOutcome::CoastStarted { target, duration } => {
            format!("coast -> {} over {:.3}s", target, duration)
        }
        TickOutcome::PullBackStarted { target, duration } => {
            format!("pull back -> {} over {:.3}s", target, duration)
        }
        TickOutcome::Animating { .. } => "animate".to_string(),
        TickOutcome::Settled { notch } => format!("settled on {}", notch),
    }
}
