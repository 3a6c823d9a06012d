use anyhow::{bail, Context, Result};

use roulette_core::{AppConfig, RouletteScroll};

use super::{drive, RunArgs};

/// Parse "t:v,t:v,..." into (time, value) pairs
pub fn parse_samples(text: &str) -> Result<Vec<(f64, f64)>> {
    let samples = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (t, v) = part
                .split_once(':')
                .with_context(|| format!("sample '{}' is not in time:value form", part))?;
            let t: f64 = t
                .trim()
                .parse()
                .with_context(|| format!("invalid time in sample '{}'", part))?;
            let v: f64 = v
                .trim()
                .parse()
                .with_context(|| format!("invalid value in sample '{}'", part))?;
            Ok((t, v))
        })
        .collect::<Result<Vec<_>>>()?;

    if samples.len() < 2 {
        bail!("a drag needs at least two samples");
    }
    Ok(samples)
}

pub async fn run(config: &AppConfig, samples: &str, args: &RunArgs) -> Result<()> {
    let samples = parse_samples(samples)?;
    let mut wheel = RouletteScroll::from_config(config)?;
    wheel.on_coasted_to_stop(|notch| tracing::info!(notch, "Selection made"));

    let (first, rest) = samples.split_first().context("no samples")?;
    let (last, moves) = rest.split_last().context("no release sample")?;

    wheel.start(first.1, first.0);
    for &(t, v) in moves {
        wheel.update(v, t);
    }
    wheel.stop(last.1, last.0);

    if !args.json {
        println!(
            "Released at {} with velocity {} units/s\n",
            wheel.scroll(),
            wheel.velocity()
        );
    }

    drive(config, &mut wheel, args).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_samples() {
        let samples = parse_samples("0:0, 0.05:0.6,0.1:-1.3").unwrap();
        assert_eq!(samples, vec![(0.0, 0.0), (0.05, 0.6), (0.1, -1.3)]);
    }

    #[test]
    fn test_parse_samples_rejects_garbage() {
        assert!(parse_samples("0:0,1").is_err());
        assert!(parse_samples("0:0,x:1").is_err());
        assert!(parse_samples("0:0").is_err());
    }
}
