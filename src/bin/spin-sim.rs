//! Run many full spins against a simulated 60 fps clock and report how often
//! each option won versus its configured probability.
//!
//! Usage: `spin-sim [trials] [seed] [config.json]`

use std::collections::HashMap;
use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use prize_wheel::animator::ManualScheduler;
use prize_wheel::config::WheelConfig;
use prize_wheel::rng::WheelRng;
use prize_wheel::wheel::Wheel;
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = env::args().skip(1);
    let trials: usize = match args.next() {
        Some(s) => s.parse::<usize>().with_context(|| format!("invalid trial count {s:?}"))?,
        None => 10_000,
    };
    let rng = match args.next() {
        Some(s) => WheelRng::from_seed(s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?),
        None => WheelRng::new(),
    };
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            WheelConfig::from_json(&text)?
        }
        None => WheelConfig::default(),
    };

    tracing::info!(trials, options = config.options.len(), "starting simulation");

    let mut wheel = Wheel::new(config.wheel_options()?, config.spin, ManualScheduler::new(), rng.into_source())?;
    let mut wins: HashMap<usize, usize> = HashMap::new();
    let mut celebrations: HashMap<&'static str, usize> = HashMap::new();
    let mut now = 0.0;

    for trial in 0..trials {
        let winner = wheel.request_spin(now)?;

        let mut landed = None;
        while wheel.animator_mut().scheduler_mut().take_pending().is_some() {
            now += FRAME_MS;
            if let Some(result) = wheel.tick(now).result {
                landed = Some(result);
                break;
            }
        }

        let Some(result) = landed else {
            bail!("trial {trial}: animation stopped without landing");
        };
        if result.index != winner {
            bail!("trial {trial}: selected {winner} but landed on {}", result.index);
        }

        *wins.entry(result.index).or_default() += 1;
        *celebrations.entry(config.celebration.headline_for(&result.option)).or_default() += 1;
    }

    let options = wheel.options();
    println!("{:<28} {:>10} {:>10} {:>10}", "option", "wins", "observed", "expected");
    for (i, opt) in options.iter().enumerate() {
        let count = wins.get(&i).copied().unwrap_or(0);
        let observed = count as f64 / trials.max(1) as f64;
        let expected = options.probability(i).unwrap_or(0.0);
        println!("{:<28} {:>10} {:>9.3}% {:>9.3}%", opt.label, count, observed * 100.0, expected * 100.0);
    }
    for (headline, count) in &celebrations {
        println!("{headline}: {count}");
    }
    println!("all {trials} spins landed on their selected slice");

    Ok(())
}
