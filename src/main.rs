//! Gravity Sandbox headless runner
//!
//! Scatters particles, runs the simulation on a fixed-step clock fed with
//! 60 Hz frames, and prints the final snapshot as JSON.
//!
//! Usage: gravity-sandbox [--settings PATH] [--scenario NAME] [--count N]
//!        [--ticks N] [--seed N] [--edge POLICY]

use std::error::Error;

use gravity_sandbox::sim::{EdgePolicy, SimState, TickClock};
use gravity_sandbox::{Scenario, Settings};

const FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Debug)]
struct Args {
    settings: Option<String>,
    scenario: Scenario,
    edge: Option<EdgePolicy>,
    count: usize,
    ticks: u64,
    seed: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            settings: None,
            scenario: Scenario::Directional,
            edge: None,
            count: 50,
            ticks: 1000,
            seed: 42,
        }
    }
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || it.next().ok_or_else(|| format!("{} needs a value", flag));
        match flag.as_str() {
            "--settings" => args.settings = Some(value()?),
            "--scenario" => {
                let name = value()?;
                args.scenario =
                    Scenario::from_str(&name).ok_or_else(|| format!("unknown scenario {}", name))?;
            }
            "--edge" => {
                let name = value()?;
                args.edge = Some(
                    EdgePolicy::from_str(&name)
                        .ok_or_else(|| format!("unknown edge policy {}", name))?,
                );
            }
            "--count" => args.count = value()?.parse()?,
            "--ticks" => args.ticks = value()?.parse()?,
            "--seed" => args.seed = value()?.parse()?,
            other => return Err(format!("unknown argument {}", other).into()),
        }
    }
    Ok(args)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::for_scenario(args.scenario, Default::default()),
    };

    let mut state = SimState::new(settings)?;
    if let Some(edge) = args.edge {
        state.set_edge_policy_for_all(edge);
    }
    state.spawn_scatter(args.count, args.seed)?;

    let mut clock = TickClock::new(state.settings().tick_period())?;
    let mut events = 0usize;
    while state.time_ticks() < args.ticks {
        for _ in 0..clock.advance(FRAME_DT) {
            if state.time_ticks() >= args.ticks {
                clock.stop();
                break;
            }
            state.tick();
        }
        events += state.drain_events().len();
        if state.time_ticks() % 500 == 0 {
            log::debug!("tick {}", state.time_ticks());
        }
    }

    log::info!(
        "Ran {} ticks with {} particles, {} events",
        state.time_ticks(),
        state.len(),
        events
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gravity Sandbox (headless) starting...");
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
