//! Headless demo: runs an encounter for a number of ticks and logs a summary.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hostile::{init_logging, Scenario};
use log::{error, info};

/// Enemy AI skirmish simulator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file; the built-in skirmish is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Number of fixed steps to simulate
    #[arg(short, long, default_value_t = 500)]
    ticks: u32,
    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::skirmish(),
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    let mut world = scenario.build_world()?;

    let mut volleys = 0_u64;
    for _ in 0..args.ticks {
        let report = world.tick(scenario.dt);
        if !report.fire_requests.is_empty() {
            volleys += 1;
        }
    }

    info!(
        "simulated {} ticks ({:.2}s), {volleys} ticks with fire",
        world.tick_count(),
        world.time()
    );
    for id in world.ids() {
        let (Some(agent), Some(body)) = (world.agent(*id), world.body(*id)) else {
            continue;
        };
        let status = agent
            .fault()
            .map_or_else(|| "active".to_owned(), |fault| format!("inert: {fault}"));
        info!(
            "{id} {:<8} at ({:>7.2}, {:>7.2}) fired {:>4} [{status}]",
            agent.name(),
            body.position.x,
            body.position.y,
            world.shots_fired(*id).unwrap_or_default()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
