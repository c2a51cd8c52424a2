//! Traffic Drift entry point
//!
//! Headless driver: builds a world, runs it for a fixed number of frames and
//! prints JSON snapshots for whatever draws them.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use traffic_drift::settings::Preset;
use traffic_drift::sim::{World, tick};
use traffic_drift::{SimError, SimSettings};

#[derive(Debug, Parser)]
#[command(name = "traffic-drift", version, about)]
struct Args {
    /// Number of vehicles placed at start.
    #[arg(long, default_value_t = 20)]
    vehicles: usize,
    /// Frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// RNG seed for the run.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Road variant: "open" or "lanes".
    #[arg(long, default_value = "open", value_parser = parse_preset)]
    preset: Preset,
    /// JSON settings file; takes precedence over --preset.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print a snapshot every K frames (0 prints only the summary).
    #[arg(long, value_name = "K", default_value_t = 0)]
    report_every: u64,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_str(s).ok_or_else(|| format!("unknown preset `{s}` (expected open or lanes)"))
}

fn run(args: &Args) -> Result<(), SimError> {
    let settings = match &args.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::from_preset(args.preset),
    };
    log::info!(
        "Running {} frames with {} vehicles ({:?} spawn, {:?} exit)",
        args.frames,
        args.vehicles,
        settings.spawn_mode,
        settings.exit_mode
    );

    let mut world = World::with_vehicles(settings, args.seed, args.vehicles)?;
    for _ in 0..args.frames {
        tick(&mut world);
        if args.report_every > 0 && world.frame() % args.report_every == 0 {
            println!("{}", serde_json::to_string(&world.snapshot())?);
        }
    }

    let summary = serde_json::json!({
        "frames": world.frame(),
        "vehicles": world.vehicles().len(),
        "exited": world.exited(),
        "collisions": world.collision_count(),
    });
    println!("{summary}");
    log::info!("Done: {} collisions", world.collision_count());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Traffic Drift starting (preset {})", args.preset.as_str());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
