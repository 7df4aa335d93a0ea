//! Scene metrics command-line entry point.
//!
//! Evaluates coverage quality and perceived noise for every agent of one or
//! more scene snapshots using:
//! - **bevy_ecs** for the entity-component-system world the snapshot lives in
//! - **configparser** for the INI file holding the emission parameters
//!
//! # Flow
//!
//! 1. Load `config.ini` (defaults are used when it is missing)
//! 2. Load the scene file: one snapshot or a trace of snapshots
//! 3. For each snapshot: spawn its agents, run the metric schedule once and
//!    print the report as one JSON document on stdout
//! 4. Exit with status 1 if any snapshot or metric failed
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scene scene.json --config config.ini
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use scenemetrics::evaluation::{evaluate_snapshot, metrics_schedule, new_world};
use scenemetrics::metrics::coverage::CoveragePolicy;
use scenemetrics::resources::failures::MetricFailures;
use scenemetrics::resources::metricsconfig::MetricsConfig;
use scenemetrics::scene::SceneSnapshot;

/// Coverage quality and perceived noise for scene snapshots.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Scene snapshot (or trace of snapshots) as JSON.
    #[arg(long, value_name = "PATH")]
    scene: PathBuf,

    /// INI file with acoustic and coverage parameters.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Override the coverage combination policy (worst_case, mean, best_case).
    #[arg(long)]
    policy: Option<CoveragePolicy>,

    /// Pretty-print the JSON reports.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = MetricsConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using default parameters", e);
    }
    if let Some(policy) = cli.policy {
        config.coverage_policy = policy;
    }

    let snapshots = match SceneSnapshot::load_from_file(&cli.scene) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            log::error!("Failed to load scene {}: {}", cli.scene.display(), e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Loaded {} snapshot(s) from {}",
        snapshots.len(),
        cli.scene.display()
    );

    let mut world = new_world(config);
    let mut schedule = metrics_schedule();
    let mut ok = true;

    for snapshot in &snapshots {
        let report = match evaluate_snapshot(&mut world, &mut schedule, snapshot) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Snapshot at step {} rejected: {}", snapshot.step, e);
                ok = false;
                continue;
            }
        };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize report for step {}: {}", report.step, e);
                ok = false;
            }
        }
    }

    if !world.resource::<MetricFailures>().is_empty() {
        ok = false;
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
