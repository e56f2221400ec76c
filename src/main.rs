use std::{io::Write, path::PathBuf};

use anyhow::{bail, Context as _};
use clap::Parser;
use hos_planner::{
    callbacks::{dump_json, EventLogCallback, ResultDumpCallback},
    CityTable, EventIdGenerator, PlannerConfig, RandomIds, SequentialIds, TripPlanner,
    TripRequest,
};
use tracing::Level;

/// Plan a truck trip under hours-of-service limits and print the driver's daily logs as JSON.
#[derive(Debug, Parser)]
#[command(name = "hos-planner", version)]
struct Args {
    /// Where the driver is now.
    #[arg(long)]
    current: String,

    #[arg(long)]
    pickup: String,

    #[arg(long)]
    dropoff: String,

    /// Hours already used in the current cycle.
    #[arg(long, default_value_t = 0.0)]
    cycle_used: f64,

    /// Local start time, e.g. 2024-01-15T08:00.
    #[arg(long)]
    start: String,

    /// JSON file overriding limits or log metadata.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV file of extra cities (name,latitude,longitude).
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Seed for event ids, for reproducible output.
    #[arg(long, conflicts_with = "sequential_ids")]
    seed: Option<u64>,

    /// Number events evt-000001, evt-000002, ...
    #[arg(long)]
    sequential_ids: bool,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also keep a copy of each result under this directory.
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Log every event as it is recorded.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match (args.verbose, args.quiet) {
        (true, _) => Level::DEBUG,
        (_, true) => Level::ERROR,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    let cities = match &args.cities {
        Some(path) => CityTable::load_csv(path)?,
        None => CityTable::builtin(),
    };
    let ids: Box<dyn EventIdGenerator> = match (args.seed, args.sequential_ids) {
        (_, true) => Box::new(SequentialIds::default()),
        (Some(seed), false) => Box::new(RandomIds::seeded(seed)),
        (None, false) => Box::new(RandomIds::from_os_rng()),
    };

    let mut planner = TripPlanner::new(cities, config).with_id_generator(ids);
    if args.verbose {
        planner = planner.with_callback(Box::new(EventLogCallback));
    }
    if let Some(dir) = &args.dump_dir {
        planner = planner.with_callback(Box::new(ResultDumpCallback::new(
            dir,
            "trip".to_string(),
        )));
    }

    let request = TripRequest {
        current_location: args.current,
        pickup_location: args.pickup,
        dropoff_location: args.dropoff,
        cycle_used: args.cycle_used,
        start_date_time: args.start,
    };
    let result = planner.plan(&request);

    match &args.output {
        Some(path) => dump_json(path, &result)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &result)?;
            writeln!(stdout).context("unable to write to stdout")?;
        }
    }

    if let Some(err) = result.error {
        bail!("trip planning failed: {err}");
    }
    Ok(())
}
