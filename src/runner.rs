//! A command-line front end for host binaries.
//!
//! A host crate embeds the simulator by calling [`run_with_args`] from its `main`; the scenario
//! itself comes from a JSON configuration file, and the worker count from the
//! [`SOCNET_NUM_THREADS`](crate::params::NUM_THREADS_ENV) environment variable.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Args, Command, FromArgMatches as _};
use serde::{Deserialize, Serialize};

use crate::error::SocnetError;
use crate::log::{info, set_log_level, LevelFilter};
use crate::params::{worker_count_from_env, ScenarioParams, VaccinePolicy};
use crate::report::write_summary_csv;
use crate::stats::ScenarioSummary;
use crate::{run_baseline, run_with_progressive_vaccine, run_with_vaccine};

/// Default cli arguments for the socnet runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Path to a JSON run configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Optional path for a CSV summary report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable logging at the given level (off, error, warn, info, debug, trace)
    #[arg(short, long)]
    pub log_level: Option<LevelFilter>,
}

/// The file format accepted by `--config`: the scenario parameters plus an optional vaccination
/// section.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RunConfig {
    pub scenario: ScenarioParams,
    #[serde(default)]
    pub vaccine: Option<VaccineConfig>,
}

/// A vaccination section. With a `rollout_horizon` the progressive variant runs; without one,
/// protection is in full effect from day zero.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct VaccineConfig {
    pub vaccinated_share: f64,
    pub vaccine_efficacy: f64,
    #[serde(default)]
    pub rollout_horizon: Option<u32>,
}

impl RunConfig {
    /// Loads a run configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `SocnetError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<RunConfig, SocnetError> {
        let file = File::open(path)?;
        let config: RunConfig = serde_json::from_reader(file)?;
        Ok(config)
    }
}

fn create_socnet_cli() -> Command {
    let cli = Command::new("socnet");
    BaseArgs::augment_args(cli)
}

/// Parses command line arguments and runs the configured scenario.
///
/// # Errors
///
/// Returns an error if argument parsing, configuration loading, or the run fails.
pub fn run_with_args() -> Result<ScenarioSummary, Box<dyn std::error::Error>> {
    let cli = create_socnet_cli();
    let matches = cli.get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    Ok(run(&args)?)
}

/// Runs a scenario from already-parsed arguments. Split out from [`run_with_args`] so hosts and
/// tests can drive it without a process argv.
///
/// # Errors
///
/// Returns a `SocnetError` if the configuration is invalid or the report cannot be written.
pub fn run(args: &BaseArgs) -> Result<ScenarioSummary, SocnetError> {
    if let Some(level) = args.log_level {
        set_log_level(level);
    }

    let config = RunConfig::from_file(&args.config)?;
    let workers = worker_count_from_env();
    info!(
        "loaded configuration from {} ({} workers)",
        args.config.display(),
        workers
    );

    let summary = match config.vaccine {
        None => run_baseline(&config.scenario, args.random_seed, workers)?,
        Some(vaccine) => {
            let policy = VaccinePolicy {
                vaccinated_share: vaccine.vaccinated_share,
                vaccine_efficacy: vaccine.vaccine_efficacy,
            };
            match vaccine.rollout_horizon {
                None => run_with_vaccine(&config.scenario, &policy, args.random_seed, workers)?,
                Some(horizon) => run_with_progressive_vaccine(
                    &config.scenario,
                    &policy,
                    horizon,
                    args.random_seed,
                    workers,
                )?,
            }
        }
    };

    if let Some(output) = &args.output {
        write_summary_csv(output, &summary)?;
        info!("summary written to {}", output.display());
    }

    Ok(summary)
}
