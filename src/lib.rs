//! A stochastic, individual-based epidemic simulator with parallel Monte Carlo aggregation
//!
//! Socnet simulates the spread of an infectious disease through a finite, fully-mixed
//! population at day granularity, then aggregates many independent sample runs into per-day
//! summary statistics (mean, M2, count) for three tracked quantities: the infected population,
//! the susceptible pool, and the reproduction ratio of subjects that have completed their
//! infectious window.
//!
//! A scenario consists of:
//! * A [`ScenarioParams`] set describing the population, the infectious window, quarantine
//!   policy and the sample count.
//! * An [`InfectionDynamics`] variant deciding, stochastically, how many new infections an
//!   infectious individual attempts on a given day.
//! * The aggregator, which fans sample runs out over a worker pool and merges their statistics
//!   into a [`ScenarioSummary`].
//!
//! The entry points below mirror the three supported scenarios. Results are deterministic for a
//! fixed `base_seed`, independent of the worker count:
//!
//! ```rust
//! use socnet::{run_baseline, ScenarioParamsBuilder};
//!
//! let params = ScenarioParamsBuilder::default()
//!     .duration(30_usize)
//!     .samples(10_u32)
//!     .build()
//!     .unwrap();
//! let summary = run_baseline(&params, 42, 1).unwrap();
//! assert_eq!(summary.duration(), 30);
//! ```

pub mod aggregate;
pub mod dynamics;
pub mod error;
pub mod log;
pub mod numeric;
pub mod params;
pub mod population;
pub mod report;
pub mod runner;
pub mod sample;
pub mod stats;
pub mod subject;

pub use aggregate::run_scenario;
pub use dynamics::InfectionDynamics;
pub use error::SocnetError;
pub use crate::log::{
    debug, disable_logging, enable_logging, error, info, set_log_level, trace, warn,
};
pub use params::{
    worker_count_from_env, ScenarioParams, ScenarioParamsBuilder, VaccinePolicy, NUM_THREADS_ENV,
};
pub use stats::{ScenarioSummary, SeriesSummary};

/// Runs the baseline scenario: power-law transmission with no vaccination.
///
/// # Errors
///
/// Returns a [`SocnetError`] if the parameters fail validation.
pub fn run_baseline(
    params: &ScenarioParams,
    base_seed: u64,
    workers: usize,
) -> Result<ScenarioSummary, SocnetError> {
    params.validate()?;
    let dynamics = InfectionDynamics::baseline(params.gamma);
    Ok(run_scenario(params, &dynamics, base_seed, workers))
}

/// Runs the vaccinated scenario: baseline transmission thinned by the policy's effective
/// efficacy.
///
/// # Errors
///
/// Returns a [`SocnetError`] if the parameters or the policy fail validation.
pub fn run_with_vaccine(
    params: &ScenarioParams,
    policy: &VaccinePolicy,
    base_seed: u64,
    workers: usize,
) -> Result<ScenarioSummary, SocnetError> {
    params.validate()?;
    policy.validate()?;
    let dynamics =
        InfectionDynamics::vaccine(params.gamma, policy.vaccinated_share, policy.vaccine_efficacy);
    Ok(run_scenario(params, &dynamics, base_seed, workers))
}

/// Runs the progressive-vaccine scenario: protection ramps linearly until `rollout_horizon`
/// days have elapsed, then saturates at the policy's effective efficacy.
///
/// # Errors
///
/// Returns a [`SocnetError`] if the parameters or the policy fail validation, or if
/// `rollout_horizon` is zero.
pub fn run_with_progressive_vaccine(
    params: &ScenarioParams,
    policy: &VaccinePolicy,
    rollout_horizon: u32,
    base_seed: u64,
    workers: usize,
) -> Result<ScenarioSummary, SocnetError> {
    params.validate()?;
    policy.validate()?;
    if rollout_horizon == 0 {
        return Err("rollout_horizon must be at least one day".into());
    }
    let dynamics = InfectionDynamics::progressive_vaccine(
        params.gamma,
        policy.vaccinated_share,
        policy.vaccine_efficacy,
        rollout_horizon,
    );
    Ok(run_scenario(params, &dynamics, base_seed, workers))
}
