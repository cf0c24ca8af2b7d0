//! Scenario parameters and process-level configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::SocnetError;
use crate::log::warn;

/// Parameters for one scenario invocation, shared read-only by every sample run.
#[derive(Serialize, Deserialize, Clone, Debug, Builder)]
pub struct ScenarioParams {
    /// Number of simulated days per sample.
    #[builder(default = "100")]
    pub duration: usize,

    /// Total population cap; the initial susceptible pool is this minus the seeded subjects.
    #[builder(default = "1000")]
    pub max_population: u32,

    /// Infectious seed subjects present on day zero.
    #[builder(default = "5")]
    pub initial_active: u32,

    /// Already-recovered subjects present on day zero.
    #[builder(default = "0")]
    #[serde(default)]
    pub initial_recovered: u32,

    /// Independent sample runs to aggregate.
    #[builder(default = "100")]
    pub samples: u32,

    /// Length of the infectious window in days.
    #[builder(default = "5")]
    pub max_transmission_day: u32,

    /// Cumulative transmission cap for quarantined subjects.
    #[builder(default = "3")]
    pub max_quarantine_transmissions: u32,

    /// Shape parameter of the offspring distribution; larger means fewer transmissions.
    #[builder(default = "2.0")]
    pub gamma: f64,

    /// Probability that a newly infected subject is quarantined.
    #[builder(default = "0.0")]
    #[serde(default)]
    pub quarantine_fraction: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        ScenarioParamsBuilder::default().build().unwrap()
    }
}

impl ScenarioParams {
    /// Rejects parameter sets the simulator cannot run.
    pub fn validate(&self) -> Result<(), SocnetError> {
        if self.duration == 0 {
            return Err("duration must be at least one day".into());
        }
        if self.samples == 0 {
            return Err("at least one sample is required".into());
        }
        let seeded = u64::from(self.initial_active) + u64::from(self.initial_recovered);
        if seeded > u64::from(self.max_population) {
            return Err(format!(
                "seeded subjects ({seeded}) exceed max_population ({})",
                self.max_population
            )
            .into());
        }
        if self.max_population == 0 {
            return Err("max_population must be positive".into());
        }
        if self.gamma <= 0.0 {
            return Err(format!("gamma must be positive, got {}", self.gamma).into());
        }
        if !(0.0..=1.0).contains(&self.quarantine_fraction) {
            return Err(format!(
                "quarantine_fraction must lie in [0, 1], got {}",
                self.quarantine_fraction
            )
            .into());
        }
        Ok(())
    }
}

/// A vaccination policy applied on top of the baseline dynamics.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct VaccinePolicy {
    /// Fraction of the population that is vaccinated.
    pub vaccinated_share: f64,
    /// Per-dose probability that a transmission to a vaccinated individual is blocked.
    pub vaccine_efficacy: f64,
}

impl VaccinePolicy {
    /// Probability that any given transmission attempt is blocked.
    pub fn effective_efficacy(&self) -> f64 {
        self.vaccinated_share * self.vaccine_efficacy
    }

    pub fn validate(&self) -> Result<(), SocnetError> {
        if !(0.0..=1.0).contains(&self.vaccinated_share) {
            return Err(format!(
                "vaccinated_share must lie in [0, 1], got {}",
                self.vaccinated_share
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.vaccine_efficacy) {
            return Err(format!(
                "vaccine_efficacy must lie in [0, 1], got {}",
                self.vaccine_efficacy
            )
            .into());
        }
        Ok(())
    }
}

/// Environment variable controlling the aggregator's worker pool size.
pub const NUM_THREADS_ENV: &str = "SOCNET_NUM_THREADS";

/// Resolves the worker count from [`NUM_THREADS_ENV`]: unset means one worker, `"CPU_MAX"` means
/// all available hardware threads, a positive integer is taken as-is, and anything else falls
/// back to one worker (permissive, but logged).
pub fn worker_count_from_env() -> usize {
    worker_count_from_value(std::env::var(NUM_THREADS_ENV).ok().as_deref())
}

fn worker_count_from_value(value: Option<&str>) -> usize {
    match value {
        None => 1,
        Some("CPU_MAX") => std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
        Some(text) => match text.parse::<usize>() {
            Ok(count) if count > 0 => count,
            _ => {
                warn!("invalid {NUM_THREADS_ENV} value {text:?}; falling back to one worker");
                1
            }
        },
    }
}
