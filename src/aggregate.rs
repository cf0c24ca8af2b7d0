//! Fans independent sample runs out over a bounded worker pool and merges their statistics.
//!
//! Samples run in batches of at most `workers` scoped threads; the final batch underfills so the
//! exact requested count always executes. Every sample owns an engine seeded from the scenario
//! seed plus its sample index, which makes the output deterministic for a fixed seed and
//! independent of the worker count and of thread completion order.
//!
//! Merging feeds each sample's per-day mean as a single observation into the top-level
//! accumulators. The merged M2 therefore spreads sample means (a Monte Carlo standard-error
//! estimate), not a pooled population variance; downstream consumers rely on that semantic.
//! Reproduction observations are merged only for days on which the sample actually recorded one.

use std::thread;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::dynamics::InfectionDynamics;
use crate::log::{debug, info};
use crate::params::ScenarioParams;
use crate::sample::{simulate_sample, SampleSeries};
use crate::stats::{DailyStatistics, ScenarioSummary};

/// Runs `params.samples` independent simulations on up to `workers` threads and merges them.
///
/// # Panics
///
/// Panics if the seeded cohort exceeds `max_population`. The scenario entry points reject such
/// parameter sets with an error; callers invoking this directly get the assertion instead of a
/// wrapped subtraction inside the sample loop.
pub fn run_scenario(
    params: &ScenarioParams,
    dynamics: &InfectionDynamics,
    base_seed: u64,
    workers: usize,
) -> ScenarioSummary {
    assert!(
        u64::from(params.initial_active) + u64::from(params.initial_recovered)
            <= u64::from(params.max_population),
        "seeded subjects ({}) exceed max_population ({})",
        u64::from(params.initial_active) + u64::from(params.initial_recovered),
        params.max_population
    );
    let workers = workers.max(1);
    let samples = params.samples as usize;

    info!(
        "running {samples} samples of {} days on {workers} workers (seed {base_seed})",
        params.duration
    );

    let mut infected = DailyStatistics::new(params.duration);
    let mut susceptible = DailyStatistics::new(params.duration);
    let mut reproduction = DailyStatistics::new(params.duration);

    let mut next_sample = 0;
    while next_sample < samples {
        let batch = workers.min(samples - next_sample);
        debug!("batch of {batch} samples starting at sample {next_sample}");

        let outcomes: Vec<SampleSeries> = thread::scope(|scope| {
            let handles: Vec<_> = (0..batch)
                .map(|offset| {
                    let sample_index = next_sample + offset;
                    scope.spawn(move || {
                        let mut rng =
                            SmallRng::seed_from_u64(base_seed.wrapping_add(sample_index as u64));
                        simulate_sample(params, dynamics, &mut rng)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("sample worker panicked"))
                .collect()
        });

        for outcome in outcomes {
            for day in 0..params.duration {
                infected.add_value(day, outcome.infected.mean()[day]);
                susceptible.add_value(day, outcome.susceptible.mean()[day]);
                if outcome.reproduction.count()[day] > 0.0 {
                    reproduction.add_value(day, outcome.reproduction.mean()[day]);
                }
            }
        }
        next_sample += batch;
    }

    ScenarioSummary {
        infected: infected.into_summary(),
        susceptible: susceptible.into_summary(),
        reproduction: reproduction.into_summary(),
    }
}
