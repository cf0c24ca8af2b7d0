//! One full epidemic trajectory over a fixed duration.
//!
//! The day loop visits subjects from the population's first-active cursor up to the size the
//! population had at the start of the day, so an individual can never transmit on the day it was
//! infected. New infections are realized by rejection sampling against the shrinking susceptible
//! pool: an attempt succeeds only if a uniform integer below `max_population` lands under the
//! remaining susceptible count, which approximates sampling without replacement without
//! materializing susceptible identities. Once the pool is exhausted every attempt fails, so the
//! loop needs no special termination handling.

use rand::Rng;

use crate::dynamics::InfectionDynamics;
use crate::params::ScenarioParams;
use crate::population::Population;
use crate::stats::DailyStatistics;

/// Per-day statistics produced by a single sample run, one accumulator per tracked metric. Each
/// day of the infected and susceptible series holds exactly one observation; the reproduction
/// series only covers days on which at least one non-seed subject had completed its infectious
/// window.
#[derive(Debug)]
pub struct SampleSeries {
    pub infected: DailyStatistics,
    pub susceptible: DailyStatistics,
    pub reproduction: DailyStatistics,
}

impl SampleSeries {
    fn new(duration: usize) -> SampleSeries {
        SampleSeries {
            infected: DailyStatistics::new(duration),
            susceptible: DailyStatistics::new(duration),
            reproduction: DailyStatistics::new(duration),
        }
    }
}

/// Runs one stochastic epidemic over `params.duration` days. The caller provides the engine, one
/// per sample, so trajectories replay exactly for a fixed seed.
///
/// # Panics
///
/// Panics if the seeded cohort exceeds `max_population`. The check is a plain `assert!` so it is
/// not compiled out of release builds.
pub fn simulate_sample<R: Rng>(
    params: &ScenarioParams,
    dynamics: &InfectionDynamics,
    rng: &mut R,
) -> SampleSeries {
    assert!(
        u64::from(params.initial_active) + u64::from(params.initial_recovered)
            <= u64::from(params.max_population),
        "seeded subjects ({}) exceed max_population ({})",
        u64::from(params.initial_active) + u64::from(params.initial_recovered),
        params.max_population
    );

    let mut series = SampleSeries::new(params.duration);

    let mut susceptible = params.max_population - params.initial_active - params.initial_recovered;

    let mut population = Population::with_capacity(susceptible as usize);
    population.seed_infected(
        params.initial_active,
        params.initial_recovered,
        params.quarantine_fraction,
        params.max_transmission_day,
        rng,
    );

    for day in 0..params.duration {
        // Capture the size before any of today's infections are appended; subjects created
        // today are first visited tomorrow.
        let infected = population.len();

        series.infected.add_value(day, infected as f64);
        series.susceptible.add_value(day, f64::from(susceptible));

        for index in population.first_active()..infected {
            if !population[index].is_active() {
                continue;
            }

            if population[index].days_of_infection >= params.max_transmission_day {
                population.clear_active(index);
                continue;
            }
            population[index].days_of_infection += 1;

            let mut attempts = dynamics.transmissions(day as u32, rng);
            if attempts == 0 {
                continue;
            }
            if population[index].is_quarantined() {
                attempts = attempts.min(
                    params
                        .max_quarantine_transmissions
                        .saturating_sub(population[index].descendants),
                );
            }

            let mut newly_infected = 0;
            for _ in 0..attempts {
                if susceptible > 0 && rng.random_range(0..params.max_population) < susceptible {
                    susceptible -= 1;
                    let quarantined = rng.random::<f64>() < params.quarantine_fraction;
                    population.push_infected(index, quarantined);
                    newly_infected += 1;
                }
            }
            population[index].descendants += newly_infected;
        }

        // Reproduction ratio: mean descendants over every non-seed subject that has completed
        // its infectious window, cumulative across the run so far.
        let mut graduated = 0u32;
        let mut descendants = 0u32;
        for subject in population.iter() {
            if subject.parent.is_none() || subject.days_of_infection < params.max_transmission_day
            {
                continue;
            }
            graduated += 1;
            descendants += subject.descendants;
        }
        if graduated > 0 {
            series
                .reproduction
                .add_value(day, f64::from(descendants) / f64::from(graduated));
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ScenarioParams, ScenarioParamsBuilder};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn small_params() -> ScenarioParams {
        ScenarioParamsBuilder::default()
            .duration(20_usize)
            .max_population(500_u32)
            .initial_active(5_u32)
            .max_transmission_day(5_u32)
            .gamma(1.5)
            .build()
            .unwrap()
    }

    #[test]
    #[should_panic(expected = "exceed max_population")]
    fn seed_cohort_larger_than_population_panics() {
        let params = ScenarioParamsBuilder::default()
            .duration(10_usize)
            .max_population(10_u32)
            .initial_active(20_u32)
            .build()
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);
    }

    #[test]
    fn series_have_one_observation_per_day() {
        let params = small_params();
        let mut rng = SmallRng::seed_from_u64(1);
        let series = simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);

        assert_eq!(series.infected.len(), 20);
        assert!(series.infected.count().iter().all(|&c| c == 1.0));
        assert!(series.susceptible.count().iter().all(|&c| c == 1.0));
        // A single run contributes at most one reproduction observation per day.
        assert!(series.reproduction.count().iter().all(|&c| c == 0.0 || c == 1.0));
    }

    #[test]
    fn infected_plus_susceptible_is_conserved() {
        let params = small_params();
        let mut rng = SmallRng::seed_from_u64(2);
        let series = simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);

        for day in 0..params.duration {
            let total = series.infected.mean()[day] + series.susceptible.mean()[day];
            crate::assert_almost_eq!(total, f64::from(params.max_population), 1e-9);
        }
    }

    #[test]
    fn total_blocking_keeps_the_infected_series_flat() {
        let params = small_params();
        let dynamics = InfectionDynamics::vaccine(params.gamma, 1.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let series = simulate_sample(&params, &dynamics, &mut rng);

        for day in 0..params.duration {
            assert_eq!(series.infected.mean()[day], 5.0);
        }
        // With no graduated children the reproduction series stays empty.
        assert!(series.reproduction.count().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn infected_series_is_monotone() {
        let params = small_params();
        let mut rng = SmallRng::seed_from_u64(4);
        let series = simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);

        for day in 1..params.duration {
            assert!(series.infected.mean()[day] >= series.infected.mean()[day - 1]);
        }
    }

    #[test]
    fn quarantine_caps_descendants() {
        let params = ScenarioParamsBuilder::default()
            .duration(30_usize)
            .max_population(2000_u32)
            .initial_active(10_u32)
            .max_transmission_day(5_u32)
            .max_quarantine_transmissions(3_u32)
            .quarantine_fraction(1.0)
            .gamma(1.2)
            .build()
            .unwrap();
        // Every subject is quarantined, so no graduate may exceed the transmission cap and the
        // reproduction ratio is bounded by it.
        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let series =
                simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);
            for day in 0..params.duration {
                assert!(
                    series.reproduction.mean()[day]
                        <= f64::from(params.max_quarantine_transmissions)
                );
            }
        }
    }

    #[test]
    fn recovered_seeds_count_as_infected_but_never_transmit() {
        let params = ScenarioParamsBuilder::default()
            .duration(10_usize)
            .max_population(100_u32)
            .initial_active(0_u32)
            .initial_recovered(20_u32)
            .build()
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(6);
        let series = simulate_sample(&params, &InfectionDynamics::baseline(params.gamma), &mut rng);

        for day in 0..params.duration {
            assert_eq!(series.infected.mean()[day], 20.0);
            assert_eq!(series.susceptible.mean()[day], 80.0);
        }
    }
}
