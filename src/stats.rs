//! Online per-day summary statistics and the result types built from them.
//!
//! [`DailyStatistics`] keeps one Welford accumulator per simulated day, producing numerically
//! stable means and sums of squared deviations without storing raw samples. The same type serves
//! two roles: inside a single sample run each day receives exactly one observation, and at the
//! top level each sample's per-day mean is fed in as one observation, which makes the merged M2 a
//! Monte Carlo standard-error style spread of sample means rather than a pooled variance.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct DailyStatistics {
    mean: Vec<f64>,
    m2: Vec<f64>,
    count: Vec<f64>,
}

impl DailyStatistics {
    pub fn new(duration: usize) -> DailyStatistics {
        DailyStatistics {
            mean: vec![0.0; duration],
            m2: vec![0.0; duration],
            count: vec![0.0; duration],
        }
    }

    /// Number of day slots.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Folds one observation for `day` into the accumulator using Welford's update.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range. The check is a plain `assert!` so it is not compiled out
    /// of release builds.
    pub fn add_value(&mut self, day: usize, value: f64) {
        assert!(
            day < self.mean.len(),
            "day {day} out of range for {} accumulator slots",
            self.mean.len()
        );

        let delta = value - self.mean[day];
        self.count[day] += 1.0;
        self.mean[day] += delta / self.count[day];
        let delta2 = value - self.mean[day];
        self.m2[day] += delta * delta2;
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn m2(&self) -> &[f64] {
        &self.m2
    }

    pub fn count(&self) -> &[f64] {
        &self.count
    }

    /// Unbiased sample variance for `day`, or `None` with fewer than two observations.
    pub fn sample_variance(&self, day: usize) -> Option<f64> {
        if self.count[day] < 2.0 {
            return None;
        }
        Some(self.m2[day] / (self.count[day] - 1.0))
    }

    pub fn into_summary(self) -> SeriesSummary {
        SeriesSummary {
            mean: self.mean,
            m2: self.m2,
            count: self.count,
        }
    }
}

/// Per-day mean, M2 and observation count for one tracked metric. Days with `count == 0` hold
/// their initial zeros and are not valid estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub mean: Vec<f64>,
    pub m2: Vec<f64>,
    pub count: Vec<f64>,
}

/// The merged outcome of a scenario: one [`SeriesSummary`] per tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Population size at the start of each day: everyone infected so far, including seeded
    /// recovered subjects.
    pub infected: SeriesSummary,
    pub susceptible: SeriesSummary,
    /// Mean descendants per subject that completed its infectious window. Recorded only on days
    /// where at least one non-seed subject has graduated, so its counts run lower than the other
    /// two series.
    pub reproduction: SeriesSummary,
}

impl ScenarioSummary {
    pub fn duration(&self) -> usize {
        self.infected.mean.len()
    }

    /// Flattens into the fixed nine-sequence order of the historical interface:
    /// [infected mean, m2, count, susceptible mean, m2, count, reproduction mean, m2, count].
    pub fn into_sequences(self) -> Vec<Vec<f64>> {
        vec![
            self.infected.mean,
            self.infected.m2,
            self.infected.count,
            self.susceptible.mean,
            self.susceptible.m2,
            self.susceptible.count,
            self.reproduction.mean,
            self.reproduction.m2,
            self.reproduction.count,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_almost_eq;

    /// Naive two-pass mean and sum of squared deviations.
    fn two_pass(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let m2 = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
        (mean, m2)
    }

    #[test]
    fn welford_matches_two_pass() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut stats = DailyStatistics::new(1);
        for &value in &values {
            stats.add_value(0, value);
        }

        let (mean, m2) = two_pass(&values);
        assert_almost_eq!(stats.mean()[0], mean, 1e-12);
        assert_almost_eq!(stats.m2()[0], m2, 1e-12);
        assert_almost_eq!(stats.count()[0], values.len() as f64, 1e-12);
        assert_almost_eq!(
            stats.sample_variance(0).unwrap(),
            m2 / (values.len() - 1) as f64,
            1e-12
        );
    }

    #[test]
    fn merge_is_order_independent() {
        let sample_means = [3.0, 1.5, 8.25, 4.0, 2.5];

        let mut forward = DailyStatistics::new(1);
        for &value in &sample_means {
            forward.add_value(0, value);
        }
        let mut backward = DailyStatistics::new(1);
        for &value in sample_means.iter().rev() {
            backward.add_value(0, value);
        }

        assert_almost_eq!(forward.mean()[0], backward.mean()[0], 1e-12);
        assert_almost_eq!(forward.m2()[0], backward.m2()[0], 1e-10);
        assert_eq!(forward.count()[0], backward.count()[0]);
    }

    #[test]
    fn untouched_day_stays_at_initial_values() {
        let mut stats = DailyStatistics::new(3);
        stats.add_value(1, 10.0);
        assert_eq!(stats.mean()[0], 0.0);
        assert_eq!(stats.m2()[0], 0.0);
        assert_eq!(stats.count()[0], 0.0);
        assert_eq!(stats.sample_variance(0), None);
        assert_eq!(stats.sample_variance(1), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn add_value_out_of_range_panics() {
        let mut stats = DailyStatistics::new(2);
        stats.add_value(2, 1.0);
    }

    #[test]
    fn sequences_follow_the_fixed_order() {
        let mut infected = DailyStatistics::new(2);
        infected.add_value(0, 5.0);
        infected.add_value(1, 8.0);
        let susceptible = DailyStatistics::new(2);
        let reproduction = DailyStatistics::new(2);

        let summary = ScenarioSummary {
            infected: infected.into_summary(),
            susceptible: susceptible.into_summary(),
            reproduction: reproduction.into_summary(),
        };
        assert_eq!(summary.duration(), 2);

        let sequences = summary.into_sequences();
        assert_eq!(sequences.len(), 9);
        assert_eq!(sequences[0], vec![5.0, 8.0]);
        assert_eq!(sequences[2], vec![1.0, 1.0]);
        assert_eq!(sequences[8], vec![0.0, 0.0]);
    }
}
