//! An append-only arena of [`Subject`]s with a skip cursor over resolved infections.
//!
//! Subjects are addressed by their index in insertion order. Because older infections resolve
//! before newer ones, activity clusters toward the back of the arena; `first_active` lower-bounds
//! the earliest index that might still be active so the day loop never re-scans indices known to
//! be exhausted. The cursor is an amortization device, not authoritative: inactive subjects may
//! still appear beyond it.

use rand::Rng;

use crate::subject::Subject;

#[derive(Debug, Clone, Default)]
pub struct Population {
    subjects: Vec<Subject>,
    first_active: usize,
}

impl Population {
    pub fn with_capacity(expected_size: usize) -> Population {
        Population {
            subjects: Vec::with_capacity(expected_size),
            first_active: 0,
        }
    }

    /// Current subject count. Grows monotonically within a run.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    /// The cursor from which a per-day scan should start. No active subject exists strictly
    /// before it.
    pub fn first_active(&self) -> usize {
        self.first_active
    }

    /// Marks the subject at `index` inactive. If `index` is exactly the cursor, the cursor
    /// advances by one; deactivations elsewhere leave it untouched, keeping it a lower bound.
    pub fn clear_active(&mut self, index: usize) {
        self.subjects[index].clear_active();
        if self.first_active == index {
            self.first_active = index + 1;
        }
    }

    /// Appends a subject infected on the current day by the subject at `parent`.
    pub fn push_infected(&mut self, parent: usize, quarantined: bool) {
        self.subjects.push(Subject::infected(parent, quarantined));
    }

    /// Populates the initial cohort: `active` infectious seeds plus `recovered` subjects that
    /// already completed their infectious window. Each active seed is quarantined independently
    /// with probability `quarantine_fraction`.
    pub fn seed_infected<R: Rng>(
        &mut self,
        active: u32,
        recovered: u32,
        quarantine_fraction: f64,
        max_transmission_day: u32,
        rng: &mut R,
    ) {
        for _ in 0..active {
            let quarantined = rng.random::<f64>() < quarantine_fraction;
            self.subjects
                .push(Subject::seed(true, quarantined, max_transmission_day));
        }
        for _ in 0..recovered {
            self.subjects
                .push(Subject::seed(false, false, max_transmission_day));
        }
    }

    /// Multi-cluster variant of [`seed_infected`](Population::seed_infected): one active/recovered
    /// pair per independent initial cluster.
    pub fn seed_clusters<R: Rng>(
        &mut self,
        active: &[u32],
        recovered: &[u32],
        quarantine_fraction: f64,
        max_transmission_day: u32,
        rng: &mut R,
    ) {
        for (&cluster_active, &cluster_recovered) in active.iter().zip(recovered.iter()) {
            self.seed_infected(
                cluster_active,
                cluster_recovered,
                quarantine_fraction,
                max_transmission_day,
                rng,
            );
        }
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Subject;

    fn index(&self, index: usize) -> &Subject {
        &self.subjects[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Subject {
        &mut self.subjects[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_population(active: u32, recovered: u32) -> Population {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut population = Population::with_capacity(100);
        population.seed_infected(active, recovered, 0.0, 5, &mut rng);
        population
    }

    #[test]
    fn seeding_orders_active_before_recovered() {
        let population = seeded_population(3, 2);
        assert_eq!(population.len(), 5);
        for index in 0..3 {
            assert!(population[index].is_active());
            assert_eq!(population[index].days_of_infection, 0);
        }
        for index in 3..5 {
            assert!(!population[index].is_active());
            assert_eq!(population[index].days_of_infection, 5);
        }
    }

    #[test]
    fn full_quarantine_fraction_quarantines_every_seed() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut population = Population::with_capacity(10);
        population.seed_infected(10, 0, 1.0, 5, &mut rng);
        assert!(population.iter().all(Subject::is_quarantined));
    }

    #[test]
    fn clear_active_at_cursor_advances_it() {
        let mut population = seeded_population(3, 0);
        assert_eq!(population.first_active(), 0);
        population.clear_active(0);
        assert_eq!(population.first_active(), 1);
    }

    #[test]
    fn clear_active_beyond_cursor_leaves_it() {
        let mut population = seeded_population(3, 0);
        population.clear_active(2);
        assert_eq!(population.first_active(), 0);
        assert!(!population[2].is_active());
        // The cursor stays a lower bound even though index 2 is now inactive.
        population.clear_active(0);
        assert_eq!(population.first_active(), 1);
    }

    #[test]
    fn push_infected_records_parent() {
        let mut population = seeded_population(1, 0);
        population.push_infected(0, false);
        assert_eq!(population.len(), 2);
        assert_eq!(population[1].parent, Some(0));
        assert!(population[1].is_active());
    }

    #[test]
    fn seed_clusters_sums_all_groups() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut population = Population::with_capacity(10);
        population.seed_clusters(&[2, 3], &[1, 0], 0.0, 5, &mut rng);
        assert_eq!(population.len(), 6);
        assert_eq!(population.iter().filter(|s| s.is_active()).count(), 5);
    }
}
