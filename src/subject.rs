//! The per-individual record tracked by a [`Population`](crate::population::Population).

/// One individual in a simulated population. A subject is created when it is infected (or seeded
/// at the start of a run) and is never removed; once its infectious window closes only its
/// `active` flag flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    /// Elapsed infectious days.
    pub days_of_infection: u32,
    /// Index of the subject that infected this one. `None` for seeded subjects.
    pub parent: Option<usize>,
    /// Number of subjects this one has infected so far.
    pub descendants: u32,
    active: bool,
    quarantined: bool,
}

impl Subject {
    /// A subject newly infected on the current day by the subject at `parent`.
    pub fn infected(parent: usize, quarantined: bool) -> Subject {
        Subject {
            days_of_infection: 0,
            parent: Some(parent),
            descendants: 0,
            active: true,
            quarantined,
        }
    }

    /// A seed subject present at the start of a run. Active seeds begin their infectious window
    /// at day zero; inactive seeds represent pre-existing recovered individuals and are placed
    /// at the end of the window (`max_transmission_day`) so they never transmit.
    pub fn seed(active: bool, quarantined: bool, max_transmission_day: u32) -> Subject {
        Subject {
            days_of_infection: if active { 0 } else { max_transmission_day },
            parent: None,
            descendants: 0,
            active,
            quarantined,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_quarantined(&self) -> bool {
        self.quarantined
    }

    pub(crate) fn clear_active(&mut self) {
        self.active = false;
    }
}
