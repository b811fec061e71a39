//! Cumulative arena counters.
//!
//! [`ArenaMetrics`] is updated inside the gate on every admission and
//! departure, so a copy taken with [`BowlArena::metrics`](crate::BowlArena::metrics)
//! is always internally consistent.

use catmouse_core::Species;

/// Counters accumulated over the lifetime of an arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaMetrics {
    /// Cats admitted to a bowl.
    pub cat_admissions: u64,
    /// Mice admitted to a bowl.
    pub mouse_admissions: u64,
    /// Cats that finished eating.
    pub cat_departures: u64,
    /// Mice that finished eating.
    pub mouse_departures: u64,
    /// Admissions that blocked at least once before being granted.
    /// Always zero under the strict policy.
    pub waited_admissions: u64,
    /// Most cats ever eating at the same time.
    pub peak_cats: usize,
    /// Most mice ever eating at the same time.
    pub peak_mice: usize,
}

impl ArenaMetrics {
    /// Admissions for one species.
    pub fn admissions(&self, species: Species) -> u64 {
        match species {
            Species::Cat => self.cat_admissions,
            Species::Mouse => self.mouse_admissions,
        }
    }

    /// Departures for one species.
    pub fn departures(&self, species: Species) -> u64 {
        match species {
            Species::Cat => self.cat_departures,
            Species::Mouse => self.mouse_departures,
        }
    }

    /// Peak concurrency for one species.
    pub fn peak(&self, species: Species) -> usize {
        match species {
            Species::Cat => self.peak_cats,
            Species::Mouse => self.peak_mice,
        }
    }

    pub(crate) fn record_admission(&mut self, species: Species, active: usize, waited: bool) {
        match species {
            Species::Cat => {
                self.cat_admissions += 1;
                self.peak_cats = self.peak_cats.max(active);
            }
            Species::Mouse => {
                self.mouse_admissions += 1;
                self.peak_mice = self.peak_mice.max(active);
            }
        }
        if waited {
            self.waited_admissions += 1;
        }
    }

    pub(crate) fn record_departure(&mut self, species: Species) {
        match species {
            Species::Cat => self.cat_departures += 1,
            Species::Mouse => self.mouse_departures += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = ArenaMetrics::default();
        assert_eq!(m.cat_admissions, 0);
        assert_eq!(m.mouse_admissions, 0);
        assert_eq!(m.cat_departures, 0);
        assert_eq!(m.mouse_departures, 0);
        assert_eq!(m.waited_admissions, 0);
        assert_eq!(m.peak_cats, 0);
        assert_eq!(m.peak_mice, 0);
    }

    #[test]
    fn peak_tracks_maximum_not_latest() {
        let mut m = ArenaMetrics::default();
        m.record_admission(Species::Cat, 1, false);
        m.record_admission(Species::Cat, 3, true);
        m.record_departure(Species::Cat);
        m.record_admission(Species::Cat, 2, false);
        assert_eq!(m.peak(Species::Cat), 3);
        assert_eq!(m.admissions(Species::Cat), 3);
        assert_eq!(m.departures(Species::Cat), 1);
        assert_eq!(m.waited_admissions, 1);
        assert_eq!(m.peak(Species::Mouse), 0);
    }
}
