//! Gate-protected arena state.
//!
//! Everything here assumes the caller holds the arena's gate. Checks and
//! mutations are separate methods so that a rejected request never leaves
//! a half-applied update behind.

use catmouse_core::{
    ArenaSnapshot, BowlNumber, ContractViolation, InitError, Occupant, Occupancy, Species,
};

use crate::metrics::ArenaMetrics;

pub(crate) struct ArenaState {
    occupancy: Vec<Occupant>,
    active_cats: usize,
    active_mice: usize,
    seq: u64,
    metrics: ArenaMetrics,
}

impl ArenaState {
    pub(crate) fn new(bowl_count: usize) -> Result<Self, InitError> {
        if bowl_count == 0 {
            return Err(InitError::ZeroBowls);
        }
        if u32::try_from(bowl_count).is_err() {
            return Err(InitError::TooManyBowls {
                requested: bowl_count,
            });
        }
        let mut occupancy = Vec::new();
        occupancy
            .try_reserve_exact(bowl_count)
            .map_err(|_| InitError::AllocationFailed { bowl_count })?;
        occupancy.resize(bowl_count, Occupant::Empty);
        Ok(Self {
            occupancy,
            active_cats: 0,
            active_mice: 0,
            seq: 0,
            metrics: ArenaMetrics::default(),
        })
    }

    /// Resolve a 1-based bowl number to a storage index.
    pub(crate) fn index(
        &self,
        species: Species,
        bowl: BowlNumber,
    ) -> Result<usize, ContractViolation> {
        bowl.index(self.occupancy.len())
            .ok_or(ContractViolation::BowlOutOfRange {
                species,
                bowl,
                bowl_count: self.occupancy.len(),
            })
    }

    /// Whether `species` may start eating at `index` right now.
    ///
    /// Bowl exclusivity is checked before species exclusivity.
    pub(crate) fn check_admission(
        &self,
        species: Species,
        index: usize,
    ) -> Result<(), ContractViolation> {
        let bowl = BowlNumber::from_index(index);
        let occupant = self.occupancy[index];
        if !occupant.is_empty() {
            return Err(ContractViolation::BowlOccupied {
                species,
                bowl,
                occupant,
            });
        }
        let opposite = species.opposite();
        let active = self.active(opposite);
        if active > 0 {
            return Err(ContractViolation::SpeciesConflict {
                species,
                bowl,
                opposite,
                active,
            });
        }
        Ok(())
    }

    /// Mark the bowl and count the new eater. Call only after
    /// [`check_admission`](Self::check_admission) succeeded under the same
    /// gate acquisition.
    pub(crate) fn admit(&mut self, species: Species, index: usize, waited: bool) -> ArenaSnapshot {
        self.occupancy[index] = Occupant::from(species);
        *self.active_mut(species) += 1;
        self.seq += 1;
        let active = self.active(species);
        self.metrics.record_admission(species, active, waited);
        self.debug_check();
        self.snapshot()
    }

    /// Whether `species` may leave the bowl at `index`.
    pub(crate) fn check_departure(
        &self,
        species: Species,
        index: usize,
    ) -> Result<(), ContractViolation> {
        let bowl = BowlNumber::from_index(index);
        let found = self.occupancy[index];
        if found != Occupant::from(species) {
            return Err(ContractViolation::NotOccupant {
                species,
                bowl,
                found,
            });
        }
        if self.active(species) == 0 {
            return Err(ContractViolation::CounterUnderflow { species, bowl });
        }
        Ok(())
    }

    /// Clear the bowl and uncount the eater. Call only after
    /// [`check_departure`](Self::check_departure) succeeded.
    pub(crate) fn depart(&mut self, species: Species, index: usize) -> ArenaSnapshot {
        self.occupancy[index] = Occupant::Empty;
        *self.active_mut(species) -= 1;
        self.seq += 1;
        self.metrics.record_departure(species);
        self.debug_check();
        self.snapshot()
    }

    pub(crate) fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            seq: self.seq,
            active_cats: self.active_cats,
            active_mice: self.active_mice,
            occupancy: self.occupancy.iter().copied().collect::<Occupancy>(),
        }
    }

    pub(crate) fn metrics(&self) -> &ArenaMetrics {
        &self.metrics
    }

    pub(crate) fn bowl_count(&self) -> usize {
        self.occupancy.len()
    }

    fn active(&self, species: Species) -> usize {
        match species {
            Species::Cat => self.active_cats,
            Species::Mouse => self.active_mice,
        }
    }

    fn active_mut(&mut self, species: Species) -> &mut usize {
        match species {
            Species::Cat => &mut self.active_cats,
            Species::Mouse => &mut self.active_mice,
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.active_cats == 0 || self.active_mice == 0,
            "species exclusivity breached: {} cats and {} mice eating",
            self.active_cats,
            self.active_mice,
        );
        debug_assert_eq!(
            self.active_cats,
            self.occupancy.iter().filter(|&&o| o == Occupant::Cat).count(),
            "cat counter disagrees with occupancy",
        );
        debug_assert_eq!(
            self.active_mice,
            self.occupancy.iter().filter(|&&o| o == Occupant::Mouse).count(),
            "mouse counter disagrees with occupancy",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_bowls() {
        assert!(matches!(ArenaState::new(0), Err(InitError::ZeroBowls)));
    }

    #[test]
    fn new_starts_empty() {
        let state = ArenaState::new(3).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.seq, 0);
        assert!(snap.is_balanced());
        assert_eq!(snap.occupancy_line(), "---");
    }

    #[test]
    fn failed_check_leaves_state_untouched() {
        let mut state = ArenaState::new(2).unwrap();
        state.admit(Species::Cat, 0, false);
        let before = state.snapshot();

        assert!(state.check_admission(Species::Mouse, 1).is_err());
        assert!(state.check_admission(Species::Cat, 0).is_err());
        assert!(state.check_departure(Species::Mouse, 0).is_err());
        assert!(state.check_departure(Species::Cat, 1).is_err());

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn bowl_exclusivity_reported_before_species() {
        let mut state = ArenaState::new(1).unwrap();
        state.admit(Species::Cat, 0, false);
        assert!(matches!(
            state.check_admission(Species::Mouse, 0),
            Err(ContractViolation::BowlOccupied { .. })
        ));
    }

    #[test]
    fn seq_advances_on_every_transition() {
        let mut state = ArenaState::new(2).unwrap();
        assert_eq!(state.admit(Species::Mouse, 0, false).seq, 1);
        assert_eq!(state.admit(Species::Mouse, 1, false).seq, 2);
        assert_eq!(state.depart(Species::Mouse, 0).seq, 3);
        assert_eq!(state.depart(Species::Mouse, 1).seq, 4);
        assert_eq!(state.metrics().peak_mice, 2);
    }
}
