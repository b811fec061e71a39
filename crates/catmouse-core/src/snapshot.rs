//! Owned copies of arena state and the observation lines built from them.

use std::fmt;

use smallvec::SmallVec;

use crate::error::InvariantBreach;
use crate::id::{BowlNumber, Occupant, Species};

/// Per-bowl occupancy, index 0 is bowl 1.
///
/// Inline for up to 16 bowls, which covers every configuration used by
/// the harness; larger arenas spill to the heap.
pub type Occupancy = SmallVec<[Occupant; 16]>;

/// A consistent copy of the whole arena state, taken inside the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaSnapshot {
    /// Sequence number of the transition that produced this state.
    /// `0` is the freshly created arena.
    pub seq: u64,
    /// Number of cats eating.
    pub active_cats: usize,
    /// Number of mice eating.
    pub active_mice: usize,
    /// Who is at each bowl.
    pub occupancy: Occupancy,
}

impl ArenaSnapshot {
    /// Number of bowls.
    pub fn bowl_count(&self) -> usize {
        self.occupancy.len()
    }

    /// The occupant of a bowl, or `None` if the number is out of range.
    pub fn occupant(&self, bowl: BowlNumber) -> Option<Occupant> {
        bowl.index(self.occupancy.len()).map(|i| self.occupancy[i])
    }

    /// The active counter for a species.
    pub fn active(&self, species: Species) -> usize {
        match species {
            Species::Cat => self.active_cats,
            Species::Mouse => self.active_mice,
        }
    }

    /// Whether nobody is eating and every bowl is empty.
    pub fn is_balanced(&self) -> bool {
        self.active_cats == 0
            && self.active_mice == 0
            && self.occupancy.iter().all(|o| o.is_empty())
    }

    /// Check the whole-state invariants.
    ///
    /// Returns the first breach found: mixed species first, then each
    /// counter against the bowls it describes.
    pub fn check_invariants(&self) -> Result<(), InvariantBreach> {
        if self.active_cats > 0 && self.active_mice > 0 {
            return Err(InvariantBreach::MixedSpecies {
                active_cats: self.active_cats,
                active_mice: self.active_mice,
            });
        }
        for species in Species::ALL {
            let marker = Occupant::from(species);
            let occupied = self.occupancy.iter().filter(|&&o| o == marker).count();
            let counter = self.active(species);
            if occupied != counter {
                return Err(InvariantBreach::CounterMismatch {
                    species,
                    counter,
                    occupied,
                });
            }
        }
        Ok(())
    }

    /// The occupancy line alone, e.g. `-c-c`.
    pub fn occupancy_line(&self) -> String {
        self.occupancy.iter().map(|o| o.marker()).collect()
    }
}

impl fmt::Display for ArenaSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " Eating Cats: {:>3}  Eating Mice: {:>3}   ",
            self.active_cats, self.active_mice
        )?;
        for occupant in &self.occupancy {
            write!(f, "{}", occupant.marker())?;
        }
        Ok(())
    }
}

/// Which side of a meal an observation records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BowlEvent {
    /// The actor was admitted and started eating.
    Enter,
    /// The actor finished eating and left.
    Leave,
}

/// One line of the observation stream.
///
/// Emitted by the arena inside the gate, once per admission and once per
/// departure. The `Display` form is the human-readable trace line:
///
/// ```text
/// cat_eat   (bowl   2) start:   Eating Cats:   1  Eating Mice:   0   -c--
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Admission or departure.
    pub event: BowlEvent,
    /// The actor's species.
    pub species: Species,
    /// The bowl involved.
    pub bowl: BowlNumber,
    /// The full state immediately after the transition.
    pub snapshot: ArenaSnapshot,
}

impl Observation {
    /// Sequence number of this observation.
    pub fn seq(&self) -> u64 {
        self.snapshot.seq
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.species {
            Species::Cat => "cat_eat",
            Species::Mouse => "mouse_eat",
        };
        let phase = match self.event {
            BowlEvent::Enter => "start:",
            BowlEvent::Leave => "finish:",
        };
        write!(
            f,
            "{label:<9} (bowl {:>3}) {phase:<7} {}",
            self.bowl.0, self.snapshot
        )
    }
}
