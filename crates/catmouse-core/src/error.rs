//! Error types for the bowl arena.
//!
//! Split by when they can occur: [`InitError`] at arena construction,
//! [`ContractViolation`] on an individual `enter`/`leave` call, and
//! [`InvariantBreach`] when a snapshot of the whole state is inconsistent.
//! Every message names the invariant, the species and the bowl involved so
//! that a failed run is diagnosable from its output alone.

use crate::id::{BowlNumber, Occupant, Species};

/// Errors from arena construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// The arena was asked to manage zero bowls.
    #[error("invalid bowl count 0: an arena needs at least one bowl")]
    ZeroBowls,
    /// More bowls were requested than can be numbered with a `u32`.
    #[error("invalid bowl count {requested}: bowl numbers must fit in u32")]
    TooManyBowls {
        /// The requested bowl count.
        requested: usize,
    },
    /// Occupancy storage could not be allocated. Fatal for the caller.
    #[error("unable to allocate occupancy storage for {bowl_count} bowls")]
    AllocationFailed {
        /// The requested bowl count.
        bowl_count: usize,
    },
}

/// A caller broke the arena's usage contract.
///
/// The arena checks every condition before mutating anything, so a
/// violation leaves the state exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// The bowl number is outside `1..=bowl_count`.
    #[error("{species}: invalid bowl number {bowl} (arena has {bowl_count} bowls)")]
    BowlOutOfRange {
        /// The species that made the call.
        species: Species,
        /// The offending bowl number.
        bowl: BowlNumber,
        /// Number of bowls in the arena.
        bowl_count: usize,
    },
    /// Bowl exclusivity: the bowl already has an occupant.
    #[error("bowl exclusivity: {species} tried to eat from bowl {bowl} while occupied by '{occupant}'")]
    BowlOccupied {
        /// The species that tried to enter.
        species: Species,
        /// The contested bowl.
        bowl: BowlNumber,
        /// Who is already there.
        occupant: Occupant,
    },
    /// Species exclusivity: the opposite species is eating somewhere.
    #[error("species exclusivity: {species} tried to eat at bowl {bowl} while {active} {opposite}(s) are eating")]
    SpeciesConflict {
        /// The species that tried to enter.
        species: Species,
        /// The requested bowl.
        bowl: BowlNumber,
        /// The species currently eating.
        opposite: Species,
        /// How many of the opposite species are eating.
        active: usize,
    },
    /// A leave for a bowl that does not hold the leaving species.
    #[error("leave mismatch: {species} tried to leave bowl {bowl} which holds '{found}'")]
    NotOccupant {
        /// The species that tried to leave.
        species: Species,
        /// The bowl named in the call.
        bowl: BowlNumber,
        /// What the bowl actually holds.
        found: Occupant,
    },
    /// A leave when the species' active counter is already zero.
    #[error("counter underflow: {species} tried to leave bowl {bowl} with no {species}s eating")]
    CounterUnderflow {
        /// The species that tried to leave.
        species: Species,
        /// The bowl named in the call.
        bowl: BowlNumber,
    },
}

impl ContractViolation {
    /// The bowl named by the offending call.
    pub fn bowl(&self) -> BowlNumber {
        match self {
            Self::BowlOutOfRange { bowl, .. }
            | Self::BowlOccupied { bowl, .. }
            | Self::SpeciesConflict { bowl, .. }
            | Self::NotOccupant { bowl, .. }
            | Self::CounterUnderflow { bowl, .. } => *bowl,
        }
    }

    /// The species that made the offending call.
    pub fn species(&self) -> Species {
        match self {
            Self::BowlOutOfRange { species, .. }
            | Self::BowlOccupied { species, .. }
            | Self::SpeciesConflict { species, .. }
            | Self::NotOccupant { species, .. }
            | Self::CounterUnderflow { species, .. } => *species,
        }
    }
}

/// A whole-state invariant does not hold in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantBreach {
    /// Cats and mice are both eating.
    #[error("species exclusivity breached: {active_cats} cats and {active_mice} mice eating")]
    MixedSpecies {
        /// Active cats.
        active_cats: usize,
        /// Active mice.
        active_mice: usize,
    },
    /// A species counter disagrees with the bowls it should describe.
    #[error("{species} counter is {counter} but {occupied} bowls hold a {species}")]
    CounterMismatch {
        /// The species whose counter is wrong.
        species: Species,
        /// The counter value.
        counter: usize,
        /// The number of bowls actually holding that species.
        occupied: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_invariant_species_and_bowl() {
        let err = ContractViolation::SpeciesConflict {
            species: Species::Cat,
            bowl: BowlNumber(2),
            opposite: Species::Mouse,
            active: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("species exclusivity"));
        assert!(msg.contains("cat"));
        assert!(msg.contains("bowl 2"));

        let err = ContractViolation::BowlOccupied {
            species: Species::Mouse,
            bowl: BowlNumber(1),
            occupant: Occupant::Mouse,
        };
        assert!(err.to_string().contains("bowl exclusivity"));
        assert_eq!(err.bowl(), BowlNumber(1));
        assert_eq!(err.species(), Species::Mouse);
    }

    #[test]
    fn init_error_display() {
        assert!(InitError::ZeroBowls.to_string().contains("invalid bowl count 0"));
        let err = InitError::AllocationFailed { bowl_count: 7 };
        assert!(err.to_string().contains("7 bowls"));
    }
}
