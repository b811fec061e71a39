//! Hand-built snapshots and observations.
//!
//! Occupancy is written as a line of markers, the same way it appears in
//! trace output: `-` empty, `c` cat, `m` mouse.

use catmouse_core::{
    ArenaSnapshot, BowlEvent, BowlNumber, Observation, Occupancy, Occupant, Species,
};

/// Parse an occupancy line such as `"-c-c"`.
///
/// # Panics
///
/// Panics on any character other than `-`, `c` or `m`.
pub fn occupancy(line: &str) -> Occupancy {
    line.chars()
        .map(|c| match c {
            '-' => Occupant::Empty,
            'c' => Occupant::Cat,
            'm' => Occupant::Mouse,
            other => panic!("unknown occupancy marker {other:?}"),
        })
        .collect()
}

/// A snapshot whose counters agree with `line`.
pub fn snapshot(seq: u64, line: &str) -> ArenaSnapshot {
    let occupancy = occupancy(line);
    ArenaSnapshot {
        seq,
        active_cats: occupancy.iter().filter(|&&o| o == Occupant::Cat).count(),
        active_mice: occupancy.iter().filter(|&&o| o == Occupant::Mouse).count(),
        occupancy,
    }
}

/// An admission observation.
pub fn enter(seq: u64, species: Species, bowl: u32, line: &str) -> Observation {
    Observation {
        event: BowlEvent::Enter,
        species,
        bowl: BowlNumber(bowl),
        snapshot: snapshot(seq, line),
    }
}

/// A departure observation.
pub fn leave(seq: u64, species: Species, bowl: u32, line: &str) -> Observation {
    Observation {
        event: BowlEvent::Leave,
        species,
        bowl: BowlNumber(bowl),
        snapshot: snapshot(seq, line),
    }
}
