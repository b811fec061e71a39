//! Core types and traits for the cat/mouse bowl arena.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena, the engine and the tests:
//! species and bowl identifiers, state snapshots, observations, error
//! types, and the traits through which external collaborators (delay
//! clock, observation stream) are consumed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod snapshot;
pub mod traits;

pub use error::{ContractViolation, InitError, InvariantBreach};
pub use id::{BowlNumber, Occupant, Species};
pub use snapshot::{ArenaSnapshot, BowlEvent, Observation, Occupancy};
pub use traits::{Clock, ObservationSink};
