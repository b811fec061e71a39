//! Simulation surface, actor driver and trace checking for the cat/mouse
//! bowl arena.
//!
//! - [`Simulation`]: the actor-facing surface (`init`, `cat_use`,
//!   `mouse_rest`, ..., `teardown`) over one [`BowlArena`](catmouse_arena::BowlArena).
//! - [`run_simulation`]: spawns one named thread per cat and mouse and
//!   drives them through seeded rest/eat cycles.
//! - [`TraceChecker`]: replays an observation stream and reports the first
//!   broken safety property.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod driver;
pub mod simulation;
pub mod trace;

pub use clock::{InstantClock, TickClock};
pub use config::{ConfigError, SimConfig};
pub use driver::{run_simulation, run_traced, run_with, RunReport};
pub use simulation::{Meal, Simulation, TeardownReport};
pub use trace::{TraceChecker, TraceSummary, TraceViolation};
