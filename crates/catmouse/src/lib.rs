//! Catmouse: cats and mice sharing a fixed set of bowls.
//!
//! Cats and mice are concurrent actors. Any number of one species may eat
//! at once, never both species, and never two actors at one bowl. This is
//! the facade crate that re-exports the public API of the sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use catmouse::prelude::*;
//!
//! let sim = Simulation::init(2).unwrap();
//! std::thread::scope(|s| {
//!     s.spawn(|| sim.cat_use(1, 0));
//!     s.spawn(|| sim.cat_use(2, 0));
//! });
//! let report = sim.teardown();
//! assert!(report.balanced);
//! assert_eq!(report.metrics.cat_admissions, 2);
//! ```
//!
//! The same thing with the waiting policy and random actors:
//!
//! ```rust
//! use catmouse::prelude::*;
//!
//! let config = SimConfig { iterations: 10, tick: std::time::Duration::ZERO, ..SimConfig::default() };
//! let (report, trace) = catmouse::engine::run_traced(&config).unwrap();
//! let summary = TraceChecker::check_all(config.bowls, &trace).unwrap();
//! assert_eq!(summary.meals(Species::Cat), report.cat_meals);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `catmouse-core` | IDs, snapshots, observations, errors, collaborator traits |
//! | [`arena`] | `catmouse-arena` | `BowlArena`, admission policies, sinks, metrics |
//! | [`engine`] | `catmouse-engine` | `Simulation`, clocks, driver, trace checker |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`catmouse-core`).
pub use catmouse_core as types;

/// The bowl arena (`catmouse-arena`).
///
/// [`arena::BowlArena`] is the synchronization kernel; observation sinks
/// and [`arena::ArenaMetrics`] live here too.
pub use catmouse_arena as arena;

/// Simulation surface and harness (`catmouse-engine`).
pub use catmouse_engine as engine;

/// Common imports for typical usage.
pub mod prelude {
    // Core types
    pub use catmouse_core::{
        ArenaSnapshot, BowlNumber, Clock, Observation, ObservationSink, Occupant, Species,
    };

    // Errors
    pub use catmouse_core::{ContractViolation, InitError};

    // Arena
    pub use catmouse_arena::{AdmissionPolicy, ArenaConfig, BowlArena, TracingSink};

    // Engine
    pub use catmouse_engine::{
        run_simulation, ConfigError, SimConfig, Simulation, TickClock, TraceChecker,
    };
}
