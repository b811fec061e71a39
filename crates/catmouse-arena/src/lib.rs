//! Mutex-gated bowl arena enforcing cat/mouse mutual exclusion.
//!
//! [`BowlArena`] owns every piece of shared simulation state behind a
//! single gate:
//!
//! ```text
//! BowlArena
//! ├── gate: Mutex<ArenaState>
//! │   ├── occupancy: Vec<Occupant>   (bowl i+1 at index i)
//! │   ├── active_cats / active_mice
//! │   ├── seq                        (observation sequence number)
//! │   └── ArenaMetrics
//! ├── vacancy: Condvar               (waiting policy only)
//! └── sink: Box<dyn ObservationSink> (called inside the gate)
//! ```
//!
//! # Admission policies
//!
//! - **Strict:** a request that cannot be satisfied immediately is a
//!   contract violation and is fatal. The caller is responsible for never
//!   issuing overlapping requests; the arena only detects violations.
//! - **Wait:** a request that cannot be satisfied blocks on `vacancy` and
//!   re-tests `(bowl is empty) && (opposite species count == 0)` on every
//!   wake. Wake order between species is unspecified.
//!
//! Eating and resting always happen with the gate released.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod guard;
pub mod metrics;
pub mod sink;
mod state;

pub use arena::{Admission, BowlArena};
pub use config::{AdmissionPolicy, ArenaConfig};
pub use guard::MealGuard;
pub use metrics::ArenaMetrics;
pub use sink::{ChannelSink, LineSink, NullSink, TracingSink};
