//! Test utilities and mock collaborators for catmouse development.
//!
//! Provides recording implementations of the collaborator traits
//! ([`ObservationSink`], [`Clock`]) and [`fixtures`] for building
//! snapshots and observations by hand.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use catmouse_core::{Clock, Observation, ObservationSink};

/// Records every observation in memory.
///
/// Cloning shares the underlying buffer, so keep one clone for
/// assertions and hand the other to the arena.
#[derive(Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<Observation>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All observations so far, in emission order.
    pub fn observations(&self) -> Vec<Observation> {
        self.seen.lock().unwrap().clone()
    }

    /// Rendered trace lines, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObservationSink for RecordingSink {
    fn observe(&self, observation: &Observation) {
        self.seen.lock().unwrap().push(observation.clone());
    }
}

/// Clock that never sleeps and counts the ticks it was asked for.
#[derive(Default)]
pub struct CountingClock {
    calls: AtomicU64,
    ticks: AtomicU64,
}

impl CountingClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `delay` calls.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Sum of all requested ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Clock for CountingClock {
    fn delay(&self, ticks: u32) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.ticks.fetch_add(u64::from(ticks), Ordering::Relaxed);
        std::thread::yield_now();
    }
}
