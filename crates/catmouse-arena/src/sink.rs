//! Observation sinks.
//!
//! - [`TracingSink`]: the default; one `info` event per observation.
//! - [`ChannelSink`]: structured observations over a crossbeam channel,
//!   for trace-based tests that collect from many threads.
//! - [`LineSink`]: hands the rendered line to a closure.
//! - [`NullSink`]: discards everything.

use crossbeam_channel::{Receiver, Sender};

use catmouse_core::{Observation, ObservationSink};

/// Emits each observation as a `tracing` event on target `catmouse::bowls`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ObservationSink for TracingSink {
    fn observe(&self, observation: &Observation) {
        tracing::info!(
            target: "catmouse::bowls",
            seq = observation.seq(),
            species = %observation.species,
            bowl = observation.bowl.0,
            "{observation}"
        );
    }
}

/// Sends every observation down an unbounded crossbeam channel.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<Observation>,
}

impl ChannelSink {
    /// Create a sink and the receiver that collects from it.
    pub fn unbounded() -> (Self, Receiver<Observation>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    /// Wrap an existing sender.
    pub fn from_sender(tx: Sender<Observation>) -> Self {
        Self { tx }
    }
}

impl ObservationSink for ChannelSink {
    fn observe(&self, observation: &Observation) {
        // Best-effort: the collector may have stopped listening.
        let _ = self.tx.send(observation.clone());
    }
}

/// Passes the rendered observation line to a closure.
pub struct LineSink<F> {
    emit: F,
}

impl<F: Fn(&str) + Send + Sync> LineSink<F> {
    /// Create a sink around `emit`.
    pub fn new(emit: F) -> Self {
        Self { emit }
    }
}

impl<F: Fn(&str) + Send + Sync> ObservationSink for LineSink<F> {
    fn observe(&self, observation: &Observation) {
        (self.emit)(&observation.to_string());
    }
}

/// Discards observations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ObservationSink for NullSink {
    fn observe(&self, _observation: &Observation) {}
}
