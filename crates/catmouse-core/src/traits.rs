//! Traits for the collaborators the arena consumes but does not own.

use crate::snapshot::Observation;

/// Simulated-time delay used for eating and resting.
///
/// Implementations must not touch the arena: a delay is always performed
/// with the gate released.
pub trait Clock: Send + Sync {
    /// Suspend the calling thread for `ticks` simulated ticks.
    fn delay(&self, ticks: u32);
}

/// Receiver for the observation stream.
///
/// The arena calls [`observe`](ObservationSink::observe) while holding its
/// gate, so observations arrive in gate-acquisition order and never
/// interleave. Implementations must be quick and must not call back into
/// the arena.
pub trait ObservationSink: Send + Sync {
    /// Record one observation.
    fn observe(&self, observation: &Observation);
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn delay(&self, ticks: u32) {
        (**self).delay(ticks);
    }
}

impl<T: ObservationSink + ?Sized> ObservationSink for std::sync::Arc<T> {
    fn observe(&self, observation: &Observation) {
        (**self).observe(observation);
    }
}
