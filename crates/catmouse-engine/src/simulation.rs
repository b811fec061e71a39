//! Actor-facing simulation surface.
//!
//! [`Simulation`] bundles one [`BowlArena`] with the delay collaborator.
//! Actors share it by reference and call `cat_use` / `mouse_use` (enter,
//! eat, leave) and `cat_rest` / `mouse_rest` (pure delay). The eating delay
//! always runs with the arena gate released.

use catmouse_arena::{Admission, AdmissionPolicy, ArenaConfig, ArenaMetrics, BowlArena, TracingSink};
use catmouse_core::{ArenaSnapshot, BowlNumber, Clock, InitError, ObservationSink, Species};

use crate::clock::TickClock;

/// Outcome of one enter/eat/leave cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meal {
    /// The admission that started the meal.
    pub admission: Admission,
    /// Arena state right after the actor left.
    pub finished: ArenaSnapshot,
}

/// Final state handed back by [`Simulation::teardown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeardownReport {
    /// Arena state at teardown.
    pub snapshot: ArenaSnapshot,
    /// Cumulative counters.
    pub metrics: ArenaMetrics,
    /// Whether every bowl was empty and both counters were zero.
    pub balanced: bool,
}

/// A bowl arena plus the clock its actors eat and rest by.
pub struct Simulation {
    arena: BowlArena,
    clock: Box<dyn Clock>,
}

// Compile-time assertion: Simulation must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Simulation>();
};

impl Simulation {
    /// Create a strict arena with `bowl_count` bowls, a 1 ms
    /// [`TickClock`] and the tracing sink.
    pub fn init(bowl_count: usize) -> Result<Self, InitError> {
        Self::with_parts(ArenaConfig::new(bowl_count), TickClock::default(), TracingSink)
    }

    /// Create a simulation with injected collaborators.
    pub fn with_parts(
        config: ArenaConfig,
        clock: impl Clock + 'static,
        sink: impl ObservationSink + 'static,
    ) -> Result<Self, InitError> {
        Ok(Self {
            arena: BowlArena::with_config(config, sink)?,
            clock: Box::new(clock),
        })
    }

    /// The underlying arena.
    pub fn arena(&self) -> &BowlArena {
        &self.arena
    }

    /// The arena's admission policy.
    pub fn policy(&self) -> AdmissionPolicy {
        self.arena.policy()
    }

    /// A cat eats from `bowl` for `eat_ticks`.
    ///
    /// # Panics
    ///
    /// Panics on a contract violation (see [`BowlArena::enter`]).
    pub fn cat_use(&self, bowl: u32, eat_ticks: u32) {
        self.eat(Species::Cat, BowlNumber(bowl), eat_ticks);
    }

    /// A mouse eats from `bowl` for `eat_ticks`.
    ///
    /// # Panics
    ///
    /// Panics on a contract violation (see [`BowlArena::enter`]).
    pub fn mouse_use(&self, bowl: u32, eat_ticks: u32) {
        self.eat(Species::Mouse, BowlNumber(bowl), eat_ticks);
    }

    /// A cat rests for `sleep_ticks`. Does not touch the arena.
    pub fn cat_rest(&self, sleep_ticks: u32) {
        self.rest(Species::Cat, sleep_ticks);
    }

    /// A mouse rests for `sleep_ticks`. Does not touch the arena.
    pub fn mouse_rest(&self, sleep_ticks: u32) {
        self.rest(Species::Mouse, sleep_ticks);
    }

    /// Enter `bowl`, eat for `eat_ticks` with the gate released, leave.
    pub fn eat(&self, species: Species, bowl: BowlNumber, eat_ticks: u32) -> Meal {
        let meal = self.arena.occupy(species, bowl);
        let admission = meal.admission().clone();
        self.clock.delay(eat_ticks);
        let finished = meal.finish();
        Meal {
            admission,
            finished,
        }
    }

    /// Rest for `sleep_ticks`.
    pub fn rest(&self, species: Species, sleep_ticks: u32) {
        tracing::trace!(%species, sleep_ticks, "resting");
        self.clock.delay(sleep_ticks);
    }

    /// Release the arena and report its final state.
    ///
    /// Every actor must have finished before teardown; taking `self` by
    /// value makes the borrow checker enforce that for scoped actors. An
    /// arena that is not balanced at this point is reported, not repaired.
    pub fn teardown(self) -> TeardownReport {
        let snapshot = self.arena.snapshot();
        let metrics = self.arena.metrics();
        let balanced = snapshot.is_balanced();
        if balanced {
            tracing::debug!(
                seq = snapshot.seq,
                cats = metrics.cat_admissions,
                mice = metrics.mouse_admissions,
                "bowl arena torn down"
            );
        } else {
            tracing::warn!(
                seq = snapshot.seq,
                occupancy = %snapshot.occupancy_line(),
                "bowl arena torn down with actors still eating"
            );
        }
        TeardownReport {
            snapshot,
            metrics,
            balanced,
        }
    }
}
