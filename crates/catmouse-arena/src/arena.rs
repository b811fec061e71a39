//! The bowl arena: admission control and invariant checking.

use std::fmt;
use std::sync::{Condvar, LockResult, Mutex, MutexGuard};

use catmouse_core::{
    ArenaSnapshot, BowlEvent, BowlNumber, ContractViolation, InitError, Observation,
    ObservationSink, Species,
};

use crate::config::{AdmissionPolicy, ArenaConfig};
use crate::guard::MealGuard;
use crate::metrics::ArenaMetrics;
use crate::sink::TracingSink;
use crate::state::ArenaState;

/// Record of a granted admission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    /// Who was admitted.
    pub species: Species,
    /// Where.
    pub bowl: BowlNumber,
    /// Whether the caller blocked before being admitted.
    pub waited: bool,
    /// Arena state immediately after the admission.
    pub snapshot: ArenaSnapshot,
}

impl Admission {
    /// Sequence number of the admission.
    pub fn seq(&self) -> u64 {
        self.snapshot.seq
    }
}

/// A fixed set of bowls shared by cats and mice.
///
/// All state lives behind one mutex (the gate). The arena guarantees,
/// at every instant the gate is free:
///
/// - cats and mice are never eating at the same time,
/// - no bowl has more than one occupant,
/// - each species counter equals the number of bowls holding that species.
///
/// `BowlArena` is `Send + Sync`; share it by reference (or `Arc`) with
/// every actor thread. It must outlive all of them.
pub struct BowlArena {
    gate: Mutex<ArenaState>,
    /// Signalled on every departure. Only waited on under
    /// [`AdmissionPolicy::Wait`].
    vacancy: Condvar,
    policy: AdmissionPolicy,
    bowl_count: usize,
    sink: Box<dyn ObservationSink>,
}

// Compile-time assertion: BowlArena must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<BowlArena>();
};

impl BowlArena {
    /// Create a strict arena with `bowl_count` empty bowls that reports
    /// to [`TracingSink`].
    pub fn new(bowl_count: usize) -> Result<Self, InitError> {
        Self::with_config(ArenaConfig::new(bowl_count), TracingSink)
    }

    /// Create an arena from a config, reporting to `sink`.
    pub fn with_config(
        config: ArenaConfig,
        sink: impl ObservationSink + 'static,
    ) -> Result<Self, InitError> {
        let state = ArenaState::new(config.bowl_count)?;
        tracing::debug!(
            bowls = config.bowl_count,
            policy = ?config.policy,
            "bowl arena created"
        );
        Ok(Self {
            gate: Mutex::new(state),
            vacancy: Condvar::new(),
            policy: config.policy,
            bowl_count: config.bowl_count,
            sink: Box::new(sink),
        })
    }

    /// Number of bowls.
    pub fn bowl_count(&self) -> usize {
        self.bowl_count
    }

    /// The admission policy chosen at construction.
    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Admit `species` to `bowl`.
    ///
    /// Under [`AdmissionPolicy::Wait`] this blocks until the bowl is empty
    /// and no member of the opposite species is eating.
    ///
    /// # Panics
    ///
    /// Panics on any [`ContractViolation`]: a bowl number outside
    /// `1..=bowl_count`, or (strict policy only) a request that cannot be
    /// admitted immediately. The message names the violated invariant.
    pub fn enter(&self, species: Species, bowl: BowlNumber) -> Admission {
        self.try_enter(species, bowl)
            .unwrap_or_else(|violation| fatal(&violation))
    }

    /// Non-panicking form of [`enter`](Self::enter).
    ///
    /// On `Err` the arena state is unchanged.
    pub fn try_enter(
        &self,
        species: Species,
        bowl: BowlNumber,
    ) -> Result<Admission, ContractViolation> {
        let mut state = self.lock();
        let index = state.index(species, bowl)?;
        let mut waited = false;
        loop {
            match state.check_admission(species, index) {
                Ok(()) => break,
                Err(violation) => match self.policy {
                    AdmissionPolicy::Strict => return Err(violation),
                    AdmissionPolicy::Wait => {
                        waited = true;
                        state = recover(self.vacancy.wait(state));
                    }
                },
            }
        }
        let snapshot = state.admit(species, index, waited);
        self.emit(BowlEvent::Enter, species, bowl, &snapshot);
        drop(state);
        Ok(Admission {
            species,
            bowl,
            waited,
            snapshot,
        })
    }

    /// Record that `species` finished eating at `bowl`.
    ///
    /// # Panics
    ///
    /// Panics if the bowl number is out of range, the bowl does not hold
    /// `species`, or no member of `species` is eating.
    pub fn leave(&self, species: Species, bowl: BowlNumber) -> ArenaSnapshot {
        self.try_leave(species, bowl)
            .unwrap_or_else(|violation| fatal(&violation))
    }

    /// Non-panicking form of [`leave`](Self::leave).
    ///
    /// On `Err` the arena state is unchanged.
    pub fn try_leave(
        &self,
        species: Species,
        bowl: BowlNumber,
    ) -> Result<ArenaSnapshot, ContractViolation> {
        let mut state = self.lock();
        let index = state.index(species, bowl)?;
        state.check_departure(species, index)?;
        let snapshot = state.depart(species, index);
        self.emit(BowlEvent::Leave, species, bowl, &snapshot);
        if self.policy == AdmissionPolicy::Wait {
            // Waiters for other bowls and the other species all need to
            // re-test their predicate.
            self.vacancy.notify_all();
        }
        Ok(snapshot)
    }

    /// Admit `species` to `bowl` and return a guard that leaves on drop.
    ///
    /// # Panics
    ///
    /// Same conditions as [`enter`](Self::enter).
    pub fn occupy(&self, species: Species, bowl: BowlNumber) -> MealGuard<'_> {
        let admission = self.enter(species, bowl);
        MealGuard::new(self, admission)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ArenaSnapshot {
        self.lock().snapshot()
    }

    /// A copy of the cumulative counters.
    pub fn metrics(&self) -> ArenaMetrics {
        self.lock().metrics().clone()
    }

    /// Whether the gate was poisoned by a panic inside it.
    pub fn is_poisoned(&self) -> bool {
        self.gate.is_poisoned()
    }

    fn lock(&self) -> MutexGuard<'_, ArenaState> {
        recover(self.gate.lock())
    }

    fn emit(&self, event: BowlEvent, species: Species, bowl: BowlNumber, snapshot: &ArenaSnapshot) {
        self.sink.observe(&Observation {
            event,
            species,
            bowl,
            snapshot: snapshot.clone(),
        });
    }
}

impl fmt::Debug for BowlArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BowlArena")
            .field("bowl_count", &self.bowl_count)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// A poisoned gate means a thread panicked mid-update; the state can no
/// longer be trusted.
fn recover<T>(result: LockResult<T>) -> T {
    result.unwrap_or_else(|_| {
        tracing::error!("bowl arena gate poisoned by a panic inside the critical section");
        panic!("bowl arena gate poisoned: arena state can no longer be trusted")
    })
}

fn fatal(violation: &ContractViolation) -> ! {
    tracing::error!(
        species = %violation.species(),
        bowl = violation.bowl().0,
        "{violation}"
    );
    panic!("{violation}")
}
