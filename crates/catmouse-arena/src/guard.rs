//! RAII admission guard.

use catmouse_core::{ArenaSnapshot, BowlNumber, Species};

use crate::arena::{Admission, BowlArena};

/// An admitted actor's claim on a bowl.
///
/// Created by [`BowlArena::occupy`]. Dropping the guard leaves the bowl;
/// [`finish`](MealGuard::finish) does the same and returns the resulting
/// state. Hold the guard across the eating delay, never across another
/// arena call for the same bowl.
#[must_use = "dropping a MealGuard immediately ends the meal"]
pub struct MealGuard<'a> {
    arena: &'a BowlArena,
    admission: Admission,
    finished: bool,
}

impl<'a> MealGuard<'a> {
    pub(crate) fn new(arena: &'a BowlArena, admission: Admission) -> Self {
        Self {
            arena,
            admission,
            finished: false,
        }
    }

    /// The admission that created this guard.
    pub fn admission(&self) -> &Admission {
        &self.admission
    }

    /// The species eating.
    pub fn species(&self) -> Species {
        self.admission.species
    }

    /// The bowl being eaten from.
    pub fn bowl(&self) -> BowlNumber {
        self.admission.bowl
    }

    /// Leave the bowl now.
    pub fn finish(mut self) -> ArenaSnapshot {
        self.finished = true;
        self.arena.leave(self.admission.species, self.admission.bowl)
    }
}

impl Drop for MealGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let (species, bowl) = (self.admission.species, self.admission.bowl);
        if !std::thread::panicking() {
            self.arena.leave(species, bowl);
            return;
        }
        // Unwinding: a second panic would abort, so report instead.
        if self.arena.is_poisoned() {
            tracing::error!(%species, bowl = bowl.0, "meal abandoned: arena gate poisoned");
        } else if let Err(violation) = self.arena.try_leave(species, bowl) {
            tracing::error!(%species, bowl = bowl.0, "meal abandoned: {violation}");
        }
    }
}
