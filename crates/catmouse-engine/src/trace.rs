//! Offline checking of observation streams.
//!
//! [`TraceChecker`] replays observations in `seq` order and reports the
//! first property a stream breaks:
//!
//! - consecutive sequence numbers, starting at 1,
//! - whole-state invariants of every snapshot (species exclusivity and
//!   counter consistency),
//! - per-bowl legality: each bowl only moves `Empty -> Cat|Mouse -> Empty`,
//!   and only the named bowl changes per observation,
//! - balance at the end of the stream.

use indexmap::IndexMap;

use catmouse_core::{
    ArenaSnapshot, BowlEvent, BowlNumber, InvariantBreach, Observation, Occupancy, Occupant,
    Species,
};

/// The first property an observation stream broke.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TraceViolation {
    /// Observations are missing, duplicated, or out of order.
    #[error("sequence gap: expected seq {expected}, found {found}")]
    SequenceGap {
        /// The next sequence number the checker wanted.
        expected: u64,
        /// What the stream delivered.
        found: u64,
    },
    /// A snapshot was internally inconsistent.
    #[error("seq {seq}: {source}")]
    Breach {
        /// Sequence number of the offending snapshot.
        seq: u64,
        /// The breached invariant.
        #[source]
        source: InvariantBreach,
    },
    /// A snapshot had a different number of bowls than the arena.
    #[error("seq {seq}: snapshot has {found} bowls, arena has {expected}")]
    BowlCountChanged {
        /// Sequence number of the offending snapshot.
        seq: u64,
        /// The arena's bowl count.
        expected: usize,
        /// The snapshot's bowl count.
        found: usize,
    },
    /// The observed bowl does not exist.
    #[error("seq {seq}: invalid bowl number {bowl}")]
    BowlOutOfRange {
        /// Sequence number of the offending observation.
        seq: u64,
        /// The bowl it names.
        bowl: BowlNumber,
    },
    /// The named bowl did not make a legal transition for the event.
    #[error("seq {seq}: bowl {bowl} went '{from}' -> '{to}' on {species} {event:?}")]
    IllegalTransition {
        /// Sequence number of the offending observation.
        seq: u64,
        /// The bowl that moved.
        bowl: BowlNumber,
        /// Who acted.
        species: Species,
        /// Enter or leave.
        event: BowlEvent,
        /// Occupant before.
        from: Occupant,
        /// Occupant after.
        to: Occupant,
    },
    /// A bowl other than the observed one changed.
    #[error("seq {seq}: bowl {bowl} changed during an observation of bowl {observed}")]
    StrayChange {
        /// Sequence number of the offending observation.
        seq: u64,
        /// The bowl that should not have changed.
        bowl: BowlNumber,
        /// The bowl the observation names.
        observed: BowlNumber,
    },
    /// The stream ended with actors still eating.
    #[error("trace ended at seq {seq} with {active_cats} cat(s) and {active_mice} mouse/mice eating")]
    Unbalanced {
        /// Last sequence number seen.
        seq: u64,
        /// Cats still eating.
        active_cats: usize,
        /// Mice still eating.
        active_mice: usize,
    },
}

/// Per-bowl usage seen in a trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BowlUsage {
    /// Meals started by cats.
    pub cat_meals: u64,
    /// Meals started by mice.
    pub mouse_meals: u64,
}

/// What a clean trace contained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Observations checked.
    pub observations: u64,
    /// Most cats seen eating at once.
    pub peak_cats: usize,
    /// Most mice seen eating at once.
    pub peak_mice: usize,
    /// Usage per bowl, in order of first use.
    pub bowls: IndexMap<BowlNumber, BowlUsage>,
}

impl TraceSummary {
    /// Meals started by one species across all bowls.
    pub fn meals(&self, species: Species) -> u64 {
        self.bowls
            .values()
            .map(|usage| match species {
                Species::Cat => usage.cat_meals,
                Species::Mouse => usage.mouse_meals,
            })
            .sum()
    }
}

/// Incremental observation-stream checker.
#[derive(Debug)]
pub struct TraceChecker {
    state: ArenaSnapshot,
    summary: TraceSummary,
}

impl TraceChecker {
    /// A checker for an arena of `bowl_count` empty bowls.
    pub fn new(bowl_count: usize) -> Self {
        let occupancy: Occupancy = std::iter::repeat_n(Occupant::Empty, bowl_count).collect();
        Self {
            state: ArenaSnapshot {
                seq: 0,
                active_cats: 0,
                active_mice: 0,
                occupancy,
            },
            summary: TraceSummary::default(),
        }
    }

    /// Check a whole stream in one go.
    pub fn check_all<'a>(
        bowl_count: usize,
        observations: impl IntoIterator<Item = &'a Observation>,
    ) -> Result<TraceSummary, TraceViolation> {
        let mut checker = Self::new(bowl_count);
        for observation in observations {
            checker.feed(observation)?;
        }
        checker.finish()
    }

    /// The state after the last accepted observation.
    pub fn state(&self) -> &ArenaSnapshot {
        &self.state
    }

    /// Check the next observation. On `Err` the checker is unchanged.
    pub fn feed(&mut self, observation: &Observation) -> Result<(), TraceViolation> {
        let next = &observation.snapshot;
        let seq = next.seq;

        let expected = self.state.seq + 1;
        if seq != expected {
            return Err(TraceViolation::SequenceGap {
                expected,
                found: seq,
            });
        }
        let bowl_count = self.state.bowl_count();
        if next.bowl_count() != bowl_count {
            return Err(TraceViolation::BowlCountChanged {
                seq,
                expected: bowl_count,
                found: next.bowl_count(),
            });
        }
        next.check_invariants()
            .map_err(|source| TraceViolation::Breach { seq, source })?;

        let bowl = observation.bowl;
        let index = bowl
            .index(bowl_count)
            .ok_or(TraceViolation::BowlOutOfRange { seq, bowl })?;

        let before = self.state.occupancy.iter();
        let after = next.occupancy.iter();
        for (i, (old, new)) in before.zip(after).enumerate() {
            if i != index && old != new {
                return Err(TraceViolation::StrayChange {
                    seq,
                    bowl: BowlNumber::from_index(i),
                    observed: bowl,
                });
            }
        }

        let species = observation.species;
        let (from, to) = (self.state.occupancy[index], next.occupancy[index]);
        let legal = match observation.event {
            BowlEvent::Enter => from == Occupant::Empty && to == Occupant::from(species),
            BowlEvent::Leave => from == Occupant::from(species) && to == Occupant::Empty,
        };
        if !legal {
            return Err(TraceViolation::IllegalTransition {
                seq,
                bowl,
                species,
                event: observation.event,
                from,
                to,
            });
        }

        let summary = &mut self.summary;
        summary.observations += 1;
        summary.peak_cats = summary.peak_cats.max(next.active_cats);
        summary.peak_mice = summary.peak_mice.max(next.active_mice);
        if observation.event == BowlEvent::Enter {
            let usage = summary.bowls.entry(bowl).or_default();
            match species {
                Species::Cat => usage.cat_meals += 1,
                Species::Mouse => usage.mouse_meals += 1,
            }
        }
        self.state = next.clone();
        Ok(())
    }

    /// End of stream: the arena must be back to empty.
    pub fn finish(self) -> Result<TraceSummary, TraceViolation> {
        if !self.state.is_balanced() {
            return Err(TraceViolation::Unbalanced {
                seq: self.state.seq,
                active_cats: self.state.active_cats,
                active_mice: self.state.active_mice,
            });
        }
        Ok(self.summary)
    }
}

#[cfg(test)]
mod tests {
    use catmouse_arena::{ArenaConfig, BowlArena};
    use catmouse_test_utils::fixtures::{enter, leave, snapshot};
    use catmouse_test_utils::RecordingSink;
    use proptest::prelude::*;

    use super::*;

    const CAT: Species = Species::Cat;
    const MOUSE: Species = Species::Mouse;

    #[test]
    fn clean_trace_summarises() {
        let trace = [
            enter(1, CAT, 2, "-c-"),
            enter(2, CAT, 1, "cc-"),
            leave(3, CAT, 2, "c--"),
            leave(4, CAT, 1, "---"),
            enter(5, MOUSE, 3, "--m"),
            leave(6, MOUSE, 3, "---"),
        ];
        let summary = TraceChecker::check_all(3, &trace).unwrap();
        assert_eq!(summary.observations, 6);
        assert_eq!(summary.peak_cats, 2);
        assert_eq!(summary.peak_mice, 1);
        assert_eq!(summary.meals(CAT), 2);
        assert_eq!(summary.meals(MOUSE), 1);
        let order: Vec<u32> = summary.bowls.keys().map(|b| b.0).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn empty_trace_is_balanced() {
        let summary = TraceChecker::check_all(4, std::iter::empty()).unwrap();
        assert_eq!(summary.observations, 0);
    }

    #[test]
    fn gap_is_reported() {
        let trace = [enter(1, CAT, 1, "c"), leave(3, CAT, 1, "-")];
        assert_eq!(
            TraceChecker::check_all(1, &trace),
            Err(TraceViolation::SequenceGap {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn mixed_species_is_a_breach() {
        let trace = [enter(1, CAT, 1, "c-"), enter(2, MOUSE, 2, "cm")];
        assert!(matches!(
            TraceChecker::check_all(2, &trace),
            Err(TraceViolation::Breach {
                seq: 2,
                source: InvariantBreach::MixedSpecies { .. }
            })
        ));
    }

    #[test]
    fn double_occupancy_is_illegal() {
        let second = enter(2, CAT, 1, "c");
        let mut checker = TraceChecker::new(1);
        checker.feed(&enter(1, CAT, 1, "c")).unwrap();
        assert!(matches!(
            checker.feed(&second),
            Err(TraceViolation::IllegalTransition {
                from: Occupant::Cat,
                to: Occupant::Cat,
                ..
            })
        ));
        assert_eq!(checker.state().seq, 1);
    }

    #[test]
    fn leave_by_wrong_species_is_illegal() {
        let trace = [enter(1, CAT, 1, "c"), leave(2, MOUSE, 1, "-")];
        assert!(matches!(
            TraceChecker::check_all(1, &trace),
            Err(TraceViolation::IllegalTransition {
                species: Species::Mouse,
                event: BowlEvent::Leave,
                ..
            })
        ));
    }

    #[test]
    fn stray_change_is_reported() {
        let trace = [enter(1, CAT, 1, "cc")];
        assert_eq!(
            TraceChecker::check_all(2, &trace),
            Err(TraceViolation::StrayChange {
                seq: 1,
                bowl: BowlNumber(2),
                observed: BowlNumber(1),
            })
        );
    }

    #[test]
    fn counter_mismatch_is_a_breach() {
        let mut obs = enter(1, MOUSE, 1, "m-");
        obs.snapshot.active_mice = 2;
        assert!(matches!(
            TraceChecker::check_all(2, [&obs]),
            Err(TraceViolation::Breach {
                source: InvariantBreach::CounterMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn resized_snapshot_is_reported() {
        let obs = Observation {
            snapshot: snapshot(1, "c--"),
            ..enter(1, CAT, 1, "c-")
        };
        assert!(matches!(
            TraceChecker::check_all(2, [&obs]),
            Err(TraceViolation::BowlCountChanged {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn unbalanced_end_is_reported() {
        let trace = [enter(1, MOUSE, 2, "-m")];
        assert_eq!(
            TraceChecker::check_all(2, &trace),
            Err(TraceViolation::Unbalanced {
                seq: 1,
                active_cats: 0,
                active_mice: 1
            })
        );
    }

    #[test]
    fn violation_message_names_the_bowl() {
        let trace = [enter(1, CAT, 1, "c"), leave(2, MOUSE, 1, "-")];
        let err = TraceChecker::check_all(1, &trace).unwrap_err();
        assert_eq!(err.to_string(), "seq 2: bowl 1 went 'c' -> '-' on mouse Leave");
    }

    /// Replay random strict-arena traffic; skip requests the arena rejects.
    fn recorded_trace(bowls: usize, ops: &[(bool, u32, bool)]) -> Vec<Observation> {
        let sink = RecordingSink::new();
        let arena = BowlArena::with_config(ArenaConfig::new(bowls), sink.clone()).unwrap();
        for &(cat, bowl, enter) in ops {
            let species = if cat { CAT } else { MOUSE };
            let bowl = BowlNumber(bowl);
            if enter {
                let _ = arena.try_enter(species, bowl);
            } else {
                let _ = arena.try_leave(species, bowl);
            }
        }
        let rest = arena.snapshot();
        for (i, occupant) in rest.occupancy.iter().enumerate() {
            if let Some(species) = occupant.species() {
                arena.leave(species, BowlNumber::from_index(i));
            }
        }
        sink.observations()
    }

    proptest! {
        #[test]
        fn arena_traces_always_check_clean(
            bowls in 1usize..6,
            ops in proptest::collection::vec((any::<bool>(), 1u32..6, any::<bool>()), 0..120),
        ) {
            let trace = recorded_trace(bowls, &ops);
            let summary = TraceChecker::check_all(bowls, &trace).unwrap();
            prop_assert_eq!(summary.observations, trace.len() as u64);
            prop_assert_eq!(
                summary.meals(CAT) + summary.meals(MOUSE),
                trace.len() as u64 / 2
            );
        }

        #[test]
        fn dropping_any_observation_is_detected(
            bowls in 1usize..4,
            ops in proptest::collection::vec((any::<bool>(), 1u32..4, any::<bool>()), 1..60),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut trace = recorded_trace(bowls, &ops);
            prop_assume!(!trace.is_empty());
            trace.remove(pick.index(trace.len()));
            prop_assert!(TraceChecker::check_all(bowls, &trace).is_err());
        }
    }
}
