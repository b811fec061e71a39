//! Stress test: species exclusivity under heavy contention.
//!
//! Many cats and mice cycle through a handful of bowls with no delay, so
//! every admission races with others. The full observation stream is
//! replayed through [`TraceChecker`]: every snapshot must have at most one
//! species eating, counters must match occupancy, every bowl must follow
//! `Empty -> occupant -> Empty`, and the arena must end balanced.

use catmouse_arena::{AdmissionPolicy, ChannelSink};
use catmouse_core::{Observation, Species};
use catmouse_engine::{run_with, InstantClock, SimConfig, TraceChecker};

fn contended(cats: usize, mice: usize, bowls: usize, iterations: u32) -> SimConfig {
    SimConfig {
        bowls,
        cats,
        mice,
        iterations,
        policy: AdmissionPolicy::Wait,
        seed: 0x5EED,
        ..SimConfig::default()
    }
}

fn run_and_collect(config: &SimConfig) -> (catmouse_engine::RunReport, Vec<Observation>) {
    let (sink, rx) = ChannelSink::unbounded();
    let report = run_with(config, InstantClock, sink).expect("run should succeed");
    (report, rx.try_iter().collect())
}

#[test]
fn species_never_mix_across_many_bowls() {
    let config = contended(6, 6, 4, 1000);
    let (report, trace) = run_and_collect(&config);

    assert_eq!(report.cat_meals, 6 * 1000);
    assert_eq!(report.mouse_meals, 6 * 1000);
    assert_eq!(trace.len(), 2 * 12 * 1000);

    for observation in &trace {
        let snap = &observation.snapshot;
        assert!(
            snap.active_cats == 0 || snap.active_mice == 0,
            "seq {}: {} cats and {} mice eating",
            snap.seq,
            snap.active_cats,
            snap.active_mice
        );
    }

    let summary = TraceChecker::check_all(config.bowls, &trace).expect("trace should be clean");
    assert_eq!(summary.meals(Species::Cat), 6000);
    assert_eq!(summary.meals(Species::Mouse), 6000);
    assert!(summary.peak_cats <= config.bowls);
    assert!(summary.peak_mice <= config.bowls);
}

#[test]
fn arena_is_balanced_after_all_actors_finish() {
    let config = contended(4, 4, 3, 500);
    let (report, trace) = run_and_collect(&config);

    let teardown = &report.teardown;
    assert!(teardown.balanced);
    assert_eq!(teardown.snapshot.active_cats, 0);
    assert_eq!(teardown.snapshot.active_mice, 0);
    assert_eq!(teardown.snapshot.occupancy_line(), "---");
    assert_eq!(teardown.snapshot.seq, trace.len() as u64);
    assert_eq!(
        teardown.metrics.admissions(Species::Cat),
        teardown.metrics.departures(Species::Cat)
    );
    assert_eq!(
        teardown.metrics.admissions(Species::Mouse),
        teardown.metrics.departures(Species::Mouse)
    );
}

#[test]
fn unequal_populations_still_exclude() {
    let config = contended(1, 12, 6, 800);
    let (_report, trace) = run_and_collect(&config);
    TraceChecker::check_all(config.bowls, &trace).expect("trace should be clean");
}

#[test]
#[ignore] // Resource-intensive test
fn species_never_mix_at_scale() {
    let config = contended(64, 64, 16, 10_000);
    let (report, trace) = run_and_collect(&config);
    assert!(report.teardown.balanced);
    TraceChecker::check_all(config.bowls, &trace).expect("trace should be clean");
}
