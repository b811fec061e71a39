//! Criterion benchmark: full harness runs at the reference and stress
//! profiles.

use std::hint::black_box;

use catmouse_arena::NullSink;
use catmouse_bench::{reference_profile, stress_profile};
use catmouse_engine::{run_with, InstantClock};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_reference_run(c: &mut Criterion) {
    let config = reference_profile(42, 100);
    c.bench_function("reference_run_4_actors_100_meals", |b| {
        b.iter(|| black_box(run_with(&config, InstantClock, NullSink).unwrap()));
    });
}

fn bench_stress_run(c: &mut Criterion) {
    let config = stress_profile(42, 100);
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("stress_run_32_actors_100_meals", |b| {
        b.iter(|| black_box(run_with(&config, InstantClock, NullSink).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_reference_run, bench_stress_run);
criterion_main!(benches);
