//! Run the default harness: 5 bowls, 2 cats, 2 mice, 4 meals each.
//!
//! Observation lines are logged on target `catmouse::bowls`. Control
//! verbosity with `RUST_LOG`, e.g. `RUST_LOG=catmouse::bowls=info,warn`.

use catmouse_arena::TracingSink;
use catmouse_engine::{run_simulation, SimConfig, TraceChecker};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = SimConfig::default();
    let report = run_simulation(&config, TracingSink)?;
    println!(
        "{} cat meals, {} mouse meals ({} waited) in {:?}; balanced: {}",
        report.cat_meals,
        report.mouse_meals,
        report.waited_meals,
        report.elapsed,
        report.teardown.balanced
    );

    // Same configuration again, this time checking the full trace.
    let (_, trace) = catmouse_engine::run_traced(&config)?;
    let summary = TraceChecker::check_all(config.bowls, &trace)?;
    println!(
        "trace clean: {} observations, peak {} cats / {} mice",
        summary.observations, summary.peak_cats, summary.peak_mice
    );
    Ok(())
}
