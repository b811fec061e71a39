//! Multi-threaded actor driver.
//!
//! One named OS thread per cat (`cat-{i}`) and mouse (`mouse-{i}`), all
//! borrowing a single [`Simulation`] inside [`std::thread::scope`]. Each
//! actor runs `iterations` cycles of: rest, choose a bowl, eat.
//!
//! Bowl choices come from a per-actor [`ChaCha8Rng`] seeded from the run
//! seed, the species and the actor index, so every actor's sequence of
//! bowls is reproducible. The interleaving between actors is not.

use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use catmouse_arena::ChannelSink;
use catmouse_core::{BowlNumber, Clock, InitError, Observation, ObservationSink, Species};

use crate::clock::TickClock;
use crate::config::{ConfigError, SimConfig};
use crate::simulation::{Simulation, TeardownReport};

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Wall-clock time from the first spawn to the last join.
    pub elapsed: Duration,
    /// Arena state at teardown.
    pub teardown: TeardownReport,
    /// Meals completed by all cats.
    pub cat_meals: u64,
    /// Meals completed by all mice.
    pub mouse_meals: u64,
    /// Meals whose admission had to wait.
    pub waited_meals: u64,
}

impl RunReport {
    /// Meals completed by one species.
    pub fn meals(&self, species: Species) -> u64 {
        match species {
            Species::Cat => self.cat_meals,
            Species::Mouse => self.mouse_meals,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ActorTally {
    meals: u64,
    waited: u64,
}

/// Run `config` with a [`TickClock`] of `config.tick`, reporting to `sink`.
pub fn run_simulation(
    config: &SimConfig,
    sink: impl ObservationSink + 'static,
) -> Result<RunReport, ConfigError> {
    run_with(config, TickClock::new(config.tick), sink)
}

/// Run `config` and collect every observation, in emission order.
///
/// Observations are emitted inside the arena gate, so channel order is
/// `seq` order.
pub fn run_traced(config: &SimConfig) -> Result<(RunReport, Vec<Observation>), ConfigError> {
    let (sink, rx) = ChannelSink::unbounded();
    let report = run_simulation(config, sink)?;
    Ok((report, rx.try_iter().collect()))
}

/// Run `config` with an injected clock.
///
/// `config.tick` is ignored; `clock` decides how long each phase takes.
pub fn run_with(
    config: &SimConfig,
    clock: impl Clock + 'static,
    sink: impl ObservationSink + 'static,
) -> Result<RunReport, ConfigError> {
    config.validate()?;
    let sim = Simulation::with_parts(config.arena_config(), clock, sink)?;
    let bowls = u32::try_from(config.bowls).map_err(|_| InitError::TooManyBowls {
        requested: config.bowls,
    })?;

    tracing::info!(
        bowls = config.bowls,
        cats = config.cats,
        mice = config.mice,
        iterations = config.iterations,
        policy = ?config.policy,
        "simulation starting"
    );
    let start = Instant::now();
    let tallies = spawn_actors(&sim, config, bowls)?;
    let elapsed = start.elapsed();

    let mut report = RunReport {
        elapsed,
        teardown: sim.teardown(),
        cat_meals: 0,
        mouse_meals: 0,
        waited_meals: 0,
    };
    for (species, tally) in tallies {
        match species {
            Species::Cat => report.cat_meals += tally.meals,
            Species::Mouse => report.mouse_meals += tally.meals,
        }
        report.waited_meals += tally.waited;
    }
    tracing::info!(
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        cat_meals = report.cat_meals,
        mouse_meals = report.mouse_meals,
        waited = report.waited_meals,
        balanced = report.teardown.balanced,
        "simulation finished"
    );
    Ok(report)
}

/// Spawn every actor, then join every handle that was spawned.
///
/// Handles are joined explicitly so that a panicked actor becomes
/// `ActorPanicked` instead of propagating out of the scope. A spawn failure
/// stops further spawning; actors already running are still joined.
fn spawn_actors(
    sim: &Simulation,
    config: &SimConfig,
    bowls: u32,
) -> Result<Vec<(Species, ActorTally)>, ConfigError> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(config.cats + config.mice);
        let mut spawn_error = None;

        'spawn: for species in Species::ALL {
            for index in 0..config.count(species) {
                let name = format!("{}-{index}", species.name());
                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || actor_loop(sim, config, species, index, bowls));
                match spawned {
                    Ok(handle) => handles.push((name, species, handle)),
                    Err(e) => {
                        tracing::error!(actor = %name, "failed to spawn actor thread: {e}");
                        spawn_error = Some(ConfigError::ThreadSpawnFailed {
                            reason: format!("{name}: {e}"),
                        });
                        break 'spawn;
                    }
                }
            }
        }

        let mut tallies = Vec::with_capacity(handles.len());
        let mut panicked = None;
        for (name, species, handle) in handles {
            match handle.join() {
                Ok(tally) => tallies.push((species, tally)),
                Err(_) => {
                    tracing::error!(actor = %name, "actor thread panicked");
                    panicked.get_or_insert(ConfigError::ActorPanicked { actor: name });
                }
            }
        }

        match spawn_error.or(panicked) {
            Some(err) => Err(err),
            None => Ok(tallies),
        }
    })
}

fn actor_loop(
    sim: &Simulation,
    config: &SimConfig,
    species: Species,
    index: usize,
    bowls: u32,
) -> ActorTally {
    let mut rng = ChaCha8Rng::seed_from_u64(actor_seed(config.seed, species, index));
    let eat_ticks = config.eat_ticks(species);
    let sleep_ticks = config.sleep_ticks(species);
    let mut tally = ActorTally::default();
    for _ in 0..config.iterations {
        sim.rest(species, sleep_ticks);
        let bowl = BowlNumber(rng.random_range(1..=bowls));
        let meal = sim.eat(species, bowl, eat_ticks);
        tally.meals += 1;
        if meal.admission.waited {
            tally.waited += 1;
        }
    }
    tracing::trace!(%species, index, meals = tally.meals, "actor done");
    tally
}

/// Distinct, stable seed per actor.
fn actor_seed(seed: u64, species: Species, index: usize) -> u64 {
    let lane = match species {
        Species::Cat => 0x9E37_79B9_7F4A_7C15_u64,
        Species::Mouse => 0xC2B2_AE3D_27D4_EB4F_u64,
    };
    seed ^ lane.wrapping_mul(index as u64 + 1)
}
