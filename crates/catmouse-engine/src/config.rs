//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] describes one harness run: how many bowls, cats and mice,
//! how many rest/eat cycles each actor performs, and how long each phase
//! lasts. [`validate()`](SimConfig::validate) checks structural invariants
//! before any thread is spawned.

use std::time::Duration;

use catmouse_arena::{AdmissionPolicy, ArenaConfig};
use catmouse_core::{InitError, Species};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SimConfig`] or running it.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Arena construction failed.
    #[error("arena: {0}")]
    Init(#[from] InitError),
    /// Neither cats nor mice were requested.
    #[error("no actors: at least one cat or mouse is required")]
    NoActors,
    /// More actor threads than the harness will spawn.
    #[error("{requested} actors requested, maximum is {max}")]
    TooManyActors {
        /// Cats plus mice.
        requested: usize,
        /// The limit, [`SimConfig::MAX_ACTORS`].
        max: usize,
    },
    /// An actor thread could not be spawned.
    #[error("thread spawn failed: {reason}")]
    ThreadSpawnFailed {
        /// Which thread, and the OS error.
        reason: String,
    },
    /// An actor thread panicked, most likely on a contract violation.
    #[error("actor {actor} panicked")]
    ActorPanicked {
        /// Thread name of the failed actor.
        actor: String,
    },
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for a harness run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of bowls. Default: 5.
    pub bowls: usize,
    /// Number of cat threads. Default: 2.
    pub cats: usize,
    /// Number of mouse threads. Default: 2.
    pub mice: usize,
    /// Rest/eat cycles per actor. Default: 4.
    pub iterations: u32,
    /// Ticks a cat spends eating. Default: 1.
    pub cat_eat_ticks: u32,
    /// Ticks a cat spends resting before each meal. Default: 1.
    pub cat_sleep_ticks: u32,
    /// Ticks a mouse spends eating. Default: 1.
    pub mouse_eat_ticks: u32,
    /// Ticks a mouse spends resting before each meal. Default: 1.
    pub mouse_sleep_ticks: u32,
    /// Wall-clock length of one tick. Default: 1 ms.
    pub tick: Duration,
    /// Seed for each actor's bowl choices. Default: 0.
    pub seed: u64,
    /// Admission policy. Default: [`AdmissionPolicy::Wait`]; the strict
    /// policy only survives a run whose actors never collide.
    pub policy: AdmissionPolicy,
}

impl SimConfig {
    /// Upper bound on `cats + mice`.
    pub const MAX_ACTORS: usize = 1024;

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. At least one bowl; the arena checks the upper bound.
        if self.bowls == 0 {
            return Err(InitError::ZeroBowls.into());
        }
        // 2. At least one actor.
        let actors = self.cats.saturating_add(self.mice);
        if actors == 0 {
            return Err(ConfigError::NoActors);
        }
        // 3. Bounded thread count.
        if actors > Self::MAX_ACTORS {
            return Err(ConfigError::TooManyActors {
                requested: actors,
                max: Self::MAX_ACTORS,
            });
        }
        Ok(())
    }

    /// Number of actors of one species.
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Cat => self.cats,
            Species::Mouse => self.mice,
        }
    }

    /// Eating time for one species, in ticks.
    pub fn eat_ticks(&self, species: Species) -> u32 {
        match species {
            Species::Cat => self.cat_eat_ticks,
            Species::Mouse => self.mouse_eat_ticks,
        }
    }

    /// Resting time for one species, in ticks.
    pub fn sleep_ticks(&self, species: Species) -> u32 {
        match species {
            Species::Cat => self.cat_sleep_ticks,
            Species::Mouse => self.mouse_sleep_ticks,
        }
    }

    /// The arena configuration this run needs.
    pub fn arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            bowl_count: self.bowls,
            policy: self.policy,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bowls: 5,
            cats: 2,
            mice: 2,
            iterations: 4,
            cat_eat_ticks: 1,
            cat_sleep_ticks: 1,
            mouse_eat_ticks: 1,
            mouse_sleep_ticks: 1,
            tick: Duration::from_millis(1),
            seed: 0,
            policy: AdmissionPolicy::Wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_bowls_rejected() {
        let config = SimConfig {
            bowls: 0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Init(InitError::ZeroBowls))
        );
    }

    #[test]
    fn no_actors_rejected() {
        let config = SimConfig {
            cats: 0,
            mice: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoActors));
    }

    #[test]
    fn cats_only_is_valid() {
        let config = SimConfig {
            mice: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn too_many_actors_rejected() {
        let config = SimConfig {
            cats: SimConfig::MAX_ACTORS,
            mice: 1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyActors {
                requested: SimConfig::MAX_ACTORS + 1,
                max: SimConfig::MAX_ACTORS,
            })
        );
    }

    #[test]
    fn per_species_accessors() {
        let config = SimConfig {
            cats: 3,
            mice: 7,
            cat_eat_ticks: 2,
            mouse_sleep_ticks: 9,
            ..SimConfig::default()
        };
        assert_eq!(config.count(Species::Cat), 3);
        assert_eq!(config.count(Species::Mouse), 7);
        assert_eq!(config.eat_ticks(Species::Cat), 2);
        assert_eq!(config.sleep_ticks(Species::Mouse), 9);
        assert_eq!(config.arena_config().bowl_count, 5);
    }
}
