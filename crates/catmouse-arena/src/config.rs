//! Arena configuration parameters.

/// What the arena does with a request that cannot be admitted right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdmissionPolicy {
    /// Treat the request as a contract violation. Fatal.
    #[default]
    Strict,
    /// Block the caller until the bowl is free and the opposite species
    /// has left every bowl.
    Wait,
}

/// Configuration for a [`BowlArena`](crate::BowlArena).
///
/// Immutable after the arena is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of bowls. Must be at least 1.
    pub bowl_count: usize,
    /// Admission policy. Default: [`AdmissionPolicy::Strict`].
    pub policy: AdmissionPolicy,
}

impl ArenaConfig {
    /// Create a config for `bowl_count` bowls with the strict policy.
    pub fn new(bowl_count: usize) -> Self {
        Self {
            bowl_count,
            policy: AdmissionPolicy::Strict,
        }
    }

    /// Same config with the waiting policy.
    pub fn waiting(mut self) -> Self {
        self.policy = AdmissionPolicy::Wait;
        self
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_strict() {
        assert_eq!(ArenaConfig::new(4).policy, AdmissionPolicy::Strict);
        assert_eq!(ArenaConfig::default().bowl_count, 1);
    }

    #[test]
    fn waiting_keeps_bowl_count() {
        let config = ArenaConfig::new(3).waiting();
        assert_eq!(config.bowl_count, 3);
        assert_eq!(config.policy, AdmissionPolicy::Wait);
    }
}
