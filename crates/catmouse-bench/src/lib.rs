//! Benchmark profiles for the cat/mouse bowl arena.
//!
//! - [`reference_profile`]: the default harness shape with no delays
//! - [`stress_profile`]: many actors contending for few bowls

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use catmouse_arena::AdmissionPolicy;
use catmouse_engine::SimConfig;

/// 5 bowls, 2 cats, 2 mice, zero-length ticks.
pub fn reference_profile(seed: u64, iterations: u32) -> SimConfig {
    SimConfig {
        iterations,
        tick: Duration::ZERO,
        seed,
        policy: AdmissionPolicy::Wait,
        ..SimConfig::default()
    }
}

/// 4 bowls shared by 16 cats and 16 mice, zero-length ticks.
///
/// Same per-actor loop as [`reference_profile`] at 8x the actor count.
pub fn stress_profile(seed: u64, iterations: u32) -> SimConfig {
    SimConfig {
        bowls: 4,
        cats: 16,
        mice: 16,
        ..reference_profile(seed, iterations)
    }
}
