//! Delay collaborators.

use std::time::Duration;

use catmouse_core::Clock;

/// Sleeps the calling thread for `ticks × tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    tick: Duration,
}

impl TickClock {
    /// Default tick length: 1 ms.
    pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

    /// Create a clock with the given tick length.
    pub const fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Length of one tick.
    pub const fn tick(&self) -> Duration {
        self.tick
    }

    /// Wall-clock length of `ticks` ticks, saturating at `Duration::MAX`.
    pub fn span(&self, ticks: u32) -> Duration {
        self.tick.checked_mul(ticks).unwrap_or(Duration::MAX)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK)
    }
}

impl Clock for TickClock {
    fn delay(&self, ticks: u32) {
        let span = self.span(ticks);
        if span.is_zero() {
            std::thread::yield_now();
        } else {
            std::thread::sleep(span);
        }
    }
}

/// Never sleeps; yields so other actors still interleave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstantClock;

impl Clock for InstantClock {
    fn delay(&self, _ticks: u32) {
        std::thread::yield_now();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn span_scales_with_ticks() {
        let clock = TickClock::new(Duration::from_millis(2));
        assert_eq!(clock.span(0), Duration::ZERO);
        assert_eq!(clock.span(5), Duration::from_millis(10));
    }

    #[test]
    fn span_saturates() {
        let clock = TickClock::new(Duration::MAX);
        assert_eq!(clock.span(2), Duration::MAX);
    }

    #[test]
    fn delay_sleeps_at_least_the_span() {
        let clock = TickClock::new(Duration::from_millis(5));
        let start = Instant::now();
        clock.delay(2);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
