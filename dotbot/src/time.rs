// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tick-based time keeping.
//!
//! The tick counter is a free-running `u32` supplied by the board (see [`crate::board::Clock`]).
//! It is only ever compared and subtracted, and every subtraction is modular so a counter that
//! wraps past `u32::MAX` still produces the true elapsed interval.

use core::fmt;
use core::ops::Add;

/// A point on the tick counter.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Instant(u32);

impl Instant {
    /// The counter value at power-on.
    pub const ZERO: Instant = Instant(0);

    #[inline]
    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    #[inline]
    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Ticks elapsed from `earlier` to `self`, modulo 2^32.
    ///
    /// Valid as long as the true interval is shorter than one full counter period.
    #[inline]
    pub const fn elapsed_since(&self, earlier: Instant) -> Duration {
        Duration(self.0.wrapping_sub(earlier.0))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Self::Output {
        Instant(self.0.wrapping_add(rhs.0))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

/// A span of ticks.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Debug, Default, Hash)]
pub struct Duration(u32);

impl Duration {
    #[inline]
    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Convert milliseconds to ticks for a counter running at `tick_hz`, rounding down.
    ///
    /// Saturates at `u32::MAX` ticks.
    pub const fn from_millis(millis: u32, tick_hz: u32) -> Self {
        let ticks = (millis as u64 * tick_hz as u64) / 1_000;
        if ticks > u32::MAX as u64 {
            Self(u32::MAX)
        } else {
            Self(ticks as u32)
        }
    }

    #[inline]
    pub const fn ticks(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Δt={}", self.0)
    }
}

/// Fixed-period event source driven by polling with the current time.
///
/// `poll` reports at most one firing per call. If the caller falls behind by several periods the
/// missed firings collapse into one and the schedule is re-anchored at `now`.
#[derive(Clone, Copy, Debug)]
pub struct Periodic {
    period: Duration,
    last: Instant,
}

impl Periodic {
    /// Start a schedule whose first firing is one `period` after `start`.
    pub const fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            last: start,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` if a period has elapsed since the previous firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        let elapsed = now.elapsed_since(self.last);
        if elapsed < self.period {
            return false;
        }

        if elapsed.ticks() >= self.period.ticks().saturating_mul(2) {
            self.last = now;
        } else {
            self.last = self.last + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_across_wraparound_is_small() {
        let before = Instant::from_ticks(u32::MAX - 9);
        let after = Instant::from_ticks(20);
        assert_eq!(after.elapsed_since(before), Duration::from_ticks(30));
    }

    #[test]
    fn millis_conversion() {
        assert_eq!(Duration::from_millis(500, 32_768).ticks(), 16_384);
        assert_eq!(Duration::from_millis(200, 1_000_000).ticks(), 200_000);
        assert_eq!(Duration::from_millis(u32::MAX, u32::MAX).ticks(), u32::MAX);
    }

    #[test]
    fn periodic_fires_once_per_period() {
        let mut p = Periodic::new(Duration::from_ticks(100), Instant::ZERO);
        assert!(!p.poll(Instant::from_ticks(99)));
        assert!(p.poll(Instant::from_ticks(100)));
        assert!(!p.poll(Instant::from_ticks(150)));
        assert!(p.poll(Instant::from_ticks(210)));
        // Phase is kept: next firing at 300, not 310.
        assert!(p.poll(Instant::from_ticks(300)));
    }

    #[test]
    fn periodic_coalesces_missed_periods() {
        let mut p = Periodic::new(Duration::from_ticks(100), Instant::ZERO);
        assert!(p.poll(Instant::from_ticks(1_000)));
        assert!(!p.poll(Instant::from_ticks(1_050)));
        assert!(p.poll(Instant::from_ticks(1_100)));
    }

    #[test]
    fn periodic_survives_counter_wrap() {
        let start = Instant::from_ticks(u32::MAX - 49);
        let mut p = Periodic::new(Duration::from_ticks(100), start);
        assert!(!p.poll(Instant::from_ticks(40)));
        assert!(p.poll(Instant::from_ticks(50)));
    }
}
