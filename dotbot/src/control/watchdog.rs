// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command liveness watchdog.
//!
//! The watchdog is a safety backstop, not a motor controller. Every accepted motion command calls
//! [`Watchdog::feed`]; a periodic [`Watchdog::check`] reports when the command stream has gone
//! stale so the caller can force the wheels to a stop.
//!
//! Typical usage pattern:
//!
//! ```no_run
//! # use dotbot::control::Watchdog;
//! # use dotbot::time::{Duration, Instant};
//! # let mut watchdog = Watchdog::new(Duration::from_ticks(16_384));
//! # let now = Instant::ZERO;
//! # fn stop_motors() {}
//! if watchdog.check(now) {
//!     stop_motors();
//! }
//! ```

use crate::time::{Duration, Instant};

const HALF_RANGE: Duration = Duration::from_ticks(u32::MAX / 2);

/// Watchdog state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WatchdogState {
    /// A motion command arrived recently enough; commanded speeds are honoured.
    Armed,

    /// Motion has been forced to a stop, or no motion command has arrived since boot.
    Stopped,
}

/// Staleness detector for the motion command stream.
#[derive(Debug, Clone)]
pub struct Watchdog {
    timeout: Duration,
    last_command: Instant,
    state: WatchdogState,
}

impl Watchdog {
    /// Create a watchdog that trips after `timeout` ticks without a motion command.
    ///
    /// Starts `Stopped`: the wheels are idle at boot, so there is nothing to stop until the first
    /// motion command arrives.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_command: Instant::ZERO,
            state: WatchdogState::Stopped,
        }
    }

    /// Record an accepted motion command at `now` and re-arm.
    pub fn feed(&mut self, now: Instant) {
        self.last_command = now;
        self.state = WatchdogState::Armed;
    }

    /// Run the periodic liveness check.
    ///
    /// Returns `true` exactly once per stale period: when armed and more than `timeout` ticks
    /// have elapsed since the last command. The caller must then stop the motors.
    pub fn check(&mut self, now: Instant) -> bool {
        match self.state {
            WatchdogState::Stopped => false,
            WatchdogState::Armed => {
                if self.is_stale(now) {
                    self.state = WatchdogState::Stopped;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Whether more than `timeout` ticks have passed since the last motion command.
    ///
    /// An elapsed interval of more than half the counter range is taken as `now` being slightly
    /// earlier than the last command, not as a very old one, and is never stale.
    #[inline]
    pub fn is_stale(&self, now: Instant) -> bool {
        let elapsed = now.elapsed_since(self.last_command);
        elapsed > self.timeout && elapsed <= HALF_RANGE
    }

    #[inline]
    pub fn state(&self) -> WatchdogState {
        self.state
    }

    /// Tick of the most recent motion command (zero before the first one).
    #[inline]
    pub fn last_command(&self) -> Instant {
        self.last_command
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_ticks(500);

    fn at(ticks: u32) -> Instant {
        Instant::from_ticks(ticks)
    }

    #[test]
    fn no_stop_before_first_command() {
        let mut wd = Watchdog::new(TIMEOUT);
        assert!(!wd.check(at(10_000)));
        assert_eq!(wd.state(), WatchdogState::Stopped);
    }

    #[test]
    fn trips_only_past_timeout() {
        let mut wd = Watchdog::new(TIMEOUT);
        wd.feed(at(1_000));
        assert!(!wd.check(at(1_500)));
        assert!(wd.check(at(1_501)));
        assert_eq!(wd.state(), WatchdogState::Stopped);
    }

    #[test]
    fn trips_once_until_fed_again() {
        let mut wd = Watchdog::new(TIMEOUT);
        wd.feed(at(0));
        assert!(wd.check(at(600)));
        assert!(!wd.check(at(800)));
        assert!(!wd.check(at(5_000)));

        wd.feed(at(5_000));
        assert_eq!(wd.state(), WatchdogState::Armed);
        assert!(!wd.check(at(5_200)));
        assert!(wd.check(at(5_600)));
    }

    #[test]
    fn latest_command_wins() {
        let mut wd = Watchdog::new(TIMEOUT);
        for t in [0, 100, 200, 300] {
            wd.feed(at(t));
        }
        assert!(!wd.check(at(700)));
        assert!(wd.check(at(801)));
    }

    #[test]
    fn time_just_before_last_command_is_not_stale() {
        let mut wd = Watchdog::new(TIMEOUT);
        wd.feed(at(1_000));
        assert!(!wd.check(at(999)));
        assert!(!wd.check(at(0)));
        assert_eq!(wd.state(), WatchdogState::Armed);
        assert!(wd.check(at(1_501)));
    }

    #[test]
    fn wraparound_is_not_stale() {
        let mut wd = Watchdog::new(TIMEOUT);
        wd.feed(at(u32::MAX - 100));
        assert!(!wd.check(at(200)));
        assert_eq!(wd.state(), WatchdogState::Armed);
        assert!(wd.check(at(400)));
    }
}
