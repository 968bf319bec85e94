// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for the control core.
//!
//! All timing is expressed in milliseconds and converted to ticks against the tick rate of the
//! board's clock, so the same configuration works for any counter frequency.

use crate::protocol::Role;
use crate::time::Duration;

/// Tick rate of the DotBot's low-frequency timer.
pub const DEFAULT_TICK_HZ: u32 = 32_768;

/// Motion stops when no motion command has been received for this long.
pub const COMMAND_TIMEOUT_MS: u32 = 500;

/// Period of the liveness check.
pub const WATCHDOG_PERIOD_MS: u32 = 200;

/// Period of the advertisement beacon.
pub const BEACON_PERIOD_MS: u32 = 500;

/// Period of the supervisor keep-alive.
pub const HEARTBEAT_PERIOD_MS: u32 = 200;

/// Control core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub tick_hz: u32,
    pub command_timeout_ms: u32,
    pub watchdog_period_ms: u32,
    pub beacon_period_ms: u32,
    pub heartbeat_period_ms: u32,
    pub role: Role,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            command_timeout_ms: COMMAND_TIMEOUT_MS,
            watchdog_period_ms: WATCHDOG_PERIOD_MS,
            beacon_period_ms: BEACON_PERIOD_MS,
            heartbeat_period_ms: HEARTBEAT_PERIOD_MS,
            role: Role::DotBot,
        }
    }
}

impl Config {
    /// Set the tick rate of the clock driving the core.
    pub fn with_tick_hz(mut self, tick_hz: u32) -> Self {
        self.tick_hz = tick_hz;
        self
    }

    /// Set how long motion may go without a command before the watchdog stops it.
    pub fn with_command_timeout_ms(mut self, ms: u32) -> Self {
        self.command_timeout_ms = ms;
        self
    }

    /// Set the watchdog, beacon and heartbeat periods.
    pub fn with_periods_ms(mut self, watchdog: u32, beacon: u32, heartbeat: u32) -> Self {
        self.watchdog_period_ms = watchdog;
        self.beacon_period_ms = beacon;
        self.heartbeat_period_ms = heartbeat;
        self
    }

    /// Set the application role advertised in the beacon.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.millis(self.command_timeout_ms)
    }

    #[inline]
    pub fn watchdog_period(&self) -> Duration {
        self.millis(self.watchdog_period_ms)
    }

    #[inline]
    pub fn beacon_period(&self) -> Duration {
        self.millis(self.beacon_period_ms)
    }

    #[inline]
    pub fn heartbeat_period(&self) -> Duration {
        self.millis(self.heartbeat_period_ms)
    }

    /// Convert a millisecond interval to ticks of this configuration's clock.
    #[inline]
    pub fn millis(&self, ms: u32) -> Duration {
        Duration::from_millis(ms, self.tick_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_half_a_second_of_ticks() {
        let cfg = Config::default();
        assert_eq!(cfg.timeout().ticks(), 16_384);
        assert_eq!(cfg.watchdog_period().ticks(), 6_553);
    }

    #[test]
    fn builder_overrides() {
        let cfg = Config::default()
            .with_tick_hz(1_000)
            .with_command_timeout_ms(800)
            .with_periods_ms(100, 250, 50)
            .with_role(Role::SailBot);
        assert_eq!(cfg.timeout().ticks(), 800);
        assert_eq!(cfg.beacon_period().ticks(), 250);
        assert_eq!(cfg.heartbeat_period().ticks(), 50);
        assert_eq!(cfg.role, Role::SailBot);
    }
}
