// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command dispatch for the reactive DotBot application.
//!
//! [`Robot`] owns the single [`RobotState`] and the board collaborators. Interrupt sources are
//! turned into plain method calls by the entry point:
//!
//! | Event | Method |
//! | ----- | ------ |
//! | packet received | [`Robot::handle_packet`] |
//! | watchdog period | [`Robot::check_watchdog`] |
//! | beacon period | [`Robot::on_beacon_timer`] |
//! | main loop wake-up | [`Robot::flush_beacon`] |
//!
//! None of them block, and all of them are called from one execution context, so the state needs
//! no locking.

use core::fmt;

use crate::beacon::Beacon;
use crate::board::{Motors, RgbLed, StatusLed, Transport};
use crate::config::Config;
use crate::control::{Watchdog, WheelSpeeds};
use crate::protocol::{decode, Command};
use crate::time::Instant;

/// Factory-programmed identifier of this robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

/// Process-wide robot state.
#[derive(Debug)]
pub struct RobotState {
    watchdog: Watchdog,
    beacon: Beacon,
    device_id: DeviceId,
}

impl RobotState {
    pub fn new(device_id: DeviceId, config: &Config) -> Self {
        Self {
            watchdog: Watchdog::new(config.timeout()),
            beacon: Beacon::new(config.role),
            device_id,
        }
    }

    /// Tick of the last accepted motion command.
    #[inline]
    pub fn last_command_tick(&self) -> Instant {
        self.watchdog.last_command()
    }

    #[inline]
    pub fn beacon_pending(&self) -> bool {
        self.beacon.is_pending()
    }

    #[inline]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }
}

/// The reactive control core: decoder, handlers, watchdog and beacon wired to the board.
pub struct Robot<M, L, S, T> {
    state: RobotState,
    motors: M,
    rgb: L,
    status: S,
    transport: T,
}

impl<M, L, S, T> Robot<M, L, S, T>
where
    M: Motors,
    L: RgbLed,
    S: StatusLed,
    T: Transport,
{
    pub fn new(
        device_id: DeviceId,
        config: &Config,
        motors: M,
        rgb: L,
        status: S,
        transport: T,
    ) -> Self {
        log::info!(
            "dotbot {} up, role {:?}, timeout {}",
            device_id,
            config.role,
            config.timeout()
        );
        Self {
            state: RobotState::new(device_id, config),
            motors,
            rgb,
            status,
            transport,
        }
    }

    /// Decode one transport delivery and run its handler. Returns what was decoded.
    pub fn handle_packet(&mut self, bytes: &[u8], now: Instant) -> Command {
        let command = decode(bytes);
        self.dispatch(command, now);
        command
    }

    /// Run the handler for an already decoded command.
    pub fn dispatch(&mut self, command: Command, now: Instant) {
        match command {
            Command::MoveRaw {
                left_axis,
                right_axis,
            } => self.apply_motion(left_axis, right_axis, now),
            Command::SetColor { r, g, b } => self.apply_color(r, g, b),
            Command::Unknown => {}
        }
    }

    /// Motion handler: map the axes to wheel speeds and re-arm the watchdog.
    pub fn apply_motion(&mut self, left_axis: i8, right_axis: i8, now: Instant) {
        let speeds = WheelSpeeds::from_axes(left_axis, right_axis);
        log::debug!("move {} {} -> {:?}", left_axis, right_axis, speeds);
        self.motors.set_speed(speeds.left, speeds.right);
        self.state.watchdog.feed(now);
    }

    /// Indicator handler. Colour commands are not liveness signals and leave the watchdog alone.
    pub fn apply_color(&mut self, r: u8, g: u8, b: u8) {
        log::debug!("rgb {} {} {}", r, g, b);
        self.rgb.set_color(r, g, b);
    }

    /// Periodic liveness check. Stops the wheels and returns `true` if the command stream is
    /// stale.
    pub fn check_watchdog(&mut self, now: Instant) -> bool {
        if !self.state.watchdog.check(now) {
            return false;
        }
        log::warn!(
            "no motion command since {}, stopping at {}",
            self.state.watchdog.last_command(),
            now
        );
        let stop = WheelSpeeds::STOP;
        self.motors.set_speed(stop.left, stop.right);
        true
    }

    /// Beacon period: blink the status LED and mark a beacon as pending.
    pub fn on_beacon_timer(&mut self) {
        self.status.toggle();
        if !self.state.beacon.request() {
            log::trace!("beacon coalesced");
        }
    }

    /// Main loop: emit the pending beacon, if any. Returns `true` if one was sent or dropped.
    pub fn flush_beacon(&mut self) -> bool {
        match self.state.beacon.flush(&mut self.transport) {
            None => false,
            Some(Ok(())) => true,
            Some(Err(e)) => {
                log::warn!("beacon dropped: {:?}", e);
                true
            }
        }
    }

    #[inline]
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    #[inline]
    pub fn motors(&self) -> &M {
        &self.motors
    }

    #[inline]
    pub fn rgb(&self) -> &L {
        &self.rgb
    }

    #[inline]
    pub fn status_led(&self) -> &S {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NoRgbLed;

    #[derive(Default)]
    struct Wheels(Option<(i8, i8)>);

    impl Motors for Wheels {
        fn set_speed(&mut self, left: i8, right: i8) {
            self.0 = Some((left, right));
        }
    }

    #[derive(Default)]
    struct Blinker(bool);

    impl StatusLed for Blinker {
        fn set(&mut self, on: bool) {
            self.0 = on;
        }

        fn toggle(&mut self) {
            self.0 = !self.0;
        }
    }

    struct Silent;

    impl Transport for Silent {
        type Error = ();

        fn send(&mut self, _bytes: &[u8]) -> Result<(), ()> {
            Err(())
        }
    }

    fn robot() -> Robot<Wheels, NoRgbLed, Blinker, Silent> {
        Robot::new(
            DeviceId(0xDEAD_BEEF),
            &Config::default(),
            Wheels::default(),
            NoRgbLed,
            Blinker::default(),
            Silent,
        )
    }

    #[test]
    fn device_id_displays_as_hex() {
        assert_eq!(
            format!("{}", DeviceId(0x0123_4567_89AB_CDEF)),
            "0123456789ABCDEF"
        );
    }

    #[test]
    fn unknown_command_has_no_effect() {
        let mut r = robot();
        r.dispatch(Command::Unknown, Instant::from_ticks(7));
        assert_eq!(r.motors().0, None);
        assert_eq!(r.state().last_command_tick(), Instant::ZERO);
    }

    #[test]
    fn beacon_timer_blinks_and_flags() {
        let mut r = robot();
        r.on_beacon_timer();
        assert!(r.status_led().0);
        assert!(r.state().beacon_pending());
        r.on_beacon_timer();
        assert!(!r.status_led().0);

        // A failing transport still clears the flag.
        assert!(r.flush_beacon());
        assert!(!r.state().beacon_pending());
        assert!(!r.flush_beacon());
    }
}
