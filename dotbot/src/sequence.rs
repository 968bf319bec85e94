// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Scripted, non-reactive motion sequences.
//!
//! A script is a list of timed [`Step`]s. The [`Sequencer`] is polled with the current time and
//! applies each step's action when the step begins; it never blocks, so the caller can keep
//! feeding the supervisor while the script runs. Steps are scheduled back to back from the time
//! the script started, so a late poll does not stretch the overall timing.
//!
//! Typical usage pattern:
//!
//! ```no_run
//! use dotbot::board::{Motors, StatusLed};
//! use dotbot::sequence::{Progress, Sequencer, SPIN};
//! use dotbot::time::Instant;
//!
//! fn run(now: impl Fn() -> Instant, motors: &mut impl Motors, led: &mut impl StatusLed) {
//!     let mut seq = Sequencer::new(SPIN, 32_768);
//!     while seq.poll(now(), motors, led) == Progress::Running {}
//! }
//! ```

use crate::board::{Motors, StatusLed};
use crate::control::WheelSpeeds;
use crate::time::{Duration, Instant, Periodic};

/// What a step does when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Toggle the status LED immediately and then every `period_ms`.
    Blink { period_ms: u32 },
    /// Drive the status LED to a fixed state.
    Led(bool),
    /// Command the wheels.
    Drive(WheelSpeeds),
}

/// One timed entry of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub duration_ms: u32,
}

impl Step {
    pub const fn blink(period_ms: u32, duration_ms: u32) -> Self {
        Self {
            action: Action::Blink { period_ms },
            duration_ms,
        }
    }

    pub const fn led(on: bool, duration_ms: u32) -> Self {
        Self {
            action: Action::Led(on),
            duration_ms,
        }
    }

    pub const fn drive(left: i8, right: i8, duration_ms: u32) -> Self {
        Self {
            action: Action::Drive(WheelSpeeds { left, right }),
            duration_ms,
        }
    }
}

/// Spin in place, stop, spin back, stop, framed by two seconds of blinking.
pub const SPIN: &[Step] = &[
    Step::blink(125, 2_000),
    Step::led(true, 1_000),
    Step::drive(-70, 70, 2_000),
    Step::drive(0, 0, 1_000),
    Step::drive(70, -70, 2_000),
    Step::drive(0, 0, 1_000),
    Step::blink(125, 2_000),
    Step::led(false, 0),
];

/// Whether the script still has steps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Finished,
}

/// Runs a script against a motor pair and a status LED.
pub struct Sequencer<'a> {
    script: &'a [Step],
    tick_hz: u32,
    index: usize,
    started: Option<Instant>,
    blink: Option<Periodic>,
}

impl<'a> Sequencer<'a> {
    /// Prepare `script` for a clock running at `tick_hz`. Nothing happens until the first poll.
    pub fn new(script: &'a [Step], tick_hz: u32) -> Self {
        Self {
            script,
            tick_hz,
            index: 0,
            started: None,
            blink: None,
        }
    }

    /// Index of the step currently running.
    #[inline]
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// Advance the script to `now`, applying the actions of every step that has begun.
    pub fn poll<M: Motors, L: StatusLed>(
        &mut self,
        now: Instant,
        motors: &mut M,
        led: &mut L,
    ) -> Progress {
        if self.started.is_none() {
            if self.index >= self.script.len() {
                return Progress::Finished;
            }
            self.enter(now, motors, led);
        }

        while let (Some(step), Some(started)) = (self.script.get(self.index), self.started) {
            let duration = Duration::from_millis(step.duration_ms, self.tick_hz);
            if now.elapsed_since(started) < duration {
                if let Some(blink) = self.blink.as_mut() {
                    if blink.poll(now) {
                        led.toggle();
                    }
                }
                return Progress::Running;
            }

            self.index += 1;
            self.blink = None;
            self.started = None;
            if self.index < self.script.len() {
                self.enter(started + duration, motors, led);
            }
        }

        log::info!("sequence finished");
        Progress::Finished
    }

    fn enter<M: Motors, L: StatusLed>(&mut self, at: Instant, motors: &mut M, led: &mut L) {
        let step = self.script[self.index];
        log::debug!("step {}: {:?} at {}", self.index, step.action, at);

        match step.action {
            Action::Blink { period_ms } => {
                led.toggle();
                let period = Duration::from_millis(period_ms, self.tick_hz);
                self.blink = Some(Periodic::new(period, at));
            }
            Action::Led(on) => led.set(on),
            Action::Drive(speeds) => motors.set_speed(speeds.left, speeds.right),
        }
        self.started = Some(at);
    }
}
