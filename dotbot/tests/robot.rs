// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! End-to-end behaviour of the control core against recording collaborators.

use std::cell::RefCell;
use std::rc::Rc;

use dotbot::board::{Motors, RgbLed, StatusLed, Supervisor, Transport};
use dotbot::heartbeat::Heartbeat;
use dotbot::protocol::messages::{ADVERTISEMENT, CMD_MOVE_RAW, CMD_RGB_LED};
use dotbot::time::{Instant, Periodic};
use dotbot::{Command, Config, DeviceId, Robot};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Speed(i8, i8),
    Color(u8, u8, u8),
    Toggle,
    Send(Vec<u8>),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct Recorder(Log);

impl Motors for Recorder {
    fn set_speed(&mut self, left: i8, right: i8) {
        self.0.borrow_mut().push(Call::Speed(left, right));
    }
}

impl RgbLed for Recorder {
    fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.0.borrow_mut().push(Call::Color(r, g, b));
    }
}

impl StatusLed for Recorder {
    fn set(&mut self, _on: bool) {}

    fn toggle(&mut self) {
        self.0.borrow_mut().push(Call::Toggle);
    }
}

impl Transport for Recorder {
    type Error = core::convert::Infallible;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Call::Send(bytes.to_vec()));
        Ok(())
    }
}

/// Test clock at 1 kHz so that ticks read as milliseconds.
const HZ: u32 = 1_000;

struct Harness {
    log: Log,
    robot: Robot<Recorder, Recorder, Recorder, Recorder>,
}

impl Harness {
    fn new() -> Self {
        let log: Log = Rc::default();
        let robot = Robot::new(
            DeviceId(0x0011_2233_4455_6677),
            &Config::default().with_tick_hz(HZ),
            Recorder(log.clone()),
            Recorder(log.clone()),
            Recorder(log.clone()),
            Recorder(log.clone()),
        );
        Self { log, robot }
    }

    fn take(&self) -> Vec<Call> {
        self.log.borrow_mut().drain(..).collect()
    }

    fn packet(&mut self, bytes: &[u8], t: u32) -> Command {
        self.robot.handle_packet(bytes, Instant::from_ticks(t))
    }

    /// Run the watchdog every 200 ticks over `(from, to]`.
    fn watchdog_until(&mut self, from: u32, to: u32) {
        let period_ticks = Config::default().with_tick_hz(HZ).watchdog_period();
        let mut period = Periodic::new(period_ticks, Instant::from_ticks(from));
        for t in from + 1..=to {
            let now = Instant::from_ticks(t);
            if period.poll(now) {
                self.robot.check_watchdog(now);
            }
        }
    }
}

#[test]
fn move_raw_packet_drives_wheels_and_stamps_time() {
    let mut h = Harness::new();

    let cmd = h.packet(&[CMD_MOVE_RAW, 64, (-64i8) as u8], 1_234);

    assert_eq!(
        cmd,
        Command::MoveRaw {
            left_axis: 64,
            right_axis: -64
        }
    );
    assert_eq!(h.take(), vec![Call::Speed(50, -50)]);
    assert_eq!(h.robot.state().last_command_tick(), Instant::from_ticks(1_234));
}

#[test]
fn most_negative_wire_axis_is_full_reverse() {
    let mut h = Harness::new();

    let cmd = h.packet(&[CMD_MOVE_RAW, 0x80, 0x80], 10);

    assert_eq!(
        cmd,
        Command::MoveRaw {
            left_axis: -128,
            right_axis: -128
        }
    );
    assert_eq!(h.take(), vec![Call::Speed(-100, -100)]);
}

#[test]
fn check_just_before_packet_stamp_does_not_stop() {
    let mut h = Harness::new();

    h.packet(&[CMD_MOVE_RAW, 64, 64], 1_000);
    h.take();

    assert!(!h.robot.check_watchdog(Instant::from_ticks(999)));
    assert!(h.take().is_empty());
}

#[test]
fn empty_and_truncated_packets_touch_nothing() {
    let mut h = Harness::new();

    assert_eq!(h.packet(&[], 10), Command::Unknown);
    assert_eq!(h.packet(&[CMD_MOVE_RAW, 5], 20), Command::Unknown);
    assert_eq!(h.packet(&[CMD_RGB_LED, 1, 2], 30), Command::Unknown);
    assert_eq!(h.packet(&[0x7F, 1, 2, 3], 40), Command::Unknown);

    assert!(h.take().is_empty());
    assert_eq!(h.robot.state().last_command_tick(), Instant::ZERO);
}

#[test]
fn color_is_forwarded_verbatim_and_does_not_feed_watchdog() {
    let mut h = Harness::new();

    h.packet(&[CMD_RGB_LED, 10, 20, 30], 100);
    h.packet(&[CMD_RGB_LED, 10, 20, 30], 200);

    assert_eq!(
        h.take(),
        vec![Call::Color(10, 20, 30), Call::Color(10, 20, 30)]
    );
    assert_eq!(h.robot.state().last_command_tick(), Instant::ZERO);
}

#[test]
fn stale_stream_stops_exactly_once() {
    let mut h = Harness::new();

    h.packet(&[CMD_MOVE_RAW, 127, 127], 0);
    assert_eq!(h.take(), vec![Call::Speed(100, 100)]);

    // Still fresh at 400 ticks.
    h.watchdog_until(0, 400);
    assert!(h.take().is_empty());

    // First check past the timeout is at 600; nothing more after that.
    h.watchdog_until(400, 5_000);
    assert_eq!(h.take(), vec![Call::Speed(0, 0)]);
}

#[test]
fn motion_after_forced_stop_is_honoured_immediately() {
    let mut h = Harness::new();

    h.packet(&[CMD_MOVE_RAW, 127, (-127i8) as u8], 0);
    h.watchdog_until(0, 1_000);
    assert_eq!(h.take(), vec![Call::Speed(100, -100), Call::Speed(0, 0)]);

    h.packet(&[CMD_MOVE_RAW, 32, 32], 1_001);
    assert_eq!(h.take(), vec![Call::Speed(25, 25)]);

    // Re-armed: the next stale period stops again.
    h.watchdog_until(1_001, 2_000);
    assert_eq!(h.take(), vec![Call::Speed(0, 0)]);
}

#[test]
fn steady_commands_keep_the_wheels_moving() {
    let mut h = Harness::new();
    let cfg = Config::default().with_tick_hz(HZ);
    let mut period = Periodic::new(cfg.watchdog_period(), Instant::ZERO);

    for t in 0..3_000u32 {
        if t % 100 == 0 {
            h.packet(&[CMD_MOVE_RAW, 10, 10], t);
        }
        let now = Instant::from_ticks(t);
        if period.poll(now) {
            assert!(!h.robot.check_watchdog(now));
        }
    }
    assert!(h.take().iter().all(|c| *c == Call::Speed(8, 8)));
}

#[test]
fn no_false_stop_before_first_command() {
    let mut h = Harness::new();
    h.watchdog_until(0, 10_000);
    assert!(h.take().is_empty());
}

#[test]
fn counter_wraparound_does_not_stop() {
    let mut h = Harness::new();
    let start = u32::MAX - 99;

    h.packet(&[CMD_MOVE_RAW, 1, 1], start);
    h.take();

    // 300 ticks later, across the wrap.
    assert!(!h.robot.check_watchdog(Instant::from_ticks(200)));
    assert!(h.take().is_empty());

    assert!(h.robot.check_watchdog(Instant::from_ticks(401)));
    assert_eq!(h.take(), vec![Call::Speed(0, 0)]);
}

#[test]
fn beacon_firings_coalesce_into_one_advertisement() {
    let mut h = Harness::new();

    for _ in 0..5 {
        h.robot.on_beacon_timer();
    }
    assert!(h.robot.state().beacon_pending());
    assert!(h.robot.flush_beacon());
    assert!(!h.robot.flush_beacon());

    let calls = h.take();
    let toggles = calls.iter().filter(|c| **c == Call::Toggle).count();
    let sends: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Send(b) => Some(b.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(toggles, 5);
    assert_eq!(sends, vec![vec![ADVERTISEMENT, 0]]);
}

#[test]
fn heartbeat_feeds_supervisor_on_period() {
    struct Feeds(u32);
    impl Supervisor for Feeds {
        fn keep_alive(&mut self) {
            self.0 += 1;
        }
    }

    let cfg = Config::default().with_tick_hz(HZ);
    let mut hb = Heartbeat::new(Feeds(0));
    let mut period = Periodic::new(cfg.heartbeat_period(), Instant::ZERO);

    for t in 1..=1_000u32 {
        if period.poll(Instant::from_ticks(t)) {
            hb.beat();
        }
    }
    assert_eq!(hb.supervisor().0, 5);
}
