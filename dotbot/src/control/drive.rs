// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Differential-drive mapping from joystick axes to wheel speeds.
//!
//! The mapping is linear and stateless: each axis in `[-127, 127]` scales to a wheel speed in
//! `[-100, 100]` percent. There is no acceleration limiting or closed-loop correction.

/// Largest axis magnitude. `-128` is clamped to `-AXIS_MAX` before scaling.
pub const AXIS_MAX: i8 = 127;

/// Largest wheel speed magnitude in percent.
pub const SPEED_MAX: i8 = 100;

/// Scale a raw axis value to a wheel speed percentage, rounding half away from zero.
pub fn axis_to_percent(axis: i8) -> i8 {
    let axis = axis.max(-AXIS_MAX) as i16;
    let max = AXIS_MAX as i16;
    let scaled = axis * SPEED_MAX as i16;

    // Integer round-half-away-from-zero of scaled / max.
    let half = max / 2;
    let rounded = if scaled >= 0 {
        (scaled + half) / max
    } else {
        (scaled - half) / max
    };
    rounded as i8
}

/// Left/right wheel speeds in percent.
/// PWM compare values `(in1, in2)` for one H-bridge in IN/IN mode.
///
/// A positive speed modulates IN1, a negative speed modulates IN2, and zero leaves both low so
/// the motor coasts. `period` is the number of timer counts at 100 %.
pub fn bridge_duty(percent: i8, period: u32) -> (u32, u32) {
    let magnitude = (percent.unsigned_abs() as u32).min(SPEED_MAX as u32);
    let duty = period * magnitude / SPEED_MAX as u32;
    if percent >= 0 {
        (duty, 0)
    } else {
        (0, duty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelSpeeds {
    pub left: i8,
    pub right: i8,
}

impl WheelSpeeds {
    pub const STOP: WheelSpeeds = WheelSpeeds { left: 0, right: 0 };

    /// Map a pair of raw axes to wheel speeds.
    pub fn from_axes(left_axis: i8, right_axis: i8) -> Self {
        Self {
            left: axis_to_percent(left_axis),
            right: axis_to_percent(right_axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_points() {
        assert_eq!(axis_to_percent(0), 0);
        assert_eq!(axis_to_percent(127), 100);
        assert_eq!(axis_to_percent(-127), -100);
        assert_eq!(axis_to_percent(64), 50);
        assert_eq!(axis_to_percent(-64), -50);
        assert_eq!(axis_to_percent(1), 1);
        assert_eq!(axis_to_percent(-1), -1);
    }

    #[test]
    fn min_axis_is_clamped() {
        assert_eq!(axis_to_percent(i8::MIN), -100);
    }

    #[test]
    fn bounded_and_monotonic() {
        let mut prev = axis_to_percent(i8::MIN);
        for axis in (i8::MIN + 1)..=i8::MAX {
            let speed = axis_to_percent(axis);
            assert!((-SPEED_MAX..=SPEED_MAX).contains(&speed), "axis {}", axis);
            assert!(speed >= prev, "not monotonic at axis {}", axis);
            prev = speed;
        }
    }

    #[test]
    fn symmetric() {
        for axis in 0..=AXIS_MAX {
            assert_eq!(axis_to_percent(-axis), -axis_to_percent(axis));
        }
    }

    #[test]
    fn bridge_duty_modulates_one_input_by_sign() {
        assert_eq!(bridge_duty(0, 800), (0, 0));
        assert_eq!(bridge_duty(50, 800), (400, 0));
        assert_eq!(bridge_duty(-50, 800), (0, 400));
        assert_eq!(bridge_duty(100, 800), (800, 0));
        assert_eq!(bridge_duty(-100, 800), (0, 800));
    }

    #[test]
    fn bridge_duty_saturates_out_of_range_speeds() {
        assert_eq!(bridge_duty(i8::MAX, 800), (800, 0));
        assert_eq!(bridge_duty(i8::MIN, 800), (0, 800));
    }

    #[test]
    fn from_axes_maps_each_wheel_independently() {
        assert_eq!(
            WheelSpeeds::from_axes(127, -64),
            WheelSpeeds {
                left: 100,
                right: -50
            }
        );
    }
}
