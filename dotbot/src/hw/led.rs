// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board LEDs.
//!
//! [`Led`] drives a single push-pull pin and remembers its logical state so it can be toggled.
//! [`IndicatorLeds`] shows a colour on the red and green board LEDs.

use stm32f7xx_hal::gpio::{self, Output, PushPull};

use crate::board::{RgbLed, StatusLed};

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED abstraction that remembers its active level and last known state.
pub struct Led<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
    active: ActiveLevel,
    is_on: bool,
}

impl<const P: char, const N: u8> Led<P, N> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(pin: gpio::Pin<P, N, Output<PushPull>>, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            is_on: false,
        };
        led.drive(false);
        led
    }

    pub fn active_low(pin: gpio::Pin<P, N, Output<PushPull>>) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    fn drive(&mut self, on: bool) {
        if on == (self.active == ActiveLevel::High) {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        self.is_on = on;
    }
}

impl<const P: char, const N: u8> StatusLed for Led<P, N> {
    fn set(&mut self, on: bool) {
        self.drive(on);
    }

    fn toggle(&mut self) {
        self.drive(!self.is_on);
    }
}

/// Channel byte at or above which the corresponding LED is lit.
pub const CHANNEL_ON: u8 = 0x80;

/// Colour indicator on the red and green board LEDs. There is no blue LED on this board, so the
/// blue channel is ignored.
pub struct IndicatorLeds<const RP: char, const RN: u8, const GP: char, const GN: u8> {
    red: Led<RP, RN>,
    green: Led<GP, GN>,
}

impl<const RP: char, const RN: u8, const GP: char, const GN: u8> IndicatorLeds<RP, RN, GP, GN> {
    pub fn new(red: Led<RP, RN>, green: Led<GP, GN>) -> Self {
        Self { red, green }
    }
}

impl<const RP: char, const RN: u8, const GP: char, const GN: u8> RgbLed
    for IndicatorLeds<RP, RN, GP, GN>
{
    fn set_color(&mut self, r: u8, g: u8, _b: u8) {
        self.red.set(r >= CHANNEL_ON);
        self.green.set(g >= CHANNEL_ON);
    }
}
