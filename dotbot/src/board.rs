// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interfaces to the board-level collaborators of the control core.
//!
//! The core never touches peripherals directly. Firmware implements these traits on top of the
//! `hw` and `drivers` modules; host tests implement them with recording mocks.

use crate::time::Instant;

/// Differential-drive motor pair.
pub trait Motors {
    /// Set left/right wheel speed in percent, each nominally in `[-100, 100]`.
    ///
    /// Must be idempotent.
    fn set_speed(&mut self, left: i8, right: i8);
}

/// RGB indicator.
pub trait RgbLed {
    fn set_color(&mut self, r: u8, g: u8, b: u8);
}

/// Single-colour status LED blinked by the beacon scheduler.
pub trait StatusLed {
    fn set(&mut self, on: bool);
    fn toggle(&mut self);
}

/// Outbound packet transport.
///
/// Sending is fire-and-forget: an `Err` means the packet was dropped, and the caller never retries.
pub trait Transport {
    type Error: core::fmt::Debug;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// External supervisor that resets the board when it stops being fed.
pub trait Supervisor {
    fn keep_alive(&mut self);
}

/// Monotonic tick counter.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Indicator that ignores colour commands, for boards without an RGB LED.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRgbLed;

impl RgbLed for NoRgbLed {
    #[inline]
    fn set_color(&mut self, _r: u8, _g: u8, _b: u8) {}
}

impl<T: Motors + ?Sized> Motors for &mut T {
    #[inline]
    fn set_speed(&mut self, left: i8, right: i8) {
        (**self).set_speed(left, right)
    }
}

impl<T: RgbLed + ?Sized> RgbLed for &mut T {
    #[inline]
    fn set_color(&mut self, r: u8, g: u8, b: u8) {
        (**self).set_color(r, g, b)
    }
}

impl<T: StatusLed + ?Sized> StatusLed for &mut T {
    #[inline]
    fn set(&mut self, on: bool) {
        (**self).set(on)
    }

    #[inline]
    fn toggle(&mut self) {
        (**self).toggle()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    #[inline]
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).send(bytes)
    }
}

impl<T: Supervisor + ?Sized> Supervisor for &mut T {
    #[inline]
    fn keep_alive(&mut self) {
        (**self).keep_alive()
    }
}
