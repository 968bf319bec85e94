// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART debug output and the `log` backend that uses it.
//!
//! Note: lines are terminated with `\r\n` so they render correctly on the terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt::{self, Write as _};

use nb::block;

use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::sync::TakeCell;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// `log` backend writing one line per record to USART1.
///
/// Records logged before [`init`] are discarded. The USART is lent out of its slot for the length
/// of one line and written with interrupts enabled; a record logged while another line is being
/// written, for example from an interrupt, is dropped.
pub struct UsartLogger {
    usart: TakeCell<Usart<pac::USART1>>,
}

static LOGGER: UsartLogger = UsartLogger {
    usart: TakeCell::empty(),
};

/// Install USART1 as the global logger.
pub fn init(usart: Usart<pac::USART1>, level: log::LevelFilter) {
    LOGGER.usart.put(usart);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

impl log::Log for UsartLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.usart.with(|usart| {
            let _ = write!(usart, "{:<5} {}\r\n", record.level(), record.args());
        });
    }

    fn flush(&self) {
        self.usart.with(Usart::flush);
    }
}
