// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Independent watchdog (IWDG), the board supervisor.
//!
//! Once started it cannot be stopped; the MCU resets unless it is fed within the timeout.

use stm32f7xx_hal::pac;

use crate::board::Supervisor;

const KEY_RELOAD: u32 = 0xAAAA;
const KEY_UNLOCK: u32 = 0x5555;
const KEY_START: u32 = 0xCCCC;

/// LSI / 64 gives a 2 ms watchdog tick from the nominal 32 kHz LSI.
const PRESCALER_DIV64: u32 = 0b100;
const MS_PER_TICK: u32 = 2;
const RELOAD_MAX: u32 = 0x0FFF;

pub struct IndependentWatchdog {
    iwdg: pac::IWDG,
}

impl IndependentWatchdog {
    /// Start the watchdog with a timeout of roughly `timeout_ms` (at most about 8 s).
    pub fn start(iwdg: pac::IWDG, timeout_ms: u32) -> Self {
        let reload = (timeout_ms / MS_PER_TICK).clamp(1, RELOAD_MAX);

        iwdg.kr.write(|w| unsafe { w.bits(KEY_START) });
        iwdg.kr.write(|w| unsafe { w.bits(KEY_UNLOCK) });
        iwdg.pr.write(|w| unsafe { w.bits(PRESCALER_DIV64) });
        iwdg.rlr.write(|w| unsafe { w.bits(reload) });

        // Wait for the prescaler and reload updates to reach the LSI domain
        while iwdg.sr.read().bits() != 0 {}

        iwdg.kr.write(|w| unsafe { w.bits(KEY_RELOAD) });
        log::info!("iwdg started, timeout {} ms", reload * MS_PER_TICK);

        Self { iwdg }
    }
}

impl Supervisor for IndependentWatchdog {
    #[inline]
    fn keep_alive(&mut self) {
        self.iwdg.kr.write(|w| unsafe { w.bits(KEY_RELOAD) });
    }
}
