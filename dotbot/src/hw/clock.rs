// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running tick counter on TIM2.
//!
//! TIM2 is the only 32-bit general-purpose timer used here, so its counter wraps exactly like the
//! `u32` ticks of [`Instant`].

use stm32f7xx_hal::pac;

use crate::board::Clock;
use crate::time::Instant;

/// Tick rate of the counter.
pub const TICK_HZ: u32 = 1_000_000;

pub struct TickTimer {
    tim: pac::TIM2,
}

impl TickTimer {
    /// Start TIM2 counting up at [`TICK_HZ`] from a timer kernel clock of `timer_hz`.
    pub fn tim2(tim2: pac::TIM2, timer_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = (timer_hz / TICK_HZ).saturating_sub(1);
        tim.psc.write(|w| unsafe { w.bits(psc) });

        // Auto-reload: max 32-bit
        tim.arr.write(|w| w.bits(0xFFFF_FFFF));

        // Latch the prescaler and reset the counter
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| w.bits(0));

        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Read the raw 32-bit counter value.
    #[inline]
    pub fn raw(&self) -> u32 {
        self.tim.cnt.read().cnt().bits()
    }
}

impl Clock for TickTimer {
    #[inline]
    fn now(&self) -> Instant {
        Instant::from_ticks(self.raw())
    }
}
