// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Differential drive on two DRV8873 H-bridges in PWM (IN/IN) mode.
//!
//! TIM4 generates all four bridge inputs:
//!
//! | Wheel | IN1 | IN2 |
//! | ----- | --- | --- |
//! | left  | CH1 (PD12) | CH2 (PD13) |
//! | right | CH3 (PD14) | CH4 (PD15) |
//!
//! A positive speed modulates IN1 with IN2 held low; a negative speed modulates IN2 with IN1 held
//! low. Zero coasts with both inputs low.

use stm32f7xx_hal::{
    gpio::{self, Output, PushPull},
    pac,
};

use crate::board::Motors;
use crate::control::drive::{bridge_duty, SPEED_MAX};

/// PWM carrier frequency, above the audible range.
pub const PWM_HZ: u32 = 20_000;

// CCMRx output compare: PWM mode 1 with preload on both channels of the register
const CCMR_PWM1_BOTH: u32 = (0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11);
// CC1E | CC2E | CC3E | CC4E
const CCER_ALL: u32 = (1 << 0) | (1 << 4) | (1 << 8) | (1 << 12);

/// Wake a DRV8873 and enable its outputs.
fn enable_bridge<const SP: char, const SN: u8, const DP: char, const DN: u8>(
    nsleep: &mut gpio::Pin<SP, SN, Output<PushPull>>,
    disable: &mut gpio::Pin<DP, DN, Output<PushPull>>,
) {
    nsleep.set_high();
    disable.set_low();
}

pub struct DifferentialDrive {
    tim: pac::TIM4,
    period: u32,
}

impl DifferentialDrive {
    /// Configure TIM4 for four-channel PWM from a timer kernel clock of `timer_hz` and wake both
    /// bridges.
    ///
    /// The bridge input pins must already be in alternate function 2; the sleep and disable lines
    /// are borrowed only to enable the drivers.
    pub fn tim4<
        const LSP: char,
        const LSN: u8,
        const LDP: char,
        const LDN: u8,
        const RSP: char,
        const RSN: u8,
        const RDP: char,
        const RDN: u8,
    >(
        tim4: pac::TIM4,
        timer_hz: u32,
        left_nsleep: &mut gpio::Pin<LSP, LSN, Output<PushPull>>,
        left_disable: &mut gpio::Pin<LDP, LDN, Output<PushPull>>,
        right_nsleep: &mut gpio::Pin<RSP, RSN, Output<PushPull>>,
        right_disable: &mut gpio::Pin<RDP, RDN, Output<PushPull>>,
    ) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;
        let period = (timer_hz / PWM_HZ).clamp(SPEED_MAX as u32, 0xFFFF);

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| unsafe { w.bits(period - 1) });

        tim.ccmr1_output()
            .write(|w| unsafe { w.bits(CCMR_PWM1_BOTH) });
        tim.ccmr2_output()
            .write(|w| unsafe { w.bits(CCMR_PWM1_BOTH) });

        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });
        tim.ccr3.write(|w| unsafe { w.bits(0) });
        tim.ccr4.write(|w| unsafe { w.bits(0) });

        tim.ccer.write(|w| unsafe { w.bits(CCER_ALL) });

        // Auto-reload preload, load shadow registers, then start
        tim.cr1.modify(|_, w| w.arpe().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        enable_bridge(left_nsleep, left_disable);
        enable_bridge(right_nsleep, right_disable);

        Self { tim, period }
    }
}

impl Motors for DifferentialDrive {
    fn set_speed(&mut self, left: i8, right: i8) {
        let (l1, l2) = bridge_duty(left, self.period);
        let (r1, r2) = bridge_duty(right, self.period);

        self.tim.ccr1.write(|w| unsafe { w.bits(l1) });
        self.tim.ccr2.write(|w| unsafe { w.bits(l2) });
        self.tim.ccr3.write(|w| unsafe { w.bits(r1) });
        self.tim.ccr4.write(|w| unsafe { w.bits(r2) });
    }
}
