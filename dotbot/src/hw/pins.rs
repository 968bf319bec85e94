// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin assignment of the STM32F777 DotBot controller.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiod, Alternate, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart1: Usart1Pins,
    pub left: BridgePins<'D', 12, 'D', 13, 'A', 4, 'A', 3>,
    pub right: BridgePins<'D', 14, 'D', 15, 'D', 2, 'D', 1>,
    pub can1: Can1Pins,
}

pub struct LedPins {
    pub red: gpiod::PD8<Output<PushPull>>,
    pub yellow: gpiod::PD9<Output<PushPull>>,
    pub green: gpiod::PD10<Output<PushPull>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// One DRV8873 H-bridge: two TIM4 PWM inputs plus the sleep and disable lines.
pub struct BridgePins<
    const IN1_P: char,
    const IN1_N: u8,
    const IN2_P: char,
    const IN2_N: u8,
    const SLP_P: char,
    const SLP_N: u8,
    const DIS_P: char,
    const DIS_N: u8,
> {
    pub in1: stm32f7xx_hal::gpio::Pin<IN1_P, IN1_N, Alternate<2>>,
    pub in2: stm32f7xx_hal::gpio::Pin<IN2_P, IN2_N, Alternate<2>>,
    pub nsleep: stm32f7xx_hal::gpio::Pin<SLP_P, SLP_N, Output<PushPull>>,
    pub disable: stm32f7xx_hal::gpio::Pin<DIS_P, DIS_N, Output<PushPull>>,
}

/// CAN1 bus pins
pub struct Can1Pins {
    pub tx: gpioa::PA12<Alternate<9>>,
    pub rx: gpioa::PA11<Alternate<9>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                red: gpiod.pd8.into_push_pull_output(),
                yellow: gpiod.pd9.into_push_pull_output(),
                green: gpiod.pd10.into_push_pull_output(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            // TIM4_CH1/CH2
            left: BridgePins {
                in1: gpiod.pd12.into_alternate::<2>(),
                in2: gpiod.pd13.into_alternate::<2>(),
                nsleep: gpioa.pa4.into_push_pull_output(),
                disable: gpioa.pa3.into_push_pull_output(),
            },

            // TIM4_CH3/CH4
            right: BridgePins {
                in1: gpiod.pd14.into_alternate::<2>(),
                in2: gpiod.pd15.into_alternate::<2>(),
                nsleep: gpiod.pd2.into_push_pull_output(),
                disable: gpiod.pd1.into_push_pull_output(),
            },

            can1: Can1Pins {
                tx: gpioa.pa12.into_alternate::<9>(),
                rx: gpioa.pa11.into_alternate::<9>().internal_pull_up(true),
            },
        }
    }
}
