// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers for the STM32F777 DotBot controller.

pub mod can;
pub mod clock;
pub mod iwdg;
pub mod led;
pub mod pins;
pub mod uid;
pub mod usart;

pub use can::CanBus;
pub use clock::TickTimer;
pub use iwdg::IndependentWatchdog;
pub use led::{IndicatorLeds, Led};
pub use pins::BoardPins;
pub use usart::Usart;
