// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # DotBot Firmware
//!
//! This crate contains the control core of the DotBot, a small two-wheeled robot driven by short
//! radio command packets, together with the board glue for the STM32F777 controller it runs on.
//!
//! The core decodes command packets into differential-drive wheel speeds and an RGB indicator
//! colour, stops the wheels when motion commands stop arriving, advertises the robot with a
//! periodic beacon and keeps an external supervisor fed.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Command packet decoding and opcode table |
//! | [`control`] | Axis-to-wheel-speed mapping and the command liveness watchdog |
//! | [`robot`] | Robot state and per-opcode command dispatch |
//! | [`beacon`] | Advertisement beacon scheduling and assembly |
//! | [`heartbeat`] | Supervisor keep-alive |
//! | [`sequence`] | Scripted, non-reactive motion sequences |
//! | [`board`] | Interfaces to the motor, LED, transport, clock and supervisor collaborators |
//! | [`config`] | Timing and role configuration |
//! | [`sync`] | Interrupt-safe value lending and event counters |
//! | [`time`] | Wrapping tick arithmetic and periodic events |
//! | `hw` | MCU-level wrappers around USART, CAN, timers, etc. (feature `firmware`) |
//! | `drivers` | Device-level drivers (e.g., DRV8873 PWM drive) (feature `firmware`) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf --bin dotbot
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod beacon;
pub mod board;
pub mod config;
pub mod control;
pub mod heartbeat;
pub mod protocol;
pub mod robot;
pub mod sequence;
pub mod sync;
pub mod time;

#[cfg(feature = "firmware")]
pub mod drivers;
#[cfg(feature = "firmware")]
pub mod hw;

pub use config::Config;
pub use protocol::Command;
pub use robot::{DeviceId, Robot, RobotState};
