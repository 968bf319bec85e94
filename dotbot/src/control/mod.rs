// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motion Control
//!
//! Open-loop building blocks for the two-wheeled base.
//!
//! ## Modules
//!
//! - [`drive`] - Linear axis-to-wheel-speed mapping and H-bridge PWM duty.
//! - [`watchdog`] - Command liveness watchdog that forces a stop on a stale command stream.

pub mod drive;
pub mod watchdog;

pub use drive::{axis_to_percent, WheelSpeeds};
pub use watchdog::{Watchdog, WatchdogState};
