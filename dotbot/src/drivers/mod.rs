// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! control core.
//!
//! ## Existing drivers
//!
//! - [`drive`] – two TI DRV8873 H-bridges driven by TIM4 PWM as a differential drive

pub mod drive;

pub use drive::DifferentialDrive;
