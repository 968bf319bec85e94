// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! DotBot radio protocol: command decoding and the advertisement beacon layout.

pub mod messages;
pub mod parser;

pub use messages::{Command, Packet, Role};
pub use parser::{decode, parse, DecodeError};
