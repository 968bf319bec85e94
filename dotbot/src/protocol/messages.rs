// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command messages exchanged with a DotBot.
//!
//! Every packet starts with a one-byte opcode followed by an opcode-specific payload:
//!
//! | Opcode | Name | Payload |
//! | ------ | ---- | ------- |
//! | `0x00` | [`CMD_MOVE_RAW`] | `left: i8`, `right: i8` |
//! | `0x01` | [`CMD_RGB_LED`] | `r: u8`, `g: u8`, `b: u8` |
//! | `0x04` | [`ADVERTISEMENT`] | `role: u8` (outbound only) |

// Opcodes
pub const CMD_MOVE_RAW: u8 = 0x00;
pub const CMD_RGB_LED: u8 = 0x01;
pub const ADVERTISEMENT: u8 = 0x04;

// Payload sizes (excluding the opcode byte)
pub const MOVE_RAW_LEN: usize = 2;
pub const RGB_LED_LEN: usize = 3;

/// Length of the advertisement packet on the wire.
pub const ADVERTISEMENT_LEN: usize = 2;

/// Largest outbound payload the beacon buffer can hold.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Largest inbound packet buffered between the receive interrupt and the main loop.
pub const MAX_PACKET_LEN: usize = 32;

/// One inbound transport delivery.
pub type Packet = heapless::Vec<u8, MAX_PACKET_LEN>;

/// Decoded inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Raw joystick axes, one per wheel, nominally in `[-127, 127]`.
    MoveRaw { left_axis: i8, right_axis: i8 },
    /// Indicator colour.
    SetColor { r: u8, g: u8, b: u8 },
    /// Unrecognised opcode or malformed packet. Ignored by the handlers.
    Unknown,
}

/// Application type advertised in the beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Role {
    DotBot = 0,
    SailBot = 1,
    FreeBot = 2,
    Xgo = 3,
    LighthouseMote = 4,
}

impl Role {
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}
