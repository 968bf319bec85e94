// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Packet decoder for the DotBot command protocol.
//!
//! Decoding is a bounds-checked view over the transport's buffer: nothing is copied or allocated,
//! and a packet that is empty, truncated or carries an unknown opcode never reaches a handler.

use core::fmt;

use crate::protocol::messages::*;

/// Reason a packet could not be turned into a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Zero-length delivery.
    Empty,
    /// Opcode not handled by this firmware.
    UnknownOpcode(u8),
    /// Payload shorter than the opcode requires.
    Truncated {
        opcode: u8,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Empty => f.write_str("empty packet"),
            DecodeError::UnknownOpcode(op) => write!(f, "unknown opcode {:#04x}", op),
            DecodeError::Truncated {
                opcode,
                expected,
                actual,
            } => write!(
                f,
                "opcode {:#04x} needs {} payload bytes, got {}",
                opcode, expected, actual
            ),
        }
    }
}

/// Parse a packet, reporting why it was rejected.
///
/// Bytes past the opcode's payload are ignored.
pub fn parse(bytes: &[u8]) -> Result<Command, DecodeError> {
    let (&opcode, payload) = bytes.split_first().ok_or(DecodeError::Empty)?;

    match opcode {
        CMD_MOVE_RAW => {
            let [left, right] = take::<MOVE_RAW_LEN>(opcode, payload)?;
            Ok(Command::MoveRaw {
                left_axis: left as i8,
                right_axis: right as i8,
            })
        }
        CMD_RGB_LED => {
            let [r, g, b] = take::<RGB_LED_LEN>(opcode, payload)?;
            Ok(Command::SetColor { r, g, b })
        }
        other => Err(DecodeError::UnknownOpcode(other)),
    }
}

/// Decode a packet, mapping every malformed input to [`Command::Unknown`].
pub fn decode(bytes: &[u8]) -> Command {
    match parse(bytes) {
        Ok(cmd) => cmd,
        Err(e) => {
            log::trace!("dropping packet: {}", e);
            Command::Unknown
        }
    }
}

fn take<const N: usize>(opcode: u8, payload: &[u8]) -> Result<[u8; N], DecodeError> {
    payload
        .get(..N)
        .and_then(|p| p.try_into().ok())
        .ok_or(DecodeError::Truncated {
            opcode,
            expected: N,
            actual: payload.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_raw_is_signed() {
        assert_eq!(
            decode(&[CMD_MOVE_RAW, 64, (-64i8) as u8]),
            Command::MoveRaw {
                left_axis: 64,
                right_axis: -64
            }
        );
    }

    #[test]
    fn rgb_led() {
        assert_eq!(
            decode(&[CMD_RGB_LED, 255, 0, 17]),
            Command::SetColor { r: 255, g: 0, b: 17 }
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        assert_eq!(
            decode(&[CMD_RGB_LED, 1, 2, 3, 4, 5]),
            Command::SetColor { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn empty_packet() {
        assert_eq!(parse(&[]), Err(DecodeError::Empty));
        assert_eq!(decode(&[]), Command::Unknown);
    }

    #[test]
    fn every_short_prefix_is_unknown() {
        let move_raw = [CMD_MOVE_RAW, 10, 20];
        let rgb = [CMD_RGB_LED, 10, 20, 30];
        for len in 0..move_raw.len() {
            assert_eq!(decode(&move_raw[..len]), Command::Unknown);
        }
        for len in 0..rgb.len() {
            assert_eq!(decode(&rgb[..len]), Command::Unknown);
        }
    }

    #[test]
    fn truncated_reports_sizes() {
        assert_eq!(
            parse(&[CMD_RGB_LED, 1]),
            Err(DecodeError::Truncated {
                opcode: CMD_RGB_LED,
                expected: RGB_LED_LEN,
                actual: 1
            })
        );
    }

    #[test]
    fn unknown_opcodes() {
        assert_eq!(parse(&[ADVERTISEMENT, 0]), Err(DecodeError::UnknownOpcode(0x04)));
        for op in 2..=u8::MAX {
            assert_eq!(decode(&[op, 0, 0, 0]), Command::Unknown);
        }
    }
}
