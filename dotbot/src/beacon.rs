// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Advertisement beacon.
//!
//! A periodic timer raises the pending flag; the main loop later drains it by assembling the
//! advertisement `[ADVERTISEMENT, role]` in a reusable buffer and handing it to the transport.
//! The flag is a boolean, so timer firings that the loop misses collapse into one emission.

use heapless::Vec;

use crate::board::Transport;
use crate::protocol::messages::{ADVERTISEMENT, MAX_PAYLOAD_LEN};
use crate::protocol::Role;

/// Outbound payload buffer.
pub type Payload = Vec<u8, MAX_PAYLOAD_LEN>;

/// Beacon scheduler state.
#[derive(Debug)]
pub struct Beacon {
    role: Role,
    pending: bool,
    buffer: Payload,
}

impl Beacon {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            pending: false,
            buffer: Vec::new(),
        }
    }

    /// Timer side: request an emission.
    ///
    /// Returns `false` if a beacon was already pending, i.e. this request was coalesced.
    pub fn request(&mut self) -> bool {
        let fresh = !self.pending;
        self.pending = true;
        fresh
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Loop side: if a beacon is pending, assemble it, send it and clear the flag.
    ///
    /// Returns `None` when nothing was pending. A failed send is not retried; the flag is
    /// cleared either way and the next period produces a fresh beacon.
    pub fn flush<T: Transport>(&mut self, transport: &mut T) -> Option<Result<(), T::Error>> {
        if !self.pending {
            return None;
        }

        let result = transport.send(self.assemble());
        self.pending = false;
        Some(result)
    }

    /// Build the advertisement in the internal buffer and return it.
    pub fn assemble(&mut self) -> &[u8] {
        self.buffer.clear();
        // The buffer holds far more than the two advertisement bytes.
        let _ = self.buffer.push(ADVERTISEMENT);
        let _ = self.buffer.push(self.role.tag());
        &self.buffer
    }
}
