// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Supervisor keep-alive.
//!
//! An external supervisor resets the whole board if it is not fed on time. The heartbeat feeds it
//! once per period for as long as it is enabled; disabling it is how an application asks to be
//! reset.

use crate::board::Supervisor;

pub struct Heartbeat<S> {
    supervisor: S,
    enabled: bool,
    beats: u32,
}

impl<S: Supervisor> Heartbeat<S> {
    /// Create an enabled heartbeat.
    pub fn new(supervisor: S) -> Self {
        Self {
            supervisor,
            enabled: true,
            beats: 0,
        }
    }

    /// Periodic callback. Feeds the supervisor if enabled and reports whether it did.
    pub fn beat(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.supervisor.keep_alive();
        self.beats = self.beats.wrapping_add(1);
        true
    }

    /// Stop feeding the supervisor. The board is expected to be reset shortly after.
    pub fn disable(&mut self) {
        if self.enabled {
            log::info!("heartbeat disabled after {} beats", self.beats);
        }
        self.enabled = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn beats(&self) -> u32 {
        self.beats
    }

    pub fn supervisor(&mut self) -> &mut S {
        &mut self.supervisor
    }
}
