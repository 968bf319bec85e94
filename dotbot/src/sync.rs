// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sharing between interrupt handlers and the main loop.
//!
//! Interrupts are only masked for the few instructions it takes to move a value in or out of a
//! slot or to bump a counter. Slow work, such as writing a log line, runs with interrupts enabled.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use critical_section::Mutex;

/// Slot that lends its value out for the duration of a closure.
///
/// While the value is out, further borrows see an empty slot and get `None` instead of waiting,
/// so an interrupt that preempts the borrower never blocks.
pub struct TakeCell<T> {
    slot: Mutex<RefCell<Option<T>>>,
}

impl<T> TakeCell<T> {
    pub const fn empty() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store `value`, replacing whatever was there.
    pub fn put(&self, value: T) {
        critical_section::with(|cs| {
            self.slot.borrow_ref_mut(cs).replace(value);
        });
    }

    /// Run `f` on the value with interrupts enabled, then return it to the slot.
    ///
    /// Returns `None` without calling `f` if the slot is empty or the value is already lent out.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut value = critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())?;
        let result = f(&mut value);
        self.put(value);
        Some(result)
    }

    pub fn is_available(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow_ref(cs).is_some())
    }
}

/// Event counter written from an interrupt and drained from the main loop.
pub struct EventCounter(AtomicU32);

impl EventCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    #[inline]
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of events since the last call.
    #[inline]
    pub fn take(&self) -> u32 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

impl Default for EventCounter {
    fn default() -> Self {
        Self::new()
    }
}
