// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Factory-programmed 96-bit unique device identifier.

use crate::robot::DeviceId;

/// Base address of the unique ID registers on STM32F7.
const UID_BASE: usize = 0x1FF0_F420;

/// Read the three UID words.
fn read() -> [u32; 3] {
    let base = UID_BASE as *const u32;
    // The UID block is always mapped and read-only.
    unsafe {
        [
            core::ptr::read_volatile(base),
            core::ptr::read_volatile(base.add(1)),
            core::ptr::read_volatile(base.add(2)),
        ]
    }
}

/// Fold the 96-bit UID into a 64-bit device id.
pub fn device_id() -> DeviceId {
    fold(read())
}

fn fold([w0, w1, w2]: [u32; 3]) -> DeviceId {
    DeviceId((((w1 as u64) << 32) | w0 as u64) ^ ((w2 as u64) << 16))
}
