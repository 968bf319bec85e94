// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

fn main() {
    // The cortex-m-rt linker script is only wanted for the firmware binaries; host test builds
    // link normally.
    if std::env::var_os("CARGO_FEATURE_FIRMWARE").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
