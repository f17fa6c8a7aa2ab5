// crates/android-bridge/build.rs
//! Build script for android-bridge
//!
//! Links the Android system libraries the JNI bridge needs.

use std::env;

fn main() {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    println!("cargo:rerun-if-changed=build.rs");

    if target_os != "android" {
        return;
    }

    println!("cargo:rustc-link-lib=log"); // liblog, used by android_logger
    println!("cargo:rustc-link-lib=android");

    if target_arch == "aarch64" {
        println!("cargo:rustc-link-arg=-Wl,--no-rosegment");
    }
}
