//! Build script for hestia-firmware
//!
//! Sets up the linker scripts for the ESP32 target: `linkall.x` comes from
//! esp-hal and lays out the image, `defmt.x` carries the log string table.

fn main() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    println!("cargo:rerun-if-changed=build.rs");
}
