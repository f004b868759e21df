//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `idle-warlords 0.1.0 (a1b2c3d, 2026-10-17, release)`.
pub fn version_string() -> String {
    format!(
        "{} {} ({}, {}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE,
        BUILD_PROFILE
    )
}
