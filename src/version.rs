//! Version and build metadata.
//!
//! The `SEXTANT_*` values are stamped by `build.rs`; all of them fall back
//! to "unknown" when the build ran without git or a toolchain probe.

/// Full version line: "sextant {version} ({commit} {date}) rustc {rustc}".
pub fn version() -> String {
    format!(
        "sextant {} ({} {}) rustc {}",
        package_version(),
        build_commit(),
        build_date(),
        rustc_version()
    )
}

pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn build_commit() -> &'static str {
    option_env!("SEXTANT_COMMIT_SHA").unwrap_or("unknown")
}

pub fn build_date() -> &'static str {
    option_env!("SEXTANT_BUILD_DATE").unwrap_or("unknown")
}

pub fn rustc_version() -> &'static str {
    option_env!("SEXTANT_RUSTC_VERSION").unwrap_or("unknown")
}
