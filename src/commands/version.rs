//! Command: print version information.

/// Version string baked in by the build script, or the package version.
pub const VERSION: &str = match option_env!("BAKU_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// The line printed by `baku version`.
#[must_use]
pub fn version_line() -> String {
    format!("baku {VERSION}")
}

/// Print the baku version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("{}", version_line());
}
