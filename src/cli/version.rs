//! Version display.

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_string() -> String {
    format!("tally {}", VERSION)
}
