//! File logging.
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `<log_dir>/tally.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

pub const LOG_FILE_NAME: &str = "tally.log";

/// Open (append) the log file, creating its directory first.
pub fn open_log_file(dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Filter from the configured directive, falling back to `info` if it does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the log file path, or `None` when logging is disabled or the file
/// could not be opened. Never fails: the client runs fine without a log.
pub fn init(config: &ClientConfig) -> Option<PathBuf> {
    let dir = config.log_dir.as_ref()?;
    let (file, path) = open_log_file(dir).ok()?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    installed.then_some(path)
}
