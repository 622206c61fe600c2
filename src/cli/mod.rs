//! CLI module.
//!
//! Argument parsing, version display and the one-shot prompt mode. `main`
//! parses arguments before touching the terminal:
//!
//! ```ignore
//! use tally::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::RunTui { url } => { /* start the TUI */ }
//!     other => { /* handled without the TUI */ }
//! }
//! ```

pub mod args;
pub mod oneshot;
pub mod version;

pub use args::{parse_args, CliCommand, UsageError, USAGE};
pub use oneshot::{run_prompt, PromptError};
pub use version::{version_string, VERSION};
