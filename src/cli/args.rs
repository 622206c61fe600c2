//! Command-line argument parsing.
//!
//! Flags override the environment; see [`crate::config`] for the variables.

use thiserror::Error;

pub const USAGE: &str = "\
Usage: tally [OPTIONS]

Options:
  --url <URL>        Agent backend base URL (env: TALLY_API_URL)
  --prompt <TEXT>    Ask one question, print the reply and exit
  -V, --version      Print version
  -h, --help         Print this help";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run the TUI application (default)
    RunTui { url: Option<String> },
    /// Single exchange without the TUI
    Prompt {
        text: String,
        url: Option<String>,
    },
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("option '{0}' needs a value")]
    MissingValue(&'static str),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("the prompt is empty")]
    BlankPrompt,
}

/// Split `--flag=value` into its parts.
fn split_inline(arg: &str) -> (&str, Option<&str>) {
    match arg.split_once('=') {
        Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
        _ => (arg, None),
    }
}

fn take_value<I>(
    flag: &'static str,
    inline: Option<&str>,
    rest: &mut I,
) -> Result<String, UsageError>
where
    I: Iterator<Item = String>,
{
    match inline {
        Some(value) => Ok(value.to_string()),
        None => rest
            .next()
            .filter(|v| !v.starts_with("--"))
            .ok_or(UsageError::MissingValue(flag)),
    }
}

/// Parse command-line arguments, program name first.
///
/// ```
/// use tally::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["tally".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, UsageError>
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut prompt = None;
    // Skip the program name
    let mut rest = args.skip(1);

    while let Some(arg) = rest.next() {
        let (flag, inline) = split_inline(&arg);
        match flag {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--url" => url = Some(take_value("--url", inline, &mut rest)?),
            "--prompt" => prompt = Some(take_value("--prompt", inline, &mut rest)?),
            other if other.starts_with('-') => {
                return Err(UsageError::UnknownFlag(other.to_string()))
            }
            other => return Err(UsageError::UnexpectedArgument(other.to_string())),
        }
    }

    match prompt {
        Some(text) if text.trim().is_empty() => Err(UsageError::BlankPrompt),
        Some(text) => Ok(CliCommand::Prompt { text, url }),
        None => Ok(CliCommand::RunTui { url }),
    }
}
