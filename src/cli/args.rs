//! Command-line argument parsing.

use thiserror::Error;

pub const USAGE: &str = "\
Usage: resume-chat [OPTIONS]

Options:
  --url <URL>        Chat server base URL (default: $RESUME_CHAT_URL or http://localhost:8000)
  --ask <QUESTION>   Ask one question, print the answer and exit
  --sync             With --ask, use the non-streaming endpoint
  -V, --version      Print version
  -h, --help         Print this help

Without --ask the interactive chat screen starts.";

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// One question, answer on stdout
    Ask { question: String, sync: bool },
    /// Interactive chat screen (default)
    RunTui,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--url` override
    pub url: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("unknown argument: {0}")]
    Unknown(String),

    #[error("--sync only applies together with --ask")]
    SyncWithoutAsk,
}

/// Parse `std::env::args()`-style arguments (program name first).
///
/// `--version` and `--help` win over everything else on the line.
///
/// ```
/// use resume_chat::cli::args::{parse_args, CliCommand};
///
/// let args = ["resume-chat", "--ask", "hi"].map(String::from);
/// let parsed = parse_args(args.into_iter()).unwrap();
/// assert_eq!(parsed.command, CliCommand::Ask { question: "hi".into(), sync: false });
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut question = None;
    let mut sync = false;

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliArgs { command: CliCommand::Version, url }),
            "--help" | "-h" => return Ok(CliArgs { command: CliCommand::Help, url }),
            "--url" => url = Some(args.next().ok_or(ArgsError::MissingValue("--url"))?),
            "--ask" => question = Some(args.next().ok_or(ArgsError::MissingValue("--ask"))?),
            "--sync" => sync = true,
            other => {
                if let Some(value) = other.strip_prefix("--url=") {
                    url = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--ask=") {
                    question = Some(value.to_string());
                } else {
                    return Err(ArgsError::Unknown(other.to_string()));
                }
            }
        }
    }

    let command = match question {
        Some(question) => CliCommand::Ask { question, sync },
        None if sync => return Err(ArgsError::SyncWithoutAsk),
        None => CliCommand::RunTui,
    };

    Ok(CliArgs { command, url })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, ArgsError> {
        let mut all = vec!["resume-chat".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_no_args_runs_tui() {
        let parsed = parse(&[]).unwrap();
        assert_eq!(parsed.command, CliCommand::RunTui);
        assert_eq!(parsed.url, None);
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(parse(&["--version"]).unwrap().command, CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap().command, CliCommand::Version);
    }

    #[test]
    fn test_help_wins_over_later_args() {
        assert_eq!(parse(&["-h", "--bogus"]).unwrap().command, CliCommand::Help);
    }

    #[test]
    fn test_ask_with_url() {
        let parsed = parse(&["--url", "http://h:1", "--ask", "Who are you?"]).unwrap();
        assert_eq!(parsed.url.as_deref(), Some("http://h:1"));
        assert_eq!(
            parsed.command,
            CliCommand::Ask {
                question: "Who are you?".to_string(),
                sync: false
            }
        );
    }

    #[test]
    fn test_equals_forms() {
        let parsed = parse(&["--url=http://h:2", "--ask=q", "--sync"]).unwrap();
        assert_eq!(parsed.url.as_deref(), Some("http://h:2"));
        assert_eq!(
            parsed.command,
            CliCommand::Ask {
                question: "q".to_string(),
                sync: true
            }
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(parse(&["--ask"]), Err(ArgsError::MissingValue("--ask")));
        assert_eq!(parse(&["--url"]), Err(ArgsError::MissingValue("--url")));
    }

    #[test]
    fn test_sync_requires_ask() {
        assert_eq!(parse(&["--sync"]), Err(ArgsError::SyncWithoutAsk));
    }

    #[test]
    fn test_unknown_argument() {
        assert_eq!(
            parse(&["--update"]),
            Err(ArgsError::Unknown("--update".to_string()))
        );
    }
}
