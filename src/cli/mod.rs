//! Command-line entry points.
//!
//! `main` parses the arguments first and hands them here; anything other
//! than [`CliCommand::RunTui`] is handled without touching the terminal.
//!
//! ```ignore
//! let args = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&args, &config).await {
//!     return result;
//! }
//! // continue into the chat screen
//! ```

pub mod args;
pub mod ask;
pub mod version;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use ask::{ask_blocking, ask_streaming, PrintView};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

use crate::client::ChatClient;
use crate::config::ChatConfig;

/// Run a non-interactive command.
///
/// Returns `None` for [`CliCommand::RunTui`]. `Version` exits the process.
pub async fn run_cli_command(args: &CliArgs, config: &ChatConfig) -> Option<Result<()>> {
    match &args.command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Ask { question, sync } => {
            let client = ChatClient::new(config.base_url.clone());
            let result = if *sync {
                ask_blocking(client, question, &mut std::io::stdout()).await
            } else {
                ask_streaming(client, question, &PrintView::stdout()).await
            };
            Some(result)
        }
        CliCommand::RunTui => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_tui_returns_none() {
        let args = CliArgs {
            command: CliCommand::RunTui,
            url: None,
        };
        assert!(run_cli_command(&args, &ChatConfig::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_help_succeeds() {
        let args = CliArgs {
            command: CliCommand::Help,
            url: None,
        };
        assert!(matches!(
            run_cli_command(&args, &ChatConfig::default()).await,
            Some(Ok(()))
        ));
    }
}
