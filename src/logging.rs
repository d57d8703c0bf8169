//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so in that mode logs go to a file under the
//! home directory. One-shot CLI runs log to stderr and keep stdout for the
//! answer.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = ".resume-chat";
const LOG_FILE: &str = "resume-chat.log";

/// Where log output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to this file, creating parent directories as needed
    File(PathBuf),
}

/// `~/.resume-chat/resume-chat.log`, or `None` without a home directory.
pub fn default_log_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(LOG_DIR).join(LOG_FILE))
}

/// Build the filter from `directive`, falling back to `info` if it does not parse.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` if a subscriber was already installed.
pub fn init_logging(directive: &str, target: LogTarget) -> io::Result<bool> {
    let filter = build_filter(directive);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init()
            .is_ok(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .is_ok()
        }
    };

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_layout() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".resume-chat/resume-chat.log"));
        }
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        let filter = build_filter("resume_chat=verbose");
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_file_target_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.log");

        init_logging("debug", LogTarget::File(path.clone())).unwrap();
        assert!(path.exists());
    }
}
