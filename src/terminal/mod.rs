//! Terminal ownership for the chat screen.
//!
//! [`ChatTerminal`] puts the terminal into raw mode on the alternate screen
//! and puts it back when dropped. [`install_panic_hook`] covers the case
//! where a panic unwinds past it.

mod setup;

pub use setup::{enter_chat_screen, leave_chat_screen, request_key_disambiguation};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

/// Restore the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        leave_chat_screen(&mut io::stdout());
        previous(info);
    }));
}

/// Raw-mode terminal that restores itself on drop.
pub struct ChatTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl ChatTerminal {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = enter_chat_screen(&mut stdout) {
            leave_chat_screen(&mut stdout);
            return Err(err.into());
        }
        let disambiguated = request_key_disambiguation(&mut stdout);
        tracing::debug!(disambiguated, "Terminal keyboard enhancements");

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Leave the chat screen now instead of at drop.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        leave_chat_screen(self.terminal.backend_mut());
    }
}

impl Drop for ChatTerminal {
    fn drop(&mut self) {
        self.restore();
    }
}
