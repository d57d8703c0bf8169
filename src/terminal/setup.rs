//! Entering and leaving the alternate screen.

use crossterm::{
    cursor::Show,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch `writer` to the alternate screen with paste and mouse events on.
pub fn enter_chat_screen<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(
        writer,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )
}

/// Ask the terminal to report Shift+Enter distinctly from Enter.
///
/// Returns `false` on terminals without the Kitty keyboard protocol; Alt+Enter
/// still inserts a newline there.
pub fn request_key_disambiguation<W: Write>(writer: &mut W) -> bool {
    execute!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
}

/// Undo everything [`enter_chat_screen`] and [`request_key_disambiguation`]
/// did. Never fails; safe to call more than once.
pub fn leave_chat_screen<W: Write>(writer: &mut W) {
    let _ = execute!(writer, PopKeyboardEnhancementFlags);
    let _ = disable_raw_mode();
    let _ = execute!(
        writer,
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    );
    // Some terminals ignore the pop once the alternate screen is gone
    let _ = write!(writer, "\x1b[=0u");
    let _ = execute!(writer, Show);
    let _ = writer.flush();
}
