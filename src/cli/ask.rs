//! One-shot `--ask` mode.
//!
//! Runs a single exchange through the same [`Session`] as the chat screen,
//! with a [`PrintView`] that writes the answer to stdout as it streams in.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use color_eyre::{eyre::eyre, Result};

use crate::client::ChatClient;
use crate::session::{Session, SessionState};
use crate::traits::{Bubble, ChatView, HttpClient};

/// Chat view that prints the answer to a writer.
///
/// The question, input and send control have no terminal counterpart and
/// are ignored. The thinking indicator goes to stderr so the answer on the
/// writer stays clean.
#[derive(Debug)]
pub struct PrintView<W: Write + Send> {
    out: Arc<Mutex<W>>,
}

impl PrintView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> PrintView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    /// Shared handle to the writer.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.out)
    }

    fn write_str(&self, text: &str) {
        write_to(&self.out, text);
    }
}

fn write_to<W: Write>(out: &Mutex<W>, text: &str) {
    if let Ok(mut out) = out.lock() {
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// Prints only what was appended since the last write. A write that does not
/// extend the printed text (an error replacing a partial answer) starts on a
/// fresh line.
#[derive(Debug)]
pub struct PrintBubble<W: Write + Send> {
    out: Arc<Mutex<W>>,
    printed: String,
    thinking: bool,
}

impl<W: Write + Send> Bubble for PrintBubble<W> {
    fn set_thinking(&mut self, thinking: bool) {
        if self.thinking && !thinking {
            eprint!("\r\x1b[2K");
        }
        self.thinking = thinking;
    }

    fn set_text(&mut self, text: &str) {
        if self.thinking {
            eprint!("{}", text);
            return;
        }
        if text.is_empty() {
            return;
        }
        match text.strip_prefix(self.printed.as_str()) {
            Some(delta) => write_to(&self.out, delta),
            None => {
                if !self.printed.is_empty() {
                    write_to(&self.out, "\n");
                }
                write_to(&self.out, text);
            }
        }
        self.printed = text.to_string();
    }

    fn scroll_into_view(&mut self) {}
}

impl<W: Write + Send> ChatView for PrintView<W> {
    type Bubble = PrintBubble<W>;

    fn push_user_message(&self, _text: &str) {}

    fn clear_input(&self) {}

    fn set_send_enabled(&self, _enabled: bool) {}

    fn focus_input(&self) {}

    fn open_assistant_bubble(&self) -> PrintBubble<W> {
        PrintBubble {
            out: Arc::clone(&self.out),
            printed: String::new(),
            thinking: false,
        }
    }
}

/// Stream the answer to `question` into `view`.
///
/// Fails (after printing the failure text) when the exchange ends in
/// `Failed`, so the process exits non-zero.
pub async fn ask_streaming<H, W>(
    client: ChatClient<H>,
    question: &str,
    view: &PrintView<W>,
) -> Result<()>
where
    H: HttpClient,
    W: Write + Send,
{
    let mut session = Session::new(client);
    let report = session
        .ask(question, view)
        .await
        .ok_or_else(|| eyre!("question is empty"))?;
    view.write_str("\n");

    match (report.outcome, report.failure) {
        (SessionState::Failed, Some(cause)) => Err(eyre!("{}", cause)),
        (SessionState::Failed, None) => Err(eyre!("exchange failed")),
        _ => Ok(()),
    }
}

/// Ask through `/api/chat_sync` and print the whole answer at once.
pub async fn ask_blocking<H, W>(client: ChatClient<H>, question: &str, out: &mut W) -> Result<()>
where
    H: HttpClient,
    W: Write,
{
    if question.trim().is_empty() {
        return Err(eyre!("question is empty"));
    }
    let answer = client.ask_sync(question).await?;
    writeln!(out, "{}", answer.content)?;
    Ok(())
}
