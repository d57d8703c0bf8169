//! Conversation rendering and text wrapping.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{COLOR_ASSISTANT, COLOR_DIM, COLOR_USER};
use crate::app::{ChatMessage, Role};

const INDENT: &str = "  ";

/// Word-wrap `text` to `width` display columns.
///
/// Explicit newlines are kept, words wider than the line are broken, and
/// every input line produces at least one output line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in raw.split_inclusive(' ') {
            let word_width = word.trim_end_matches(' ').width();

            if line_width + word_width > width && line_width > 0 {
                out.push(line.trim_end().to_string());
                line.clear();
                line_width = 0;
            }

            if word_width > width {
                for c in word.chars() {
                    let w = c.width().unwrap_or(0);
                    if line_width + w > width && line_width > 0 {
                        out.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(c);
                    line_width += w;
                }
            } else {
                line.push_str(word);
                line_width += word.width();
            }
        }

        out.push(line.trim_end().to_string());
    }

    out
}

/// All conversation lines for a pane `width` columns wide.
pub fn conversation_lines(messages: &[ChatMessage], width: usize) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(INDENT.width());
    let mut lines = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }

        let (label, color) = match message.role {
            Role::User => ("You", COLOR_USER),
            Role::Assistant => ("Assistant", COLOR_ASSISTANT),
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        let body_style = if message.thinking {
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC)
        } else {
            Style::default()
        };
        for row in wrap_text(&message.text, content_width) {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(row, body_style),
            ]));
        }
    }

    lines
}

/// Top row to show so that `offset` counts lines up from the bottom.
pub fn scroll_top(total: usize, height: usize, offset: u16) -> usize {
    let max_top = total.saturating_sub(height);
    max_top.saturating_sub(usize::from(offset))
}
