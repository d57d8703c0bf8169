//! UI rendering for the chat screen.
//!
//! ```text
//! ┌ header: title, session state, server status ┐
//! │ conversation                                 │
//! │ quick questions                              │
//! │ input box (grows up to MAX_INPUT_LINES)      │
//! └ key hints                                    ┘
//! ```

pub mod input;
pub mod messages;
mod theme;

pub use input::{input_box_height, MAX_INPUT_LINES};
pub use messages::{conversation_lines, wrap_text};
pub use theme::*;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, QUICK_QUESTIONS};
use crate::health_check::LinkStatus;
use crate::traits::HttpClient;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render<H: HttpClient + 'static>(frame: &mut Frame, app: &App<H>) {
    let [header, body, quick, input, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(input_box_height(app.input.line_count())),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    render_conversation(frame, body, app);
    render_quick_questions(frame, quick);
    input::render_input(frame, input, app);
    render_hints(frame, hints);
}

fn render_header<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let status_color = match app.health.status {
        LinkStatus::Online => COLOR_ONLINE,
        LinkStatus::Degraded => COLOR_DEGRADED,
        LinkStatus::Offline => COLOR_OFFLINE,
    };

    let mut spans = vec![
        Span::styled(
            " resume-chat ",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("● ", Style::default().fg(status_color)),
        Span::raw(app.health.summary()),
    ];

    if app.session_state.is_busy() {
        let frame_idx = (app.tick_count / 6) as usize % SPINNER.len();
        spans.push(Span::styled(
            format!("  {} {}", SPINNER[frame_idx], app.session_state),
            Style::default().fg(COLOR_DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_conversation<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);

    let lines = conversation_lines(&app.messages, usize::from(inner.width));
    let top = messages::scroll_top(lines.len(), usize::from(inner.height), app.scroll_offset);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

fn render_quick_questions(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{} ", question),
            Style::default().fg(COLOR_DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = " Enter send · Shift+Enter newline · ↑/↓ scroll · Ctrl+L clear · Ctrl+C quit";
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(COLOR_DIM))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::app::{AppMessage, GREETING};
    use crate::client::ChatClient;
    use crate::health_check::HealthReport;
    use ratatui::{backend::TestBackend, Terminal};
    use uuid::Uuid;

    fn app() -> App<MockHttpClient> {
        App::new(ChatClient::with_http("http://chat.test", MockHttpClient::new()))
    }

    fn draw(app: &App<MockHttpClient>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_initial_screen_shows_greeting_and_status() {
        let screen = draw(&app(), 100, 20);
        assert!(screen.contains(&GREETING[..20]));
        assert!(screen.contains("Not connected"));
        assert!(screen.contains("F1"));
    }

    #[test]
    fn test_thinking_bubble_is_drawn() {
        let mut app = app();
        let id = Uuid::new_v4();
        app.apply_message(AppMessage::BubbleOpened(id));
        app.apply_message(AppMessage::BubbleText {
            id,
            text: "Thinking...".to_string(),
        });
        app.apply_message(AppMessage::Health(HealthReport {
            status: LinkStatus::Online,
            model: Some("m-1".to_string()),
            ..HealthReport::default()
        }));

        let screen = draw(&app, 80, 20);
        assert!(screen.contains("Thinking..."));
        assert!(screen.contains("Connected · m-1"));
    }

    #[test]
    fn test_disabled_send_changes_input_title() {
        let mut app = app();
        app.apply_message(AppMessage::SendEnabled(false));
        let screen = draw(&app, 80, 20);
        assert!(screen.contains("Waiting for reply"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        draw(&app(), 10, 5);
    }

    #[test]
    fn test_very_long_pasted_line_keeps_cursor_in_box() {
        let mut app = app();
        app.handle_paste(&"a".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80);
        assert!(cursor.y < 24);
    }
}
