//! Keyboard and mouse handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::App;
use crate::traits::HttpClient;

const PAGE_LINES: u16 = 10;
const WHEEL_LINES: u16 = 3;

impl<H: HttpClient + 'static> App<H> {
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => self.quit(),
            KeyCode::Char('l') if ctrl => self.clear_conversation(),
            // Terminals without key disambiguation send Ctrl+J for Shift+Enter
            KeyCode::Char('j') if ctrl => self.input.newline(),
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.input.newline()
            }
            KeyCode::Enter => {
                let question = self.input.text().to_string();
                self.submit(question);
            }
            KeyCode::F(n @ 1..=4) => {
                self.submit_quick_question(usize::from(n - 1));
            }
            KeyCode::Esc => self.input_focused = false,
            KeyCode::Char(c) if !ctrl => {
                self.input_focused = true;
                self.input.insert_char(c);
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE_LINES),
            KeyCode::PageDown => self.scroll_down(PAGE_LINES),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.input_focused = true;
        self.input.insert_str(text);
        self.mark_dirty();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::app::{App, AppMessage, CLEARED_GREETING};
    use crate::client::ChatClient;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app() -> App<MockHttpClient> {
        let http = MockHttpClient::new();
        http.set_response(
            "http://chat.test/api/chat",
            MockResponse::chunks(["data: {\"content\":\"ok\"}\n"]),
        );
        App::new(ChatClient::with_http("http://chat.test", http))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App<MockHttpClient>, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_shift_and_alt_enter_insert_newline() {
        let mut app = app();
        type_str(&mut app, "a");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_str(&mut app, "b");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));

        assert_eq!(app.input.text(), "a\nb\n");
        assert_eq!(app.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_enter_submits_input() {
        let mut app = app();
        type_str(&mut app, "hi");
        app.handle_key(key(KeyCode::Enter));

        let mut rx = app.message_rx.take().unwrap();
        match rx.recv().await {
            Some(AppMessage::UserMessage(text)) => assert_eq!(text, "hi"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_enter_while_send_disabled_keeps_input() {
        let mut app = app();
        app.send_enabled = false;
        type_str(&mut app, "hi");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.input.text(), "hi");
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(app.messages[0].text, CLEARED_GREETING);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_paste_goes_into_input() {
        let mut app = app();
        app.handle_paste("line1\r\nline2");
        assert_eq!(app.input.line_count(), 2);
    }
}
