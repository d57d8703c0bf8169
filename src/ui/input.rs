//! Message input box.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};
use crate::app::App;
use crate::traits::HttpClient;

/// Visible lines before the box stops growing and scrolls.
pub const MAX_INPUT_LINES: u16 = 5;

/// Box height including borders: 3 for one line, up to 7.
pub fn input_box_height(line_count: usize) -> u16 {
    let lines = u16::try_from(line_count).unwrap_or(u16::MAX);
    lines.clamp(1, MAX_INPUT_LINES) + 2
}

pub fn render_input<H: HttpClient + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let (title, border) = if !app.send_enabled {
        (" Waiting for reply… ", COLOR_DIM)
    } else if app.input_focused {
        (" Message ", COLOR_ACCENT)
    } else {
        (" Message ", COLOR_BORDER)
    };

    let (row, col) = app.input.cursor_row_col();
    let visible = MAX_INPUT_LINES as usize;
    let top = row.saturating_sub(visible - 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let paragraph = Paragraph::new(app.input.text())
        .block(block)
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);

    if app.input_focused {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        let line = u16::try_from(row - top).unwrap_or(0);
        let x = area.x.saturating_add(1).saturating_add(col);
        let y = area.y.saturating_add(1).saturating_add(line);
        let max_x = area.right().saturating_sub(2);
        frame.set_cursor_position(Position::new(x.min(max_x), y));
    }
}
