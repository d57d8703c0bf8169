//! Color theme constants for the chat screen.

use ratatui::style::Color;

/// Borders and separators
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Focused input border and title
pub const COLOR_ACCENT: Color = Color::White;

/// "You" label
pub const COLOR_USER: Color = Color::Cyan;

/// "Assistant" label
pub const COLOR_ASSISTANT: Color = Color::Rgb(4, 181, 117);

/// Thinking placeholder and hints
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_ONLINE: Color = Color::LightGreen;
pub const COLOR_DEGRADED: Color = Color::Yellow;
pub const COLOR_OFFLINE: Color = Color::Red;
