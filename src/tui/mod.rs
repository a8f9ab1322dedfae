//! Terminal User Interface
//!
//! Full-screen rendering of the training terminal with ratatui

pub mod app;
pub mod widgets;

pub use app::{App, Focus};

use crate::terminal::TextColor;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the terminal
pub struct Theme {
    pub fg: Color,
    pub matrix_fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub focus_border: Color,
    pub glow: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::Rgb(0x33, 0xff, 0x33),
            matrix_fg: Color::Rgb(0x00, 0xff, 0x00),
            dim: Color::Rgb(0x1a, 0x80, 0x1a),
            accent: Color::Cyan,
            alert: Color::Rgb(0xff, 0x5f, 0x56),
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            focus_border: Color::Rgb(0x33, 0xff, 0x33),
            glow: Color::Rgb(0x99, 0xff, 0x99),
        }
    }
}

impl Theme {
    /// Body text color for the current effect state
    pub fn text(&self, color: TextColor) -> Color {
        match color {
            TextColor::Normal => self.fg,
            TextColor::Matrix => self.matrix_fg,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Same block, highlighted when it has keyboard focus
pub fn focus_block<'a>(title: &str, focused: bool, theme: &Theme) -> Block<'a> {
    let block = styled_block(title, theme);
    if focused {
        block.border_style(Style::default().fg(theme.focus_border))
    } else {
        block
    }
}

/// Smaller logo for header
pub const SMALL_LOGO: &str = " VIBESEC TERMINAL ";

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the content layout (shortcuts + main area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25), // Shortcuts
            Constraint::Percentage(75), // Main area
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (terminal + quiz)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Terminal
            Constraint::Percentage(40), // Quiz
        ])
        .split(area)
        .to_vec()
}
