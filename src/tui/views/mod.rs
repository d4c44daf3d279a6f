//! TUI Views module
//!
//! The query panel, the tabbed content panel with its tables and charts,
//! and the status bar.

pub mod charts;
pub mod content;
pub mod query_panel;
pub mod status_bar;
pub mod tables;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use super::app::{App, FocusedPanel};
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    query_panel::render(frame, app, layout.query_panel);
    content::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);
}

/// Bordered block whose border highlights when `panel` has focus
pub(crate) fn panel_block<'a>(title: &'a str, app: &App, panel: FocusedPanel) -> Block<'a> {
    let border_color = if app.focused_panel == panel {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Height available inside a bordered block
pub(crate) fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}
