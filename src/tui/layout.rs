//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: query panel, content panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// Query panel on the left
    pub query_panel: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30), // Query panel (fixed width)
                Constraint::Min(40),    // Main content
            ])
            .split(vertical[0]);

        Self {
            query_panel: horizontal[0],
            main: horizontal[1],
            status_bar: vertical[1],
        }
    }
}

/// Layout for the query panel
pub struct QueryPanelLayout {
    /// Title/header area
    pub header: Rect,
    /// Stock code input
    pub code: Rect,
    /// Year selector
    pub years: Rect,
    /// Key hints
    pub hints: Rect,
}

impl QueryPanelLayout {
    /// Calculate query panel layout
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Code input
                Constraint::Min(4),    // Years
                Constraint::Length(8), // Hints
            ])
            .split(area);

        Self {
            header: chunks[0],
            code: chunks[1],
            years: chunks[2],
            hints: chunks[3],
        }
    }
}

/// Layout for the main panel
pub struct MainPanelLayout {
    /// Tab bar
    pub tabs: Rect,
    /// Content area
    pub content: Rect,
}

impl MainPanelLayout {
    /// Calculate main panel layout
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Content
            ])
            .split(area);

        Self {
            tabs: chunks[0],
            content: chunks[1],
        }
    }
}

/// Create a centered rect, used for the empty-result message
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
