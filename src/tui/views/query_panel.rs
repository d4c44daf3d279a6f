//! Query panel view
//!
//! Shows the stock code input, the year selector and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::panel_block;
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::QueryPanelLayout;

/// Render the query panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = QueryPanelLayout::new(area);

    render_header(frame, layout.header);
    render_code_input(frame, app, layout.code);
    render_years(frame, app, layout.years);
    render_hints(frame, layout.hints);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" DTI Query ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let version = Paragraph::new(format!("v{}", env!("CARGO_PKG_VERSION")))
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(version, area);
}

fn render_code_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" Stock Code ", app, FocusedPanel::CodeInput);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(app.code_input.clone(), inner);
}

fn render_years(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel_block(" Year ", app, FocusedPanel::Years);

    let items: Vec<ListItem> = app
        .year_options()
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.year_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let hint = |k: &'static str, text: &'static str| {
        Line::from(vec![Span::styled(format!("{:<9}", k), key), Span::raw(text)])
    };

    let lines = vec![
        hint("Enter", "run query"),
        hint("Tab", "switch panel"),
        hint("Up/Down", "change year"),
        hint("PgUp/Dn", "switch tab"),
        hint("Esc", "clear filter"),
        hint("q", "quit"),
    ];

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
