//! Content panel: tab bar plus the view of the active tab

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use super::{charts, panel_block, tables};
use crate::tui::app::{App, ContentTab, FocusedPanel};
use crate::tui::layout::{centered_rect, MainPanelLayout};

/// Render the content panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    let titles: Vec<Line> = ContentTab::ALL
        .iter()
        .map(|tab| Line::from(tab.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(panel_block(" Results ", app, FocusedPanel::Content))
        .select(app.active_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout.tabs);

    // The company list does not depend on the query
    if app.active_tab != ContentTab::Companies {
        if let Some(reason) = &app.report.empty_reason {
            render_empty(frame, &reason.message(), layout.content);
            return;
        }
    }

    match app.active_tab {
        ContentTab::Summary => tables::render_summary(frame, app, layout.content),
        ContentTab::YearStats => tables::render_year_stats(frame, app, layout.content),
        ContentTab::Trend => charts::render_trend(frame, app, layout.content),
        ContentTab::Distribution => charts::render_distribution(frame, app, layout.content),
        ContentTab::Keywords => tables::render_keywords(frame, app, layout.content),
        ContentTab::Comparison => charts::render_comparison(frame, app, layout.content),
        ContentTab::Records => tables::render_full_records(frame, app, layout.content),
        ContentTab::Companies => tables::render_companies(frame, app, layout.content),
    }
}

fn render_empty(frame: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .title(" No Data ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(message.to_string())
        .block(block)
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true });

    frame.render_widget(text, centered_rect(60, 30, area));
}
