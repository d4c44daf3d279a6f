//! Status bar view
//!
//! Shows dataset totals, the last status message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::format_year_range;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let overview = &app.overview;

    let mut spans = vec![
        Span::styled(" Companies: ", Style::default().fg(Color::White)),
        Span::styled(
            overview.company_count.to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled(
            format_year_range(overview.year_range),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled("Records: ", Style::default().fg(Color::White)),
        Span::styled(
            overview.record_count.to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        let color = if app.report.is_empty() {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::styled(message.as_str(), Style::default().fg(color)));
    }

    let hints = if app.is_editing() {
        " Tab:Panel  Enter:Query  Esc:Clear "
    } else {
        " q:Quit  Enter:Query  PgUp/PgDn:Tab "
    };

    // Pad with terminal columns so the hints stay right-aligned with CJK text
    let left_width: usize = spans.iter().map(|s| s.width()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_width)
        .saturating_sub(hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
