//! Table views of the current report

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::inner_height;
use crate::display::{format_value, format_year_range, truncate};
use crate::models::{FrequencyColumn, Record};
use crate::tui::app::App;

fn header_row<'a>(titles: impl IntoIterator<Item = &'a str>) -> Row<'a> {
    Row::new(titles.into_iter().map(str::to_string)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
}

/// Summary metrics above the preview table
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let summary = &app.report.summary;
    let precision = app.settings.precision;
    let label = Style::default().fg(Color::Cyan);
    let metric = |name: &'static str, value: String| {
        Line::from(vec![Span::styled(format!("{:<14}", name), label), Span::raw(value)])
    };

    let left = vec![
        metric("Records", summary.record_count.to_string()),
        metric("Companies", summary.distinct_company_count.to_string()),
        metric("Years", format_year_range(summary.year_range)),
    ];
    let right = vec![
        metric("Mean index", format_value(summary.mean, precision)),
        metric("Max index", format_value(summary.max, precision)),
        metric("Min index", format_value(summary.min, precision)),
        metric("Median index", format_value(summary.median, precision)),
        metric("Std deviation", format_value(summary.standard_deviation, precision)),
    ];

    let title = app.report.title();
    let block = bordered(&title);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);
    frame.render_widget(Paragraph::new(left), columns[0]);
    frame.render_widget(Paragraph::new(right), columns[1]);

    let title = format!(" Preview (first {} records) ", app.report.preview.len());
    render_records(frame, app, &app.report.preview, &title, chunks[1]);
}

/// Per-year statistics table
pub fn render_year_stats(frame: &mut Frame, app: &App, area: Rect) {
    let precision = app.settings.precision;
    let rows = app
        .report
        .year_stats
        .iter()
        .skip(app.scroll_offset as usize)
        .map(|s| {
            Row::new(vec![
                s.year.to_string(),
                format_value(s.mean, precision),
                format_value(s.median, precision),
                format_value(s.max, precision),
                format_value(s.min, precision),
                format_value(s.standard_deviation, precision),
                s.company_count.to_string(),
            ])
        });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header_row([
            "Year", "Mean", "Median", "Max", "Min", "Std Dev", "Companies",
        ]))
        .block(bordered(" Statistics by Year "));

    frame.render_widget(table, area);
}

/// Keyword frequency statistics table
pub fn render_keywords(frame: &mut Frame, app: &App, area: Rect) {
    let precision = app.settings.precision;
    let rows = app.report.tech_summary.iter().map(|(column, stats)| {
        Row::new(vec![
            column.to_string(),
            stats.sum.to_string(),
            format_value(stats.mean, precision),
            stats.max.map_or_else(|| "-".to_string(), |v| v.to_string()),
            stats.min.map_or_else(|| "-".to_string(), |v| v.to_string()),
        ])
    });

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(["Keyword", "Total", "Mean", "Max", "Min"]))
        .block(bordered(" Keyword Frequency Statistics "));

    frame.render_widget(table, area);
}

/// Complete records of a single company
pub fn render_full_records(frame: &mut Frame, app: &App, area: Rect) {
    match &app.report.full_records {
        Some(records) => render_records(frame, app, records, " Complete Data ", area),
        None => {
            let text = Paragraph::new("Query a single stock code to see its complete data.")
                .block(bordered(" Complete Data "))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text, area);
        }
    }
}

fn render_records(frame: &mut Frame, app: &App, records: &[Record], title: &str, area: Rect) {
    let precision = app.settings.precision;
    let rows = records
        .iter()
        .skip(app.scroll_offset as usize)
        .take(inner_height(area))
        .map(|r| {
            let mut cells = vec![
                r.year.to_string(),
                r.stock_code.clone(),
                truncate(&r.company_name, 10),
            ];
            cells.extend(FrequencyColumn::ALL.iter().map(|c| r.frequency(*c).to_string()));
            cells.push(format_value(r.index_value(), precision));
            Row::new(cells)
        });

    let mut widths = vec![
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(20),
    ];
    widths.extend([Constraint::Length(8); 5]);
    widths.push(Constraint::Length(10));

    let titles = [
        "Year", "Code", "Company", "AI", "BigData", "Cloud", "Chain", "Digital", "Index",
    ];

    let table = Table::new(rows, widths)
        .header(header_row(titles))
        .block(bordered(title));

    frame.render_widget(table, area);
}

/// Every stock code and company name
pub fn render_companies(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app
        .companies
        .iter()
        .skip(app.scroll_offset as usize)
        .take(inner_height(area))
        .map(|c| Row::new(vec![c.stock_code.clone(), c.company_name.clone()]));

    let title = format!(" Companies ({}) ", app.companies.len());
    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(20)])
        .header(header_row(["Stock Code", "Company"]))
        .block(bordered(&title));

    frame.render_widget(table, area);
}
