//! Chart views: index trend, index distribution and technology comparison

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as ChartDataset, GraphType,
        Paragraph,
    },
    Frame,
};

use crate::display::format_value;
use crate::models::{FrequencyColumn, TrendKind};
use crate::tui::app::App;

const TECH_COLORS: [Color; 4] = [Color::Cyan, Color::Green, Color::Yellow, Color::Magenta];

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
}

/// Axis bounds padded so a single value still spans a range
fn padded_bounds(min: f64, max: f64, pad: f64) -> [f64; 2] {
    if (max - min).abs() < f64::EPSILON {
        [min - pad, max + pad]
    } else {
        [min, max]
    }
}

/// Index trend line chart
pub fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let trend = &app.report.trend;
    let title = match trend.kind {
        TrendKind::Company => " Index Trend ",
        TrendKind::Average => " Index Trend (yearly mean) ",
    };

    if trend.points.is_empty() {
        let text = Paragraph::new("No index values to plot.")
            .block(chart_block(title))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let points: Vec<(f64, f64)> = trend
        .points
        .iter()
        .map(|p| (f64::from(p.year), p.value))
        .collect();

    let (x_min, x_max) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    let x_bounds = padded_bounds(x_min, x_max, 1.0);
    let y_bounds = [0.0, if y_max > 0.0 { y_max * 1.1 } else { 1.0 }];

    let precision = app.settings.precision;
    let datasets = vec![
        ChartDataset::default()
            .name("index")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        ChartDataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(chart_block(title))
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(format!("{:.0}", x_bounds[0])),
                    Span::raw(format!("{:.0}", x_bounds[1])),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Index")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(format_value(Some(y_bounds[0]), precision)),
                    Span::raw(format_value(Some(y_bounds[1] / 2.0), precision)),
                    Span::raw(format_value(Some(y_bounds[1]), precision)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Histogram of index values
pub fn render_distribution(frame: &mut Frame, app: &App, area: Rect) {
    let block = chart_block(" Index Distribution ");
    let bins = &app.report.histogram;

    if bins.is_empty() {
        let text = Paragraph::new("No index values to plot.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count as u64)
                .label(Line::from(format!("{:.2}", bin.lower)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let inner_width = block.inner(area).width as usize;
    let bar_width = (inner_width / bars.len()).saturating_sub(1).clamp(1, 9) as u16;

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Technology keyword totals per year, grouped by year
pub fn render_comparison(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let legend: Vec<Span> = FrequencyColumn::TECHNOLOGY
        .iter()
        .zip(TECH_COLORS)
        .flat_map(|(column, color)| {
            [
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!("{}  ", column)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(legend)), chunks[0]);

    let totals = &app.report.yearly_tech_totals;
    let block = chart_block(" Technology Keywords by Year ");
    if totals.is_empty() {
        frame.render_widget(Paragraph::new("No records.").block(block), chunks[1]);
        return;
    }

    let groups: Vec<BarGroup> = totals
        .iter()
        .map(|year| {
            let bars: Vec<Bar> = FrequencyColumn::TECHNOLOGY
                .iter()
                .zip(TECH_COLORS)
                .map(|(column, color)| {
                    Bar::default()
                        .value(year.totals.get(column).copied().unwrap_or(0))
                        .style(Style::default().fg(color))
                })
                .collect();
            BarGroup::default()
                .label(Line::from(year.year.to_string()))
                .bars(&bars)
        })
        .collect();

    let inner_width = block.inner(chunks[1]).width as usize;
    let per_group = inner_width / groups.len();
    let bar_width = (per_group.saturating_sub(2) / 4).clamp(1, 6) as u16;

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2);
    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, chunks[1]);
}
