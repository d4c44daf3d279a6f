//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Every query is run against the engine on demand; the current report is
//! the only derived state kept between frames.

use tracing::debug;

use crate::config::Settings;
use crate::models::{CompanyEntry, DatasetOverview, QueryFilter, YearSelection};
use crate::reports::{IndexReport, ReportOptions};
use crate::services::IndexQueryEngine;

use super::widgets::TextInput;

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    /// Stock code input (typing edits the code)
    #[default]
    CodeInput,
    /// Year selector
    Years,
    /// Result content
    Content,
}

impl FocusedPanel {
    /// The panel that follows this one on Tab
    pub fn next(self) -> Self {
        match self {
            Self::CodeInput => Self::Years,
            Self::Years => Self::Content,
            Self::Content => Self::CodeInput,
        }
    }

    /// The panel before this one on Shift-Tab
    pub fn prev(self) -> Self {
        match self {
            Self::CodeInput => Self::Content,
            Self::Years => Self::CodeInput,
            Self::Content => Self::Years,
        }
    }
}

/// Tabs of the content panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentTab {
    #[default]
    Summary,
    YearStats,
    Trend,
    Distribution,
    Keywords,
    Comparison,
    Records,
    Companies,
}

impl ContentTab {
    /// All tabs in display order
    pub const ALL: [ContentTab; 8] = [
        Self::Summary,
        Self::YearStats,
        Self::Trend,
        Self::Distribution,
        Self::Keywords,
        Self::Comparison,
        Self::Records,
        Self::Companies,
    ];

    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::YearStats => "By Year",
            Self::Trend => "Trend",
            Self::Distribution => "Distribution",
            Self::Keywords => "Keywords",
            Self::Comparison => "Tech by Year",
            Self::Records => "Records",
            Self::Companies => "Companies",
        }
    }

    /// Position in [`ContentTab::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state
pub struct App<'a> {
    /// The query engine
    pub engine: &'a IndexQueryEngine,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Stock code being typed
    pub code_input: TextInput,

    /// Distinct years, most recent first
    pub years: Vec<i32>,

    /// Selected entry of the year list; 0 is "All"
    pub year_index: usize,

    /// Active content tab
    pub active_tab: ContentTab,

    /// Report for the last query
    pub report: IndexReport,

    /// Whole-dataset totals
    pub overview: DatasetOverview,

    /// Every company in the dataset
    pub companies: Vec<CompanyEntry>,

    /// Scroll offset for the content panel
    pub scroll_offset: u16,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App showing the whole dataset
    pub fn new(engine: &'a IndexQueryEngine, settings: &'a Settings) -> Self {
        let dataset = engine.dataset();
        let options = ReportOptions::from(settings);
        let report = IndexReport::generate(engine, &QueryFilter::all(), &options);

        Self {
            engine,
            settings,
            should_quit: false,
            focused_panel: FocusedPanel::default(),
            code_input: TextInput::new()
                .label("Code")
                .placeholder("e.g. 600000")
                .focused(true),
            years: IndexQueryEngine::distinct_years(dataset),
            year_index: 0,
            active_tab: ContentTab::default(),
            report,
            overview: IndexQueryEngine::overview(dataset),
            companies: IndexQueryEngine::companies(dataset),
            scroll_offset: 0,
            status_message: None,
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Labels of the year list: "All" then each year
    pub fn year_options(&self) -> Vec<String> {
        std::iter::once(YearSelection::All.to_string())
            .chain(self.years.iter().map(|y| y.to_string()))
            .collect()
    }

    /// Year selection for the highlighted entry
    pub fn selected_year(&self) -> YearSelection {
        match self.year_index {
            0 => YearSelection::All,
            i => self
                .years
                .get(i - 1)
                .copied()
                .map_or(YearSelection::All, YearSelection::Year),
        }
    }

    /// Move the year selection up
    pub fn year_up(&mut self) {
        self.year_index = self.year_index.saturating_sub(1);
    }

    /// Move the year selection down
    pub fn year_down(&mut self) {
        if self.year_index < self.years.len() {
            self.year_index += 1;
        }
    }

    /// Cycle focus forward
    pub fn focus_next(&mut self) {
        self.set_focus(self.focused_panel.next());
    }

    /// Cycle focus backward
    pub fn focus_prev(&mut self) {
        self.set_focus(self.focused_panel.prev());
    }

    fn set_focus(&mut self, panel: FocusedPanel) {
        self.focused_panel = panel;
        self.code_input.focused = panel == FocusedPanel::CodeInput;
    }

    /// Returns true while keystrokes go to the code input
    pub fn is_editing(&self) -> bool {
        self.focused_panel == FocusedPanel::CodeInput
    }

    /// Switch to the next content tab
    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
        self.scroll_offset = 0;
    }

    /// Switch to the previous content tab
    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
        self.scroll_offset = 0;
    }

    /// Scroll the content panel
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll the content panel back
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// The filter described by the query panel
    pub fn current_filter(&self) -> QueryFilter {
        QueryFilter {
            stock_code: Some(self.code_input.value().trim().to_string())
                .filter(|code| !code.is_empty()),
            year: self.selected_year(),
        }
    }

    /// Run the query described by the query panel
    pub fn run_query(&mut self) {
        let filter = self.current_filter();
        debug!(?filter, "running query from dashboard");
        self.report =
            IndexReport::generate(self.engine, &filter, &ReportOptions::from(self.settings));
        self.scroll_offset = 0;

        match &self.report.empty_reason {
            Some(reason) => self.set_status(reason.message()),
            None if filter.is_unrestricted() => {
                let message = format!("Showing all {} records", self.report.summary.record_count);
                self.set_status(message);
            }
            None => {
                let message = format!(
                    "{} records, {} companies",
                    self.report.summary.record_count, self.report.summary.distinct_company_count
                );
                self.set_status(message);
            }
        }
    }

    /// Reset the query panel and show the whole dataset
    pub fn clear_filter(&mut self) {
        self.code_input.clear();
        self.year_index = 0;
        self.run_query();
        self.set_status("Filter cleared");
    }
}
