//! Terminal User Interface module
//!
//! An interactive dashboard over the query engine using ratatui: a query
//! panel on the left, tabbed results on the right.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
