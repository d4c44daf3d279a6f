//! Event handler for the TUI
//!
//! Routes keyboard events to the focused panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, FocusedPanel};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick | Event::Resize(_, _) => {}
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Tab => {
            app.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return;
        }
        KeyCode::PageDown => {
            app.next_tab();
            return;
        }
        KeyCode::PageUp => {
            app.prev_tab();
            return;
        }
        KeyCode::Enter => {
            app.run_query();
            return;
        }
        KeyCode::Esc => {
            app.clear_filter();
            return;
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::CodeInput => handle_code_input_key(app, key),
        FocusedPanel::Years => handle_years_key(app, key),
        FocusedPanel::Content => handle_content_key(app, key),
    }
}

/// Keys while typing a stock code
fn handle_code_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.code_input.insert(c),
        KeyCode::Backspace => app.code_input.backspace(),
        KeyCode::Delete => app.code_input.delete(),
        KeyCode::Left => app.code_input.move_left(),
        KeyCode::Right => app.code_input.move_right(),
        KeyCode::Home => app.code_input.move_start(),
        KeyCode::End => app.code_input.move_end(),
        KeyCode::Up => app.year_up(),
        KeyCode::Down => app.year_down(),
        _ => {}
    }
}

/// Keys while the year list is focused
fn handle_years_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('k') | KeyCode::Up => app.year_up(),
        KeyCode::Char('j') | KeyCode::Down => app.year_down(),
        KeyCode::Home => app.year_index = 0,
        KeyCode::End => app.year_index = app.years.len(),
        _ => {}
    }
}

/// Keys while the content panel is focused
fn handle_content_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_tab(),
        KeyCode::Char('l') | KeyCode::Right => app.next_tab(),
        KeyCode::Home => app.scroll_offset = 0,
        _ => {}
    }
}
