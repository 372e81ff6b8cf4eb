mod help;
mod log_view;
mod overlay;
mod status_bar;

use crate::app::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Borders (2), header (1) and status line (1) take four rows; the cursor
/// may sit on rows `viewport_top..=viewport_top + page_height`, so one more
/// comes off.
const RESERVED_ROWS: u16 = 5;

/// Page height for a terminal `height` rows tall.
pub fn page_height_for(height: u16) -> usize {
    height.saturating_sub(RESERVED_ROWS) as usize
}

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Record table
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    log_view::render_log_view(f, chunks[0], app);
    status_bar::render_status_bar(f, chunks[1], app);

    if app.input_mode == InputMode::Details {
        let text = app
            .selected_record()
            .map(|r| r.to_pretty_string())
            .unwrap_or_default();
        overlay::render_details(f, f.area(), &text, app.wrap);
        return;
    }

    match &app.input_mode {
        InputMode::Normal | InputMode::Details => {}
        InputMode::Picker(picker) => overlay::render_picker(f, f.area(), picker),
        InputMode::Prompt(prompt) => overlay::render_prompt(f, f.area(), prompt),
        InputMode::Message(text) => overlay::render_message(f, f.area(), text),
        InputMode::Help => help::render_help_overlay(f, f.area()),
    }
}
