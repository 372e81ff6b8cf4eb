use crate::app::{App, InputMode};
use crate::event::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input and return corresponding events
/// Does not mutate app state directly - returns events to be processed
pub fn handle_input_event(key: KeyEvent, app: &App) -> Vec<AppEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![AppEvent::Quit];
    }

    match &app.input_mode {
        InputMode::Normal => handle_normal_mode(key, app),
        InputMode::Picker(_) => handle_picker_mode(key),
        InputMode::Prompt(_) => handle_prompt_mode(key),
        InputMode::Details => handle_details_mode(key),
        InputMode::Help | InputMode::Message(_) => vec![AppEvent::CloseOverlay],
    }
}

/// Handle keyboard input while a picker is open
fn handle_picker_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Up => vec![AppEvent::PickerUp],
        KeyCode::Down => vec![AppEvent::PickerDown],
        KeyCode::Enter => vec![AppEvent::PickerSelect],
        KeyCode::Esc => vec![AppEvent::Cancel],
        KeyCode::Char(c) => vec![AppEvent::PickerJump(c)],
        _ => vec![],
    }
}

/// Handle keyboard input while a text prompt is open
fn handle_prompt_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Char(c) => vec![AppEvent::PromptChar(c)],
        KeyCode::Backspace => vec![AppEvent::PromptBackspace],
        KeyCode::Enter => vec![AppEvent::PromptSubmit],
        KeyCode::Esc => vec![AppEvent::Cancel],
        _ => vec![],
    }
}

/// Handle keyboard input while the details overlay is showing
fn handle_details_mode(key: KeyEvent) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => vec![AppEvent::CloseOverlay],
        KeyCode::Char('w') => vec![AppEvent::ToggleWrap],
        _ => vec![],
    }
}

/// Handle keyboard input in normal navigation mode
fn handle_normal_mode(key: KeyEvent, app: &App) -> Vec<AppEvent> {
    match key.code {
        KeyCode::Char('q') => vec![AppEvent::Quit],
        KeyCode::Down | KeyCode::Char('j') => vec![AppEvent::MoveDown],
        KeyCode::Up | KeyCode::Char('k') => vec![AppEvent::MoveUp],
        KeyCode::PageDown => vec![AppEvent::PageDown],
        KeyCode::PageUp => vec![AppEvent::PageUp],
        KeyCode::Enter => vec![AppEvent::ShowDetails],
        KeyCode::F(1) | KeyCode::Char('h') => vec![AppEvent::ShowHelp],
        KeyCode::Char('0') => vec![AppEvent::FirstLine],
        KeyCode::Char('$') => vec![AppEvent::LastLine],
        KeyCode::Char('g') => vec![AppEvent::OpenGotoLine],
        KeyCode::Char('/') => vec![AppEvent::OpenSearch { fresh: true }],
        KeyCode::Char('?') => vec![AppEvent::OpenSearch { fresh: false }],
        KeyCode::Char('n') => vec![AppEvent::RepeatSearch],
        KeyCode::Char('s') => vec![AppEvent::OpenSort],
        KeyCode::Char('i') => vec![AppEvent::InvertSort],
        KeyCode::Char('f') => {
            if app.session.has_filters() {
                vec![AppEvent::ClearFilters]
            } else {
                vec![AppEvent::OpenFilter]
            }
        }
        KeyCode::Char('l') => vec![AppEvent::OpenLevelFilter],
        KeyCode::Char('w') => vec![AppEvent::ToggleWrap],
        KeyCode::Char('W') => vec![AppEvent::ToggleWatch],
        KeyCode::Char('r') => vec![AppEvent::Reload],
        KeyCode::Char('A') => vec![AppEvent::FirstViewportLine],
        KeyCode::Char('G') => vec![AppEvent::LastViewportLine],
        KeyCode::Char('C') => vec![AppEvent::CenterViewportLine],
        _ => vec![],
    }
}
