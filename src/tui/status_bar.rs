use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// `row/len` position, 1-based; `0/0` for an empty view.
pub(super) fn position_text(row: usize, len: usize) -> String {
    if len == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", row + 1, len)
    }
}

pub(super) fn render_status_bar(f: &mut Frame, area: Rect, app: &mut App) {
    let len = app.session.len();
    let row = app.session.cursor().row;
    let engine = app.session.engine();

    let sort = engine
        .sort()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    let filters = engine.filters();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.session.path().display()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("| {} ", position_text(row, len))),
        Span::raw(format!("| sort: {} ", sort)),
    ];
    if !filters.is_empty() {
        spans.push(Span::styled(
            format!("| filter: {} ", filters),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.session.is_watching() {
        spans.push(Span::styled("| WATCH ", Style::default().fg(Color::Green)));
    }
    if app.wrap {
        spans.push(Span::raw("| wrap "));
    }
    spans.push(Span::styled(
        format!("| {} ", app.input_mode.name()),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::styled(
        "| F1 help",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
