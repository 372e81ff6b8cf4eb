use super::overlay::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HELP_POPUP_WIDTH: u16 = 56;

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(super) fn render_help_overlay(f: &mut Frame, area: Rect) {
    let help_lines = vec![
        section("Navigation"),
        Line::from("  j/k, ↑/↓      Move selection up/down"),
        Line::from("  PageUp/Down   Scroll by page"),
        Line::from("  0 / $         First / last line"),
        Line::from("  g             Go to line"),
        Line::from("  A / C / G     Top / center / bottom of screen"),
        Line::from("  Enter         Record details"),
        Line::from(""),
        section("Search"),
        Line::from("  /             Search"),
        Line::from("  ?             Search, starting from last term"),
        Line::from("  n             Next match"),
        Line::from(""),
        section("View"),
        Line::from("  s             Sort (pick again to reverse)"),
        Line::from("  i             Invert sort"),
        Line::from("  f             Filter (clears active filter)"),
        Line::from("  l             Filter by level"),
        Line::from("  w             Toggle wrap in details"),
        Line::from("  W             Toggle live tail"),
        Line::from("  r             Reload file"),
        Line::from(""),
        Line::from("  F1 / h        This help"),
        Line::from("  q, Ctrl+C     Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup_area = centered_rect(HELP_POPUP_WIDTH, help_lines.len() as u16 + 2, area);

    f.render_widget(Clear, popup_area);
    f.render_widget(
        Paragraph::new(help_lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        popup_area,
    );
}
