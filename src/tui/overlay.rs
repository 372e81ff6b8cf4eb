use crate::app::{Picker, Prompt};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PROMPT_WIDTH: u16 = 50;
const DETAILS_MARGIN: u16 = 4;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

pub(super) fn render_picker(f: &mut Frame, area: Rect, picker: &Picker) {
    let widest = picker
        .items
        .iter()
        .map(|i| i.width())
        .chain(std::iter::once(picker.title.width()))
        .max()
        .unwrap_or(0) as u16;
    let popup = centered_rect(widest + 6, picker.items.len() as u16 + 2, area);

    let items: Vec<ListItem> = picker
        .items
        .iter()
        .map(|i| ListItem::new(i.as_str()))
        .collect();
    let list = List::new(items)
        .block(titled(&picker.title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(picker.selected));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

pub(super) fn render_prompt(f: &mut Frame, area: Rect, prompt: &Prompt) {
    let popup = centered_rect(PROMPT_WIDTH, 3, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(prompt.input.as_str()).block(titled(&prompt.label)),
        popup,
    );

    let cursor_x = popup.x + 1 + prompt.input.width() as u16;
    if cursor_x < popup.x + popup.width.saturating_sub(1) {
        f.set_cursor_position((cursor_x, popup.y + 1));
    }
}

pub(super) fn render_message(f: &mut Frame, area: Rect, text: &str) {
    let popup = centered_rect(text.width() as u16 + 4, 3, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(Line::from(text)).block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

/// Pretty-printed record; long lines wrap when `wrap` is on.
pub(super) fn render_details(f: &mut Frame, area: Rect, text: &str, wrap: bool) {
    let popup = Rect {
        x: area.x + DETAILS_MARGIN,
        y: area.y + DETAILS_MARGIN / 2,
        width: area.width.saturating_sub(DETAILS_MARGIN * 2),
        height: area.height.saturating_sub(DETAILS_MARGIN),
    };

    let mut paragraph = Paragraph::new(text).block(titled("Details"));
    if wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(20, 10, area), Rect::new(40, 15, 20, 10));
    }

    #[test]
    fn test_centered_rect_shrinks_to_fit() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered_rect(20, 10, area), area);
    }
}
