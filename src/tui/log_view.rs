use crate::app::App;
use crate::config::{Column, ColumnFormat};
use crate::record::{is_truthy, value_text, Record};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SELECTED_BG: Color = Color::DarkGray;
const COLUMN_SPACING: u16 = 1;
/// Full-text columns other than the last are capped at this width
const MAX_COLUMN_WIDTH: u16 = 32;

fn level_color(level: &str) -> Option<Color> {
    match level.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('e') | Some('f') => Some(Color::Red),
        Some('w') => Some(Color::Yellow),
        Some('i') => Some(Color::Green),
        Some('d') | Some('t') => Some(Color::Blue),
        _ => None,
    }
}

/// Text shown for `record` in `column`. Only the first line of a
/// multi-line value is used.
pub(super) fn cell_text(record: &Record, column: &Column) -> String {
    let value = record.lookup(&column.key);
    match column.format_kind() {
        ColumnFormat::Full => value
            .map(|v| value_text(v).lines().next().unwrap_or("").to_string())
            .unwrap_or_default(),
        ColumnFormat::LevelInitial => value
            .and_then(|v| value_text(v).chars().next())
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_default(),
        ColumnFormat::Marker(marker) => {
            if value.is_some_and(is_truthy) {
                marker.to_string()
            } else {
                String::new()
            }
        }
    }
}

/// Width of every column for the given rows. The last column takes
/// whatever `total` leaves over.
pub(super) fn column_widths(columns: &[Column], rows: &[&Record], total: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = columns
        .iter()
        .map(|column| match column.format_kind() {
            ColumnFormat::LevelInitial | ColumnFormat::Marker(_) => 1,
            ColumnFormat::Full => {
                let content = rows
                    .iter()
                    .map(|r| cell_text(r, column).width())
                    .max()
                    .unwrap_or(0);
                content.max(column.title.width()).min(MAX_COLUMN_WIDTH as usize) as u16
            }
        })
        .collect();

    if let Some((last, rest)) = widths.split_last_mut() {
        let spacing = COLUMN_SPACING * rest.len() as u16;
        let used: u16 = rest.iter().sum::<u16>() + spacing;
        *last = total.saturating_sub(used).max(1);
    }
    widths
}

pub(super) fn render_log_view(f: &mut Frame, area: Rect, app: &mut App) {
    let inner_width = area.width.saturating_sub(2);
    let page_height = app.session.cursor().page_height;
    let file_name = app
        .session
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (view, top, relative) = app.session.visible();
    let records = view.slice(top, page_height + 1);
    let columns = &app.config.columns;
    let widths = app
        .column_widths
        .get_or_insert_with(|| column_widths(columns, &records, inner_width))
        .clone();

    let header = Row::new(columns.iter().zip(&widths).map(|(column, width)| {
        let title: String = column.title.chars().take(*width as usize).collect();
        Cell::from(title)
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let cells = columns.iter().map(|column| {
                let text = cell_text(record, column);
                let style = match column.format_kind() {
                    ColumnFormat::LevelInitial => level_color(&text)
                        .map(|c| Style::default().fg(c))
                        .unwrap_or_default(),
                    _ => Style::default(),
                };
                Cell::from(Span::styled(text, style))
            });
            let row = Row::new(cells);
            if i == relative {
                row.style(Style::default().bg(SELECTED_BG).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Length(*w)).collect();
    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", file_name)),
        );

    f.render_widget(table, area);
}
