use std::collections::HashSet;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use sentui::logic::tonality;
use sentui::model::{ReviewFilters, ReviewItem};
use sentui::{FilterKey, SortDirection};

use super::dashboard::tone_color;

const TONE_COL: u16 = 14;
const SOURCE_COL: u16 = 20;

/// Cut `text` to `width` columns, ending with `…` when shortened
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Greedy word wrap to `width` columns; long words are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() { word_width } else { word_width + 1 };

        if current_width + needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += w;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Column header with its filter indicator and sort arrow
fn header_label(filters: &ReviewFilters, key: FilterKey) -> Line<'static> {
    let mut spans = vec![Span::raw(key.column_label())];

    match filters.sort_direction(key) {
        Some(SortDirection::Asc) => spans.push(Span::raw(" ↑")),
        Some(SortDirection::Desc) => spans.push(Span::raw(" ↓")),
        None => {}
    }

    if filters.indicator_active(key) {
        spans.push(Span::styled(" ●", Style::default().fg(Color::Cyan)));
    }

    Line::from(spans)
}

/// Render the filtered, sorted review table
pub fn render_review_table(
    f: &mut Frame,
    area: Rect,
    rows: &[ReviewItem],
    filters: &ReviewFilters,
    expanded: &HashSet<String>,
    selected: Option<usize>,
) {
    let text_width = area.width.saturating_sub(TONE_COL + SOURCE_COL + 6) as usize;

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|review| {
            let meta = tonality::meta(review.tonality);
            let text_lines: Vec<Line> = if expanded.contains(&review.id) {
                wrap_text(&review.text, text_width)
                    .into_iter()
                    .map(Line::from)
                    .collect()
            } else {
                vec![Line::from(truncate_to_width(&review.text, text_width))]
            };
            let height = text_lines.len() as u16;

            Row::new(vec![
                Cell::from(Span::styled(meta.label, Style::default().fg(tone_color(&meta)))),
                Cell::from(truncate_to_width(&review.source, SOURCE_COL as usize)),
                Cell::from(text_lines),
            ])
            .height(height.max(1))
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(header_label(filters, FilterKey::Tonality)),
        Cell::from(header_label(filters, FilterKey::Source)),
        Cell::from("Text"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let title = format!("Reviews ({})", rows.len());
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(TONE_COL),
            Constraint::Length(SOURCE_COL),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("► ");

    let mut state = TableState::default();
    state.select(selected);
    f.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer line", 6), "a lon…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("", 5), vec![""]);
    }

    #[test]
    fn test_header_label_marks_active_column() {
        let mut filters = ReviewFilters::new();
        filters.set_sort_direction(FilterKey::Source, SortDirection::Desc);

        let source = header_label(&filters, FilterKey::Source);
        let text: String = source.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Source ↓ ●");

        let tone = header_label(&filters, FilterKey::Tonality);
        assert_eq!(tone.spans.len(), 1);
    }
}
