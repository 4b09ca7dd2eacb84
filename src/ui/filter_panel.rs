use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use sentui::model::filters::{FilterOptionKind, FilterSection};

use super::layout::centered_rect;

/// Marker drawn in front of an option
fn option_marker(kind: &FilterOptionKind) -> &'static str {
    match kind {
        FilterOptionKind::Checkbox { checked: true } => "[x] ",
        FilterOptionKind::Checkbox { checked: false } => "[ ] ",
        FilterOptionKind::Button { active: true } => "(●) ",
        FilterOptionKind::Button { active: false } => "( ) ",
    }
}

/// Build list rows for the sections and map the option cursor to a row index
fn build_items(sections: &[FilterSection], cursor: usize) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut items = Vec::new();
    let mut selected_row = None;
    let mut option_idx = 0;

    for (section_idx, section) in sections.iter().enumerate() {
        if section_idx > 0 {
            items.push(ListItem::new(Line::from("")));
        }
        items.push(ListItem::new(Line::from(Span::styled(
            section.title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))));

        if section.options.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "  (nothing to choose)",
                Style::default().fg(Color::DarkGray),
            ))));
        }

        for option in &section.options {
            if option_idx == cursor {
                selected_row = Some(items.len());
            }
            let active = matches!(
                option.kind,
                FilterOptionKind::Checkbox { checked: true } | FilterOptionKind::Button { active: true }
            );
            let style = if active {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(option_marker(&option.kind), style),
                Span::styled(option.label.clone(), style),
            ])));
            option_idx += 1;
        }
    }

    (items, selected_row)
}

/// Render the open filter panel as a centred modal
pub fn render_filter_panel(f: &mut Frame, title: &str, sections: &[FilterSection], cursor: usize) {
    let (items, selected_row) = build_items(sections, cursor);

    let height = (items.len() as u16 + 2).clamp(8, 24);
    let area = centered_rect(44, height, f.area());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Esc to close)", title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(selected_row);

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentui::model::{FilterMsg, ReviewFilters};
    use sentui::FilterKey;

    #[test]
    fn test_cursor_skips_section_headers() {
        let mut filters = ReviewFilters::new();
        filters.update(FilterMsg::TogglePanel(FilterKey::Tonality));
        let sections = filters.panel_sections(&[]);

        // Row 0 is the "Filters" header, so option 0 sits on row 1
        let (_, first) = build_items(&sections, 0);
        assert_eq!(first, Some(1));

        // Options 0-2 are checkboxes; option 3 follows a blank row and the "Sorting" header
        let (items, fourth) = build_items(&sections, 3);
        assert_eq!(fourth, Some(6));
        assert_eq!(items.len(), 8);
    }

    #[test]
    fn test_empty_source_section_has_placeholder() {
        let mut filters = ReviewFilters::new();
        filters.update(FilterMsg::TogglePanel(FilterKey::Source));
        let sections = filters.panel_sections(&[]);

        let (items, selected) = build_items(&sections, 0);
        // header, placeholder, blank, header, two buttons
        assert_eq!(items.len(), 6);
        assert_eq!(selected, Some(4));
    }

    #[test]
    fn test_option_markers() {
        assert_eq!(option_marker(&FilterOptionKind::Checkbox { checked: true }), "[x] ");
        assert_eq!(option_marker(&FilterOptionKind::Button { active: false }), "( ) ");
    }
}
