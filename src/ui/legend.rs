use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn hotkey(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

/// Build hotkey spans for the dashboard (extracted for testability)
fn build_hotkey_spans(
    vim_mode: bool,
    panel_open: bool,
    can_export: bool,
    can_delete: bool,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    if vim_mode {
        spans.extend(hotkey("j/k", ":Nav  "));
        spans.extend(hotkey("gg/G", ":First/Last  "));
    } else {
        spans.extend(hotkey("↑/↓", ":Nav  "));
    }

    if panel_open {
        spans.extend(hotkey("Space/Enter", ":Toggle  "));
        spans.extend(hotkey("Esc", ":Close panel  "));
    } else {
        spans.extend(hotkey("Enter", ":Expand  "));
    }

    spans.extend(hotkey("t", ":Tonality  "));
    spans.extend(hotkey("s", ":Source  "));
    spans.extend(hotkey("</>", ":Sort tone  "));
    spans.extend(hotkey("a/z", ":Sort source  "));
    spans.extend(hotkey("c", ":Clear  "));

    if !panel_open {
        spans.extend(hotkey("v", ":Version  "));
        spans.extend(hotkey("i", ":Import  "));
        if can_export {
            spans.extend(hotkey("e", ":Export  "));
        }
        if can_delete {
            spans.extend(hotkey("d", ":Delete  "));
        }
        spans.extend(hotkey("r", ":Reload  "));
        spans.extend(hotkey("m", ":Metrics  "));
        spans.extend(hotkey("p", ":Try text  "));
        spans.extend(hotkey("L", ":Logout  "));
        spans.extend(hotkey("q", ":Quit"));
    }

    spans
}

/// Rows the legend needs at `width` (borders included)
pub fn calculate_legend_height(width: u16, vim_mode: bool, panel_open: bool) -> u16 {
    let spans = build_hotkey_spans(vim_mode, panel_open, true, true);
    let text_width: usize = spans.iter().map(|s| s.width()).sum();
    let inner = width.saturating_sub(2).max(1) as usize;
    let lines = text_width.div_ceil(inner).max(1);
    lines as u16 + 2
}

/// Render the dashboard hotkey legend
pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    panel_open: bool,
    can_export: bool,
    can_delete: bool,
) {
    let spans = build_hotkey_spans(vim_mode, panel_open, can_export, can_delete);
    let legend = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .wrap(Wrap { trim: false });
    f.render_widget(legend, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_export_and_delete_hidden_when_unavailable() {
        let legend = text(&build_hotkey_spans(false, false, false, false));
        assert!(!legend.contains(":Export"));
        assert!(!legend.contains(":Delete"));
        assert!(legend.contains(":Import"));
    }

    #[test]
    fn test_panel_open_shows_close_hint() {
        let legend = text(&build_hotkey_spans(false, true, true, true));
        assert!(legend.contains("Esc:Close panel"));
        assert!(!legend.contains(":Version"));
    }

    #[test]
    fn test_vim_mode_keys() {
        let legend = text(&build_hotkey_spans(true, false, true, true));
        assert!(legend.contains("j/k:Nav"));
    }

    #[test]
    fn test_legend_height_grows_when_narrow() {
        let wide = calculate_legend_height(400, false, false);
        let narrow = calculate_legend_height(40, false, false);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
