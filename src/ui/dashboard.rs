//! Dashboard widgets: header, stat cards, tonality chart, empty state

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use sentui::logic::stats::{self, StatCard, TonalityTotals};
use sentui::logic::tonality::ToneMeta;
use sentui::model::Model;

pub fn tone_color(tone: &ToneMeta) -> Color {
    let (r, g, b) = tone.accent;
    Color::Rgb(r, g, b)
}

/// Top bar: who is signed in, which version is shown, what is running
pub fn render_header(f: &mut Frame, area: Rect, model: &Model) {
    let mut spans = vec![
        Span::styled(
            "Review tonality",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  Version: "),
        Span::styled(model.version_label(), Style::default().fg(Color::Cyan)),
    ];

    let busy: Vec<&str> = [
        (model.reports.is_importing, "Uploading..."),
        (model.reports.is_exporting, "Exporting..."),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, label)| *label)
    .collect();

    if !busy.is_empty() {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(busy.join(" "), Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_card(f: &mut Frame, area: Rect, card: &StatCard) {
    let color = tone_color(&card.tone);
    let lines = vec![
        Line::from(Span::styled(
            format!("{}%", card.percent),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(card.count_label.clone()),
        Line::from(Span::styled(
            card.tone.description,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(card.tone.label);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// One card per tonality, always computed over the unfiltered rows
pub fn render_stat_cards(f: &mut Frame, area: Rect, totals: &TonalityTotals) {
    let cards = stats::stat_cards(totals);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        render_card(f, *column, card);
    }
}

pub fn render_chart(f: &mut Frame, area: Rect, totals: &TonalityTotals) {
    if area.width == 0 {
        return;
    }

    let bars: Vec<Bar> = stats::chart_bars(totals)
        .into_iter()
        .map(|(label, value, tone)| {
            let color = tone_color(&sentui::logic::tonality::meta(tone));
            Bar::default()
                .value(value)
                .label(Line::from(label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let bar_width = (area.width.saturating_sub(4) / 3).clamp(3, 9);
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Distribution"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    f.render_widget(chart, area);
}

/// Shown instead of the table when there is nothing to display
pub fn render_empty_state(f: &mut Frame, area: Rect, is_loading: bool) {
    let lines = if is_loading {
        vec![Line::from("Loading report...")]
    } else {
        vec![
            Line::from(Span::styled(
                "No analysis version selected",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Import a CSV file with reviews (i) or pick a saved version (v)."),
        ]
    };

    let hint = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Reviews"));
    f.render_widget(hint, area);
}
