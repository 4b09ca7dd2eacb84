use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use sentui::logic::tonality;
use sentui::model::forms::DemoState;

use super::dashboard::tone_color;

/// Render the single-text prediction screen
pub fn render_demo(f: &mut Frame, demo: &DemoState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let mut input_lines = vec![Line::from(vec![
        Span::raw(demo.text.clone()),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ])];
    if let Some(error) = &demo.error {
        input_lines.push(Line::from(""));
        input_lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
    }
    let input = Paragraph::new(input_lines)
        .block(Block::default().borders(Borders::ALL).title("Review text"))
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[0]);

    let result_lines = if demo.is_submitting {
        vec![Line::from(Span::styled("Analysing...", Style::default().fg(Color::Yellow)))]
    } else if let Some(result) = &demo.result {
        let meta = tonality::meta(result.tonality);
        vec![
            Line::from(Span::styled(
                meta.label,
                Style::default().fg(tone_color(&meta)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(meta.description, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(result.text.clone()),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Type a review and press Enter to see its tonality.",
            Style::default().fg(Color::DarkGray),
        ))]
    };
    let result = Paragraph::new(result_lines)
        .block(Block::default().borders(Borders::ALL).title("Result"))
        .wrap(Wrap { trim: false });
    f.render_widget(result, chunks[1]);

    let legend = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(":Analyse  "),
        Span::styled("^L", Style::default().fg(Color::Yellow)),
        Span::raw(":Clear  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(":Back to dashboard"),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Hotkeys"));
    f.render_widget(legend, chunks[2]);
}
