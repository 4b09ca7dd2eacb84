use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sentui::model::{ConnectionState, Model};

/// Render the bottom status bar: user, counts and connection state
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let user = model.session.login.as_deref().unwrap_or("-");
    let total = model.reports.reviews.len();
    let shown = model.visible_reviews().len();

    let reviews = if shown == total {
        format!("Reviews: {}", total)
    } else {
        format!("Reviews: {} (showing {})", total, shown)
    };

    let mut spans = vec![
        Span::raw(format!("User: {}", user)),
        Span::raw(" │ "),
        Span::raw(format!("Versions: {}", model.session.reports.len())),
        Span::raw(" │ "),
        Span::raw(reviews),
        Span::raw(" │ "),
    ];

    if model.reports.from_cache {
        spans.push(Span::styled("Cached copy │ ", Style::default().fg(Color::Yellow)));
    }

    spans.push(match &model.session.connection_state {
        ConnectionState::Connected => Span::styled("Connected", Style::default().fg(Color::Green)),
        ConnectionState::Unknown => Span::styled("Connecting...", Style::default().fg(Color::Gray)),
        ConnectionState::Disconnected { message, .. } => Span::styled(
            format!("Disconnected: {}", message),
            Style::default().fg(Color::Red),
        ),
    });

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
