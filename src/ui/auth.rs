use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use sentui::model::forms::{AuthField, AuthForm};

use super::layout::centered_rect;

fn field_lines(
    label: &'static str,
    value: String,
    focused: bool,
    error: Option<&String>,
) -> Vec<Line<'static>> {
    let value_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "█" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        Line::from(vec![
            Span::styled(if focused { "> " } else { "  " }, value_style),
            Span::styled(value, value_style),
            Span::raw(cursor),
        ]),
    ];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(""));
    lines
}

/// Render the login or register form in the middle of the screen
pub fn render_auth_form(f: &mut Frame, form: &AuthForm, register: bool) {
    let title = if register { "Create account" } else { "Log in" };
    let switch_hint = if register { ":Have an account? Log in" } else { ":Register" };

    let mut lines = Vec::new();
    lines.extend(field_lines(
        "Login",
        form.login.clone(),
        form.focus == AuthField::Login,
        form.errors.login.as_ref(),
    ));
    lines.extend(field_lines(
        "Password",
        "•".repeat(form.password.chars().count()),
        form.focus == AuthField::Password,
        form.errors.password.as_ref(),
    ));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
        lines.push(Line::from(""));
    }

    if form.is_submitting {
        lines.push(Line::from(Span::styled("Please wait...", Style::default().fg(Color::Yellow))));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(":Submit  "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(":Next field  "),
            Span::styled("^N", Style::default().fg(Color::Yellow)),
            Span::raw(switch_hint),
            Span::raw("  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit"),
        ]));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect(60, height, f.area());
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
}
