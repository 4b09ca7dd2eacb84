use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

use sentui::logic::metrics;
use sentui::model::types::{MetricsResult, VersionOption};
use sentui::model::ui::MetricsDialog;
use sentui::model::upload::UploadForm;
use sentui::utils;

use super::layout::centered_rect;

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, label: &str) {
    let prompt_text = format!(
        "Delete analysis version?\n\n\
        Version: {}\n\n\
        WARNING: This action cannot be undone!\n\n\
        Continue? (y/n)",
        label
    );

    let area = centered_rect(50, 11, f.area());
    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Render the version picker menu
pub fn render_version_picker(
    f: &mut Frame,
    options: &[VersionOption],
    selected_id: &str,
    cursor: usize,
) {
    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let style = if option.is_placeholder() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if option.id == selected_id { "✓ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(option.label.clone(), style),
            ]))
        })
        .collect();

    let height = (options.len() as u16 + 2).clamp(5, 20);
    let area = centered_rect(44, height, f.area());

    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select version (Enter to open, Esc to cancel)")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(Some(cursor));

    f.render_widget(Clear, area);
    f.render_stateful_widget(menu, area, &mut state);
}

/// Lines describing the CSV picker state
fn upload_form_lines(form: &UploadForm, action: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Path to a .csv file:"),
        Line::from(vec![
            Span::styled(form.input.clone(), Style::default().fg(Color::Cyan)),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
    ];

    match &form.file {
        Some(file) => lines.push(Line::from(vec![
            Span::raw("File: "),
            Span::styled(file.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  {}", utils::format_file_size(file.size))),
        ])),
        None => lines.push(Line::from(Span::styled(
            "No file chosen",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
    }

    lines.push(Line::from(""));
    if form.is_submitting {
        lines.push(Line::from(Span::styled(
            "Uploading...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(format!(":{}  ", action)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":Cancel"),
        ]));
    }

    lines
}

/// Render the CSV import dialog
pub fn render_import_dialog(f: &mut Frame, form: &UploadForm) {
    let area = centered_rect(64, 12, f.area());
    let dialog = Paragraph::new(upload_form_lines(form, "Upload"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Import reviews")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn render_metrics_table(f: &mut Frame, area: Rect, result: &MetricsResult) {
    let rows: Vec<Row> = result
        .classes
        .iter()
        .map(|class| {
            Row::new(vec![
                Cell::from(metrics::class_display_label(&class.label)),
                Cell::from(metrics::format_score(class.precision)),
                Cell::from(metrics::format_score(class.recall)),
                Cell::from(metrics::format_score(class.f1)),
            ])
        })
        .collect();

    let title = match result.macro_f1 {
        Some(value) => format!("Macro F1: {}", metrics::format_score(value)),
        None => "Macro F1: -".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Class", "Precision", "Recall", "F1"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::TOP).title(title));

    f.render_widget(table, area);
}

/// Render the metrics dialog: picker on top, results below
pub fn render_metrics_dialog(f: &mut Frame, dialog: &MetricsDialog) {
    let result_rows = dialog
        .result
        .as_ref()
        .map(|r| r.classes.len() as u16 + 3)
        .unwrap_or(0);
    let area = centered_rect(64, 12 + result_rows, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Model quality (labelled CSV)")
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(inner);

    let form = Paragraph::new(upload_form_lines(&dialog.form, "Evaluate")).wrap(Wrap { trim: false });
    f.render_widget(form, chunks[0]);

    if let Some(result) = &dialog.result {
        render_metrics_table(f, chunks[1], result);
    }
}
