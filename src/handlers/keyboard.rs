//! Keyboard Input Handler
//!
//! Handles all keyboard input. Modals take keys first, then the open
//! filter panel, then the active screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sentui::model::{FilterMsg, Screen};
use sentui::{FilterKey, SortDirection};

use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    if app.model.has_modal() {
        handle_modal_key(app, key);
        return Ok(());
    }

    match app.model.ui.screen {
        Screen::Login | Screen::Register => handle_auth_key(app, key),
        Screen::Demo => handle_demo_key(app, key),
        Screen::Dashboard => {
            if app.model.filters.is_panel_open() {
                handle_filter_panel_key(app, key);
            } else {
                handle_dashboard_key(app, key);
            }
        }
    }

    Ok(())
}

/// Keys for whichever dialog is on top
fn handle_modal_key(app: &mut App, key: KeyEvent) {
    if app.model.ui.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.model.ui.confirm_delete = None;
            }
            _ => {}
        }
    } else if app.model.ui.version_picker.is_some() {
        match nav_delta(app, key.code) {
            Some(delta) => app.move_version_cursor(delta),
            None => match key.code {
                KeyCode::Enter => app.confirm_version_picker(),
                KeyCode::Esc | KeyCode::Char('v') => app.model.ui.version_picker = None,
                _ => {}
            },
        }
    } else if app.model.ui.import_dialog.is_some() {
        handle_upload_form_key(app, key, UploadTarget::Import);
    } else if app.model.ui.metrics_dialog.is_some() {
        handle_upload_form_key(app, key, UploadTarget::Metrics);
    }
}

/// Up/down in either arrow or vim style
fn nav_delta(app: &App, code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Up => Some(-1),
        KeyCode::Down => Some(1),
        KeyCode::PageUp => Some(-10),
        KeyCode::PageDown => Some(10),
        KeyCode::Char('k') if app.model.ui.vim_mode => Some(-1),
        KeyCode::Char('j') if app.model.ui.vim_mode => Some(1),
        _ => None,
    }
}

fn handle_auth_key(app: &mut App, key: KeyEvent) {
    let on_register = app.model.ui.screen == Screen::Register;

    match key.code {
        KeyCode::Esc => app.model.ui.should_quit = true,
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let target = if on_register { Screen::Login } else { Screen::Register };
            app.model.ui.go_to(target);
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.model.ui.auth_form.toggle_focus();
        }
        KeyCode::Enter => {
            if on_register {
                app.submit_register();
            } else {
                app.submit_login();
            }
        }
        KeyCode::Backspace => app.model.ui.auth_form.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.model.ui.auth_form.push_char(c);
        }
        _ => {}
    }
}

fn handle_demo_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_demo(),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.model.ui.demo.clear();
        }
        KeyCode::Enter => app.submit_demo(),
        KeyCode::Backspace => {
            app.model.ui.demo.text.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.model.ui.demo.text.push(c);
            app.model.ui.demo.error = None;
        }
        _ => {}
    }
}

fn handle_filter_panel_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = nav_delta(app, key.code) {
        app.move_filter_cursor(delta);
        return;
    }

    match key.code {
        KeyCode::Esc => app.dispatch_filter(FilterMsg::ClosePanel),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_filter_option(),
        _ => {
            handle_filter_shortcut(app, key.code);
        }
    }
}

/// Filter keys that work with or without the panel open
fn handle_filter_shortcut(app: &mut App, code: KeyCode) -> bool {
    let msg = match code {
        KeyCode::Char('t') => FilterMsg::TogglePanel(FilterKey::Tonality),
        KeyCode::Char('s') => FilterMsg::TogglePanel(FilterKey::Source),
        KeyCode::Char('c') => FilterMsg::ClearAll,
        KeyCode::Char('<') => FilterMsg::SetSort(FilterKey::Tonality, SortDirection::Asc),
        KeyCode::Char('>') => FilterMsg::SetSort(FilterKey::Tonality, SortDirection::Desc),
        KeyCode::Char('a') => FilterMsg::SetSort(FilterKey::Source, SortDirection::Asc),
        KeyCode::Char('z') => FilterMsg::SetSort(FilterKey::Source, SortDirection::Desc),
        _ => return false,
    };
    app.dispatch_filter(msg);
    true
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = nav_delta(app, key.code) {
        app.move_table_selection(delta);
        return;
    }

    if handle_filter_shortcut(app, key.code) {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Home => app.select_first_row(),
        KeyCode::End => app.select_last_row(),
        KeyCode::Char('g') if app.model.ui.vim_mode => app.select_first_row(),
        KeyCode::Char('G') if app.model.ui.vim_mode => app.select_last_row(),
        KeyCode::Enter => app.toggle_selected_row(),
        KeyCode::Char('v') => app.open_version_picker(),
        KeyCode::Char('i') => app.open_import_dialog(),
        KeyCode::Char('e') => app.export_selected(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('r') => app.reload_selected(),
        KeyCode::Char('m') => app.open_metrics_dialog(),
        KeyCode::Char('p') => app.open_demo(),
        KeyCode::Char('L') if app.model.session.is_authenticated() => app.logout(),
        _ => {}
    }
}

#[derive(Clone, Copy)]
enum UploadTarget {
    Import,
    Metrics,
}

fn handle_upload_form_key(app: &mut App, key: KeyEvent, target: UploadTarget) {
    match key.code {
        KeyCode::Esc => match target {
            UploadTarget::Import => app.close_import_dialog(),
            UploadTarget::Metrics => app.close_metrics_dialog(),
        },
        KeyCode::Enter => match target {
            UploadTarget::Import => app.submit_import(),
            UploadTarget::Metrics => app.submit_metrics(),
        },
        KeyCode::Backspace | KeyCode::Char(_) => {
            let form = match target {
                UploadTarget::Import => app.model.ui.import_dialog.as_mut(),
                UploadTarget::Metrics => app.model.ui.metrics_dialog.as_mut().map(|d| &mut d.form),
            };
            let Some(form) = form else {
                return;
            };
            if form.is_submitting {
                return;
            }
            match key.code {
                KeyCode::Char(c) => form.push_char(c),
                _ => form.pop_char(),
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentui::api::{ReportData, ReportPrediction};
    use sentui::model::types::Tonality;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    /// Dashboard with one negative, one neutral and one positive review
    fn dashboard() -> App {
        let (mut app, _requests) = App::for_tests();
        app.model.session.set_user(Some("u1".to_string()), None);
        app.model.ui.go_to(Screen::Dashboard);
        app.model.reports.select_version("r1");
        app.model.reports.set_report_data(ReportData {
            id: "r1".to_string(),
            created_at: "2025-03-05T11:07:00Z".to_string(),
            prediction: [2, 0, 1]
                .into_iter()
                .enumerate()
                .map(|(i, label)| ReportPrediction {
                    id: Some(i.to_string()),
                    text: Some("text".to_string()),
                    src: Some("shop".to_string()),
                    label,
                })
                .collect(),
        });
        app
    }

    #[test]
    fn test_esc_closes_filter_panel() {
        let mut app = dashboard();

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.model.filters.active_panel, Some(FilterKey::Tonality));

        press(&mut app, KeyCode::Esc);
        assert!(!app.model.filters.is_panel_open());
        assert!(!app.model.ui.should_quit);
    }

    #[test]
    fn test_switching_panels_resets_cursor() {
        let mut app = dashboard();

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.model.ui.filter_cursor, 2);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.model.filters.active_panel, Some(FilterKey::Source));
        assert_eq!(app.model.ui.filter_cursor, 0);
    }

    #[test]
    fn test_filter_cursor_stays_in_range() {
        let mut app = dashboard();

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::PageDown);
        // One source option plus the two sort buttons
        assert_eq!(app.model.ui.filter_cursor, 2);
    }

    #[test]
    fn test_narrowing_filter_clamps_table_selection() {
        let mut app = dashboard();
        app.model.ui.table_selection = Some(2);

        // First option of the tonality panel is the positive checkbox
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Enter);

        assert!(app.model.filters.tonality.contains(&Tonality::Positive));
        assert_eq!(app.model.visible_reviews().len(), 1);
        assert_eq!(app.model.ui.table_selection, Some(0));
    }

    #[test]
    fn test_emptying_filter_clears_table_selection() {
        let mut app = dashboard();
        app.model.ui.table_selection = Some(1);

        app.dispatch_filter(FilterMsg::ToggleSource("elsewhere".to_string()));

        assert!(app.model.visible_reviews().is_empty());
        assert_eq!(app.model.ui.table_selection, None);
    }
}
