//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! the active screen, forms, dialogs, table cursor and toasts.

use std::collections::HashSet;
use std::time::Instant;

use super::forms::{AuthForm, DemoState};
use super::types::{MetricsResult, Screen};
use super::upload::UploadForm;

/// How long a toast stays up, in milliseconds
pub const TOAST_DURATION_MS: u128 = 3000;

/// Metrics dialog: a CSV picker plus the last result
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsDialog {
    pub form: UploadForm,
    pub result: Option<MetricsResult>,
}

/// UI state and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    pub screen: Screen,

    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    // ============================================
    // FORMS
    // ============================================
    pub auth_form: AuthForm,
    pub demo: DemoState,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// CSV import dialog
    pub import_dialog: Option<UploadForm>,

    pub metrics_dialog: Option<MetricsDialog>,

    /// Version picker with its cursor position
    pub version_picker: Option<usize>,

    /// Confirmation dialog for deleting a version
    pub confirm_delete: Option<(String, String)>, // (report_id, label)

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    // ============================================
    // REVIEW TABLE
    // ============================================
    pub table_selection: Option<usize>,

    /// Ids of reviews whose text is expanded
    pub expanded_rows: HashSet<String>,

    /// Cursor inside the open filter panel
    pub filter_cursor: usize,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            screen: Screen::Login,
            vim_mode,
            auth_form: AuthForm::new(),
            demo: DemoState::new(),
            import_dialog: None,
            metrics_dialog: None,
            version_picker: None,
            confirm_delete: None,
            toast_message: None,
            table_selection: None,
            expanded_rows: HashSet::new(),
            filter_cursor: 0,
            should_quit: false,
        }
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.import_dialog.is_some()
            || self.metrics_dialog.is_some()
            || self.version_picker.is_some()
            || self.confirm_delete.is_some()
    }

    pub fn close_all_modals(&mut self) {
        self.import_dialog = None;
        self.metrics_dialog = None;
        self.version_picker = None;
        self.confirm_delete = None;
    }

    /// Switch screen, resetting the auth form
    pub fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.auth_form = AuthForm::new();
        self.close_all_modals();
    }

    /// Reset table cursor and expanded rows (new data)
    pub fn reset_table(&mut self) {
        self.table_selection = None;
        self.expanded_rows.clear();
    }

    pub fn toggle_expanded(&mut self, review_id: &str) {
        if !self.expanded_rows.remove(review_id) {
            self.expanded_rows.insert(review_id.to_string());
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast_message
            .as_ref()
            .map(|(_, timestamp)| timestamp.elapsed().as_millis() >= TOAST_DURATION_MS)
            .unwrap_or(false)
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
