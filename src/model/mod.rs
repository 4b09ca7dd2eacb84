//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **SessionModel**: Signed-in user, their versions, connection state
//! - **ReportsModel**: Shown report, its rows and version busy flags
//! - **ReviewFilters**: Filter sets, sorts and the open filter panel
//! - **UiModel**: Screen, forms, dialogs, toasts
//!
//! No services live here: all I/O is done by the App and the API worker.

pub mod filters;
pub mod forms;
pub mod reports;
pub mod session;
pub mod types;
pub mod ui;
pub mod upload;

pub use filters::{FilterMsg, ReviewFilters};
pub use reports::ReportsModel;
pub use session::{ConnectionState, SessionModel};
pub use types::*;
pub use ui::UiModel;

use crate::logic::versions;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub session: SessionModel,
    pub reports: ReportsModel,
    pub filters: ReviewFilters,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            session: SessionModel::new(),
            reports: ReportsModel::new(),
            filters: ReviewFilters::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    /// Rows currently shown in the review table
    pub fn visible_reviews(&self) -> Vec<ReviewItem> {
        self.filters.apply(&self.reports.reviews)
    }

    /// Placeholder plus one option per version
    pub fn version_options(&self) -> Vec<VersionOption> {
        versions::version_options(&self.session.reports)
    }

    pub fn selected_version(&self) -> VersionOption {
        versions::selected_option(&self.version_options(), &self.reports.selected_version_id)
    }

    /// Text on the version picker button
    pub fn version_label(&self) -> String {
        versions::picker_label(
            &self.selected_version(),
            self.reports.is_deleting,
            self.reports.is_loading,
        )
    }

    /// Drop everything tied to the signed-in user
    pub fn logout(&mut self) {
        self.session.reset();
        self.reports.reset();
        self.filters.clear_all();
        self.ui.reset_table();
        self.ui.demo.clear();
        self.ui.go_to(Screen::Login);
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}
