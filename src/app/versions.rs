//! Version orchestration methods
//!
//! Selecting, deleting, importing and exporting report versions.

use sentui::api::ReportSummary;
use sentui::logic::versions;
use sentui::model::upload::UploadForm;
use sentui::model::PLACEHOLDER_VERSION_ID;
use sentui::services::ApiRequest;

use crate::App;

impl App {
    pub(crate) fn open_version_picker(&mut self) {
        let options = self.model.version_options();
        let cursor = options
            .iter()
            .position(|o| o.id == self.model.reports.selected_version_id)
            .unwrap_or(0);
        self.model.ui.version_picker = Some(cursor);
    }

    pub(crate) fn move_version_cursor(&mut self, delta: isize) {
        let len = self.model.version_options().len();
        if let Some(cursor) = self.model.ui.version_picker.as_mut() {
            *cursor = step(*cursor, delta, len);
        }
    }

    /// Choose the option under the picker cursor
    pub(crate) fn confirm_version_picker(&mut self) {
        let Some(cursor) = self.model.ui.version_picker else {
            return;
        };
        let id = self
            .model
            .version_options()
            .get(cursor)
            .map(|o| o.id.clone())
            .unwrap_or_default();
        self.select_version(&id);
    }

    /// Select a version and fetch it; the placeholder or the current id only close the picker
    pub(crate) fn select_version(&mut self, version_id: &str) {
        self.model.ui.version_picker = None;

        if version_id.is_empty() || version_id == PLACEHOLDER_VERSION_ID {
            return;
        }
        if version_id == self.model.reports.selected_version_id {
            return;
        }

        self.model.reports.select_version(version_id);
        self.fetch_report(version_id);
    }

    pub(crate) fn fetch_report(&mut self, report_id: &str) {
        self.model.reports.set_loading(true);
        self.send(ApiRequest::FetchReport {
            report_id: report_id.to_string(),
        });
    }

    /// Refresh the version list and the shown version, keeping the selection
    pub(crate) fn reload_selected(&mut self) {
        let Some(user_id) = self.model.session.user_id.clone() else {
            return;
        };
        self.send(ApiRequest::LoadUser {
            user_id,
            select_newest: false,
        });

        if self.model.reports.has_version_selected() {
            let id = self.model.reports.selected_version_id.clone();
            self.fetch_report(&id);
        }
    }

    /// After a list refresh: drop the selection if its version is gone
    pub(crate) fn keep_selection_after_refresh(&mut self) {
        let selected = &self.model.reports.selected_version_id;
        if !self.model.reports.has_version_selected()
            || self.model.session.reports.iter().any(|r| &r.id == selected)
        {
            return;
        }

        tracing::info!("Version {} disappeared from the server", selected);
        self.model.reports.select_version(PLACEHOLDER_VERSION_ID);
        self.model.reports.clear_report();
        self.model.reports.set_loading(false);
        self.model.ui.reset_table();
    }

    /// Ask for confirmation before deleting the selected version
    pub(crate) fn request_delete(&mut self) {
        if !self.model.reports.can_delete() {
            return;
        }
        let selected = self.model.selected_version();
        self.model.ui.confirm_delete = Some((selected.id, selected.label));
    }

    pub(crate) fn confirm_delete(&mut self) {
        let Some((report_id, _)) = self.model.ui.confirm_delete.take() else {
            return;
        };
        if !self.model.reports.can_delete() {
            return;
        }

        self.model.reports.is_deleting = true;
        self.send(ApiRequest::DeleteReport { report_id });
    }

    /// After a successful delete: drop it locally and move to the next version
    pub(crate) fn finish_delete(&mut self, report_id: &str) {
        let next = versions::next_after_delete(&self.model.session.reports, report_id);

        self.model.session.remove_report(report_id);
        if let Err(e) = self.cache.remove_report(report_id) {
            tracing::warn!("Failed to drop cached report {}: {:#}", report_id, e);
        }
        self.model.reports.is_deleting = false;
        self.model.ui.reset_table();

        if self.model.reports.selected_version_id != report_id {
            return;
        }

        match next {
            Some(next_id) => {
                self.model.reports.select_version(&next_id);
                self.fetch_report(&next_id);
            }
            None => {
                self.model.reports.select_version(PLACEHOLDER_VERSION_ID);
                self.model.reports.clear_report();
            }
        }
    }

    pub(crate) fn export_selected(&mut self) {
        if !self.model.reports.can_export() {
            return;
        }

        let selected = self.model.selected_version();
        self.model.reports.is_exporting = true;
        self.send(ApiRequest::ExportReport {
            report_id: selected.id,
            label: selected.label,
            dir: self.config.resolved_export_dir(),
        });
    }

    pub(crate) fn open_import_dialog(&mut self) {
        self.model.ui.import_dialog = Some(UploadForm::new());
    }

    pub(crate) fn close_import_dialog(&mut self) {
        if self.model.reports.is_importing {
            return;
        }
        self.model.ui.import_dialog = None;
    }

    /// Resolve the typed path and upload it
    pub(crate) fn submit_import(&mut self) {
        let Some(form) = self.model.ui.import_dialog.as_mut() else {
            return;
        };
        if form.is_submitting || !form.choose() {
            return;
        }
        let Some(file) = form.file.clone() else {
            return;
        };

        form.is_submitting = true;
        self.model.reports.is_importing = true;
        self.send(ApiRequest::UploadReport { path: file.path });
    }

    /// Show a freshly uploaded report and make it the selected version
    pub(crate) fn finish_import(&mut self, report: sentui::api::ReportData) {
        self.model.session.add_report(ReportSummary {
            id: report.id.clone(),
            created_at: report.created_at.clone(),
        });
        self.model.reports.select_version(&report.id);
        self.show_report(report);

        self.model.reports.is_importing = false;
        self.model.ui.import_dialog = None;
        self.model.show_toast("Report uploaded".to_string());
    }

    /// Put a report on screen and remember it for offline use
    pub(crate) fn show_report(&mut self, report: sentui::api::ReportData) {
        if let Err(e) = self.cache.save_report(&report) {
            tracing::warn!("Failed to cache report {}: {:#}", report.id, e);
        }
        self.model.reports.set_report_data(report);
        self.model.reports.set_loading(false);
        self.model.ui.reset_table();
    }
}

/// Move a cursor by `delta`, clamped to `0..len`
pub(crate) fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = cursor as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}
