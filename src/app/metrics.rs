//! Metrics dialog orchestration methods

use sentui::model::ui::MetricsDialog;
use sentui::services::ApiRequest;

use crate::App;

impl App {
    pub(crate) fn open_metrics_dialog(&mut self) {
        self.model.ui.metrics_dialog = Some(MetricsDialog::default());
    }

    pub(crate) fn close_metrics_dialog(&mut self) {
        let busy = self
            .model
            .ui
            .metrics_dialog
            .as_ref()
            .map(|d| d.form.is_submitting)
            .unwrap_or(false);
        if !busy {
            self.model.ui.metrics_dialog = None;
        }
    }

    /// Submit a labelled CSV for evaluation
    pub(crate) fn submit_metrics(&mut self) {
        let Some(dialog) = self.model.ui.metrics_dialog.as_mut() else {
            return;
        };
        if dialog.form.is_submitting || !dialog.form.choose() {
            return;
        }
        let Some(file) = dialog.form.file.clone() else {
            return;
        };

        dialog.form.is_submitting = true;
        dialog.result = None;
        self.send(ApiRequest::PredictMetrics { path: file.path });
    }
}
