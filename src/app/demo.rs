//! Single-text prediction screen

use sentui::model::Screen;
use sentui::services::ApiRequest;

use crate::App;

impl App {
    pub(crate) fn open_demo(&mut self) {
        self.model.ui.close_all_modals();
        self.model.filters.close_filter_panel();
        self.model.ui.screen = Screen::Demo;
    }

    pub(crate) fn close_demo(&mut self) {
        self.model.ui.screen = Screen::Dashboard;
    }

    pub(crate) fn submit_demo(&mut self) {
        if self.model.ui.demo.is_submitting {
            return;
        }
        if let Some(text) = self.model.ui.demo.prepare_submit() {
            self.send(ApiRequest::PredictOne { text });
        }
    }
}
