//! Filter panel orchestration methods
//!
//! Keyboard-facing wrapper around the review filter reducer: keeps the
//! panel cursor in range and the table selection valid after each change.

use sentui::model::filters::flatten_options;
use sentui::model::FilterMsg;

use crate::app::versions::step;
use crate::App;

impl App {
    /// Apply a filter message, then fix up cursor and selection
    pub(crate) fn dispatch_filter(&mut self, msg: FilterMsg) {
        let panel_before = self.model.filters.active_panel;
        self.model.filters.update(msg);

        if self.model.filters.active_panel != panel_before {
            self.model.ui.filter_cursor = 0;
        }

        let visible = self.model.visible_reviews().len();
        self.model.ui.table_selection = match self.model.ui.table_selection {
            _ if visible == 0 => None,
            Some(idx) => Some(idx.min(visible - 1)),
            None => None,
        };
    }

    fn panel_option_count(&self) -> usize {
        let sections = self
            .model
            .filters
            .panel_sections(&self.model.reports.source_options);
        flatten_options(&sections).len()
    }

    pub(crate) fn move_filter_cursor(&mut self, delta: isize) {
        let len = self.panel_option_count();
        self.model.ui.filter_cursor = step(self.model.ui.filter_cursor, delta, len);
    }

    /// Activate the option under the cursor (checkbox or sort button)
    pub(crate) fn activate_filter_option(&mut self) {
        let sections = self
            .model
            .filters
            .panel_sections(&self.model.reports.source_options);
        let msg = flatten_options(&sections)
            .get(self.model.ui.filter_cursor)
            .map(|option| option.msg.clone());

        if let Some(msg) = msg {
            self.dispatch_filter(msg);
        }
    }
}
