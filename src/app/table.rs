//! Review table navigation

use crate::app::versions::step;
use crate::App;

impl App {
    pub(crate) fn move_table_selection(&mut self, delta: isize) {
        let len = self.model.visible_reviews().len();
        if len == 0 {
            self.model.ui.table_selection = None;
            return;
        }

        self.model.ui.table_selection = Some(match self.model.ui.table_selection {
            Some(idx) => step(idx, delta, len),
            None => 0,
        });
    }

    pub(crate) fn select_first_row(&mut self) {
        if !self.model.visible_reviews().is_empty() {
            self.model.ui.table_selection = Some(0);
        }
    }

    pub(crate) fn select_last_row(&mut self) {
        let len = self.model.visible_reviews().len();
        self.model.ui.table_selection = len.checked_sub(1);
    }

    /// Expand or collapse the text of the selected review
    pub(crate) fn toggle_selected_row(&mut self) {
        let Some(idx) = self.model.ui.table_selection else {
            return;
        };
        if let Some(review) = self.model.visible_reviews().get(idx) {
            self.model.ui.toggle_expanded(&review.id);
        }
    }
}
