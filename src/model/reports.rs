//! Reports Model
//!
//! The currently shown report, the rows derived from it, the selected
//! version and the busy flags of version operations.

use crate::api::ReportData;
use crate::logic::filtering;
use crate::model::types::{ReviewItem, PLACEHOLDER_VERSION_ID};

#[derive(Clone, Debug)]
pub struct ReportsModel {
    pub report: Option<ReportData>,

    /// Rows of `report`, in server order
    pub reviews: Vec<ReviewItem>,

    /// Distinct sources of `reviews`, collation-sorted
    pub source_options: Vec<String>,

    /// True when `report` came from the local cache after a failed fetch
    pub from_cache: bool,

    /// Id of the selected version (`PLACEHOLDER_VERSION_ID` when none)
    pub selected_version_id: String,

    // ============================================
    // BUSY FLAGS
    // ============================================
    pub is_loading: bool,
    pub is_deleting: bool,
    pub is_exporting: bool,
    pub is_importing: bool,
}

impl ReportsModel {
    pub fn new() -> Self {
        Self {
            report: None,
            reviews: Vec::new(),
            source_options: Vec::new(),
            from_cache: false,
            selected_version_id: PLACEHOLDER_VERSION_ID.to_string(),
            is_loading: false,
            is_deleting: false,
            is_exporting: false,
            is_importing: false,
        }
    }

    /// Show `report`, rebuilding the rows and source options
    pub fn set_report_data(&mut self, report: ReportData) {
        self.reviews = report
            .prediction
            .iter()
            .enumerate()
            .map(|(index, prediction)| ReviewItem::from_prediction(prediction, index))
            .collect();
        self.source_options = filtering::distinct_sources(&self.reviews);
        self.report = Some(report);
        self.from_cache = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn select_version(&mut self, version_id: &str) {
        self.selected_version_id = version_id.to_string();
    }

    pub fn has_version_selected(&self) -> bool {
        !self.selected_version_id.is_empty() && self.selected_version_id != PLACEHOLDER_VERSION_ID
    }

    pub fn can_export(&self) -> bool {
        self.has_version_selected() && !self.is_exporting
    }

    pub fn can_delete(&self) -> bool {
        self.has_version_selected() && !self.is_deleting && !self.is_loading
    }

    /// Nothing to show and nothing on the way
    pub fn is_empty_state(&self) -> bool {
        !self.is_loading && self.reviews.is_empty()
    }

    /// Drop the report and its rows (the selected version is kept)
    pub fn clear_report(&mut self) {
        self.report = None;
        self.reviews.clear();
        self.source_options.clear();
        self.from_cache = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ReportsModel {
    fn default() -> Self {
        Self::new()
    }
}
