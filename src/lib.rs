//! Review sentiment TUI library
//!
//! Exposes modules for testing and for the terminal front end

pub mod api;
pub mod cache;
pub mod config;
pub mod logic;
pub mod model;
pub mod services;
pub mod session;
pub mod utils;

/// Column of the review table that can be filtered and sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Tonality,
    Source,
}

impl FilterKey {
    /// Title of the filter panel for this column
    pub fn panel_title(&self) -> &'static str {
        match self {
            FilterKey::Tonality => "Filter by tonality",
            FilterKey::Source => "Filter by source",
        }
    }

    pub fn column_label(&self) -> &'static str {
        match self {
            FilterKey::Tonality => "Tonality",
            FilterKey::Source => "Source",
        }
    }
}

/// Sort direction for a single column (unset is `None` at the call site)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
