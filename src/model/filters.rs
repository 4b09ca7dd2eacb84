//! Review Filter Model
//!
//! Filter sets, per-column sort directions and the open filter panel for
//! the review table. Every user action is a [`FilterMsg`] applied through
//! [`ReviewFilters::update`]; the displayed rows are derived on demand by
//! [`ReviewFilters::apply`] and never stored.

use crate::logic::{filtering, sorting, tonality};
use crate::model::types::{ReviewItem, Tonality};
use crate::{FilterKey, SortDirection};

/// A single user action on the filter state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterMsg {
    TogglePanel(FilterKey),
    ClosePanel,
    ToggleTonality(Tonality),
    ToggleSource(String),
    SetSort(FilterKey, SortDirection),
    ClearAll,
}

/// How an option in the filter panel behaves
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOptionKind {
    Checkbox { checked: bool },
    Button { active: bool },
}

/// One selectable row in the filter panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
    pub kind: FilterOptionKind,
    /// Message dispatched when the option is activated
    pub msg: FilterMsg,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSection {
    pub title: &'static str,
    pub options: Vec<FilterOption>,
    pub scrollable: bool,
}

/// Filter and sort state for the review table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewFilters {
    /// Chosen tonalities, in the order they were toggled on
    pub tonality: Vec<Tonality>,

    /// Chosen sources, in the order they were toggled on
    pub source: Vec<String>,

    pub tonality_sort: Option<SortDirection>,
    pub source_sort: Option<SortDirection>,

    /// At most one panel is open at a time
    pub active_panel: Option<FilterKey>,
}

impl ReviewFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one message
    pub fn update(&mut self, msg: FilterMsg) {
        match msg {
            FilterMsg::TogglePanel(key) => self.toggle_filter_panel(key),
            FilterMsg::ClosePanel => self.close_filter_panel(),
            FilterMsg::ToggleTonality(value) => self.toggle_tonality(value),
            FilterMsg::ToggleSource(value) => self.toggle_source(&value),
            FilterMsg::SetSort(key, direction) => self.set_sort_direction(key, direction),
            FilterMsg::ClearAll => self.clear_all(),
        }
    }

    pub fn toggle_filter_panel(&mut self, key: FilterKey) {
        self.active_panel = if self.active_panel == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    pub fn close_filter_panel(&mut self) {
        self.active_panel = None;
    }

    pub fn is_panel_open(&self) -> bool {
        self.active_panel.is_some()
    }

    pub fn toggle_tonality(&mut self, value: Tonality) {
        if let Some(pos) = self.tonality.iter().position(|t| *t == value) {
            self.tonality.remove(pos);
        } else {
            self.tonality.push(value);
        }
    }

    pub fn toggle_source(&mut self, value: &str) {
        if let Some(pos) = self.source.iter().position(|s| s == value) {
            self.source.remove(pos);
        } else {
            self.source.push(value.to_string());
        }
    }

    /// Set a column's sort; choosing the current direction again clears it
    pub fn set_sort_direction(&mut self, key: FilterKey, direction: SortDirection) {
        let slot = match key {
            FilterKey::Tonality => &mut self.tonality_sort,
            FilterKey::Source => &mut self.source_sort,
        };
        *slot = if *slot == Some(direction) {
            None
        } else {
            Some(direction)
        };
    }

    pub fn sort_direction(&self, key: FilterKey) -> Option<SortDirection> {
        match key {
            FilterKey::Tonality => self.tonality_sort,
            FilterKey::Source => self.source_sort,
        }
    }

    /// Reset filters, sorts and the open panel in one step
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn tonality_indicator_active(&self) -> bool {
        !self.tonality.is_empty() || self.tonality_sort.is_some()
    }

    pub fn source_indicator_active(&self) -> bool {
        !self.source.is_empty() || self.source_sort.is_some()
    }

    pub fn indicator_active(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Tonality => self.tonality_indicator_active(),
            FilterKey::Source => self.source_indicator_active(),
        }
    }

    /// Rows to display: filter first, then stable-sort
    pub fn apply(&self, reviews: &[ReviewItem]) -> Vec<ReviewItem> {
        let mut rows = filtering::filter_reviews(reviews, &self.tonality, &self.source);
        sorting::sort_reviews(&mut rows, self.tonality_sort, self.source_sort);
        rows
    }

    /// Selectable source values: distinct sources of the unfiltered list
    pub fn source_options(reviews: &[ReviewItem]) -> Vec<String> {
        filtering::distinct_sources(reviews)
    }

    /// Title of the open panel (empty when closed)
    pub fn panel_title(&self) -> &'static str {
        self.active_panel.map(|key| key.panel_title()).unwrap_or("")
    }

    /// Sections of the open panel; `source_options` comes from the unfiltered list
    pub fn panel_sections(&self, source_options: &[String]) -> Vec<FilterSection> {
        match self.active_panel {
            None => Vec::new(),
            Some(FilterKey::Tonality) => vec![
                FilterSection {
                    title: "Filters",
                    scrollable: false,
                    options: Tonality::ASC
                        .iter()
                        .map(|tone| FilterOption {
                            id: tone.key().to_string(),
                            label: tonality::meta(*tone).label.to_string(),
                            kind: FilterOptionKind::Checkbox {
                                checked: self.tonality.contains(tone),
                            },
                            msg: FilterMsg::ToggleTonality(*tone),
                        })
                        .collect(),
                },
                self.sort_section(
                    FilterKey::Tonality,
                    ("tone-asc", "Positive → Negative"),
                    ("tone-desc", "Negative → Positive"),
                ),
            ],
            Some(FilterKey::Source) => vec![
                FilterSection {
                    title: "Filters",
                    scrollable: true,
                    options: source_options
                        .iter()
                        .map(|source| FilterOption {
                            id: source.clone(),
                            label: source.clone(),
                            kind: FilterOptionKind::Checkbox {
                                checked: self.source.contains(source),
                            },
                            msg: FilterMsg::ToggleSource(source.clone()),
                        })
                        .collect(),
                },
                self.sort_section(FilterKey::Source, ("source-asc", "A → Z"), ("source-desc", "Z → A")),
            ],
        }
    }

    fn sort_section(
        &self,
        key: FilterKey,
        asc: (&str, &str),
        desc: (&str, &str),
    ) -> FilterSection {
        let current = self.sort_direction(key);
        let button = |(id, label): (&str, &str), direction: SortDirection| FilterOption {
            id: id.to_string(),
            label: label.to_string(),
            kind: FilterOptionKind::Button {
                active: current == Some(direction),
            },
            msg: FilterMsg::SetSort(key, direction),
        };

        FilterSection {
            title: "Sorting",
            scrollable: false,
            options: vec![button(asc, SortDirection::Asc), button(desc, SortDirection::Desc)],
        }
    }
}

/// Flatten panel sections into the order the cursor walks them
pub fn flatten_options(sections: &[FilterSection]) -> Vec<&FilterOption> {
    sections.iter().flat_map(|section| section.options.iter()).collect()
}
