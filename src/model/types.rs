//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

use std::path::PathBuf;

use crate::api::ReportPrediction;

/// Sentiment class of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tonality {
    Positive,
    Neutral,
    Negative,
}

impl Tonality {
    /// Display and rank order: positive first, negative last
    pub const ASC: [Tonality; 3] = [Tonality::Positive, Tonality::Neutral, Tonality::Negative];

    /// Map a raw model class id (0 = neutral, 1 = positive, 2 = negative)
    ///
    /// Unknown ids fall back to neutral.
    pub fn from_label(label: i64) -> Self {
        match label {
            1 => Tonality::Positive,
            2 => Tonality::Negative,
            _ => Tonality::Neutral,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "positive" => Some(Tonality::Positive),
            "neutral" => Some(Tonality::Neutral),
            "negative" => Some(Tonality::Negative),
            _ => None,
        }
    }

    /// Canonical class id of this tonality
    pub fn label_id(&self) -> i64 {
        match self {
            Tonality::Neutral => 0,
            Tonality::Positive => 1,
            Tonality::Negative => 2,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tonality::Positive => "positive",
            Tonality::Neutral => "neutral",
            Tonality::Negative => "negative",
        }
    }

    /// Position in the ascending sort order
    pub fn rank(&self) -> u8 {
        match self {
            Tonality::Positive => 0,
            Tonality::Neutral => 1,
            Tonality::Negative => 2,
        }
    }
}

/// Placeholder for reviews whose source is missing
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// One row of the review table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub id: String,
    pub tonality: Tonality,
    pub source: String,
    pub text: String,
    /// Class id exactly as the server sent it
    pub label: i64,
}

impl ReviewItem {
    /// Build a row from the server prediction at position `index`
    pub fn from_prediction(prediction: &ReportPrediction, index: usize) -> Self {
        let tonality = Tonality::from_label(prediction.label);
        let source = prediction
            .src
            .as_deref()
            .filter(|src| !src.is_empty())
            .unwrap_or(UNKNOWN_SOURCE)
            .to_string();

        Self {
            id: prediction
                .id
                .clone()
                .unwrap_or_else(|| format!("review-{}", index)),
            tonality,
            source,
            text: prediction.text.clone().unwrap_or_default(),
            label: prediction.label,
        }
    }
}

/// A selectable entry in the version picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOption {
    pub id: String,
    pub label: String,
}

/// Id of the "no version selected" entry
pub const PLACEHOLDER_VERSION_ID: &str = "placeholder";

impl VersionOption {
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_VERSION_ID.to_string(),
            label: "Select version".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_VERSION_ID
    }
}

/// A file picked for upload, with the metadata the dialog shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// Per-class row of a metrics result
#[derive(Debug, Clone, PartialEq)]
pub struct MetricClassResult {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Normalised answer of the metrics endpoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsResult {
    pub macro_f1: Option<f64>,
    pub classes: Vec<MetricClassResult>,
}

/// Which top-level screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Demo,
}
