//! Metrics response normalisation
//!
//! The metrics endpoint answers with a flat object: a `f1-macro` number and
//! one object per class id holding precision, recall and F1.

use serde_json::Value;

use crate::logic::tonality;
use crate::model::types::{MetricClassResult, MetricsResult};

const MACRO_F1_KEY: &str = "f1-macro";

fn number_field(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Turn the raw response into a macro F1 plus class rows sorted by class id
///
/// Non-numeric class keys sort after the numeric ones.
pub fn normalize_metrics(response: &Value) -> MetricsResult {
    let Value::Object(entries) = response else {
        return MetricsResult::default();
    };

    let mut result = MetricsResult::default();

    for (key, value) in entries {
        if key == MACRO_F1_KEY {
            if let Value::Number(n) = value {
                result.macro_f1 = n.as_f64();
            }
            continue;
        }

        if value.is_object() {
            result.classes.push(MetricClassResult {
                label: key.clone(),
                precision: number_field(value, "precision"),
                recall: number_field(value, "recall"),
                f1: number_field(value, "f1"),
            });
        }
    }

    result
        .classes
        .sort_by_key(|class| class.label.trim().parse::<i64>().map_or((1, 0), |id| (0, id)));

    result
}

/// Human label for a class row ("Positive", ...) or the raw key if not an id
pub fn class_display_label(label: &str) -> String {
    match label.trim().parse::<i64>() {
        Ok(id) => tonality::meta_by_id(id).label.to_string(),
        Err(_) => label.to_string(),
    }
}

/// Format a score for display with three decimals
pub fn format_score(value: f64) -> String {
    format!("{:.3}", value)
}
