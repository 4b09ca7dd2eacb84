//! Review filtering logic
//!
//! Pure functions for narrowing the review list by tonality and source.

use std::collections::HashSet;

use crate::logic::sorting::compare_sources;
use crate::model::types::{ReviewItem, Tonality};

/// Whether a review passes both filter sets (an empty set passes everything)
pub fn matches_filters(review: &ReviewItem, tonalities: &[Tonality], sources: &[String]) -> bool {
    let tonality_ok = tonalities.is_empty() || tonalities.contains(&review.tonality);
    let source_ok = sources.is_empty() || sources.iter().any(|s| *s == review.source);
    tonality_ok && source_ok
}

/// Keep the reviews that pass the filters, in their original order
pub fn filter_reviews(
    reviews: &[ReviewItem],
    tonalities: &[Tonality],
    sources: &[String],
) -> Vec<ReviewItem> {
    reviews
        .iter()
        .filter(|review| matches_filters(review, tonalities, sources))
        .cloned()
        .collect()
}

/// Distinct sources of the (unfiltered) list, collation-sorted
pub fn distinct_sources(reviews: &[ReviewItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sources: Vec<String> = reviews
        .iter()
        .filter(|review| seen.insert(review.source.as_str()))
        .map(|review| review.source.clone())
        .collect();
    sources.sort_by(|a, b| compare_sources(a, b));
    sources
}
