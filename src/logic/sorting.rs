//! Sorting comparison logic
//!
//! Pure functions for ordering review rows and source names.

use std::cmp::Ordering;

use crate::model::types::ReviewItem;
use crate::SortDirection;

/// ASCII punctuation and symbols in Russian-locale collation order
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Script groups in the order a `ru` collator puts them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Space,
    Punctuation,
    Digit,
    Cyrillic,
    Latin,
    Other,
}

fn group_of(c: char) -> Group {
    match c {
        c if c.is_whitespace() => Group::Space,
        c if c.is_numeric() => Group::Digit,
        '\u{0400}'..='\u{04FF}' => Group::Cyrillic,
        c if c.is_ascii_alphabetic() => Group::Latin,
        '\u{00C0}'..='\u{024F}' if c.is_alphabetic() => Group::Latin,
        c if c.is_alphanumeric() => Group::Other,
        _ => Group::Punctuation,
    }
}

/// Primary collation weight of one character
fn primary_weight(c: char) -> (Group, u32) {
    let group = group_of(c);
    let weight = match group {
        Group::Punctuation => PUNCTUATION_ORDER
            .chars()
            .position(|p| p == c)
            .map(|pos| pos as u32)
            .unwrap_or(PUNCTUATION_ORDER.len() as u32 + c as u32),
        Group::Digit => c.to_digit(10).unwrap_or(c as u32),
        _ => {
            let lower = c.to_lowercase().next().unwrap_or(c);
            if lower == 'ё' {
                'е' as u32
            } else {
                lower as u32
            }
        }
    };
    (group, weight)
}

fn primary_key(s: &str) -> Vec<(Group, u32)> {
    s.chars().map(primary_weight).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

/// Collation used for source names
///
/// Approximates a Russian-locale collator. Primary level orders spaces,
/// punctuation, digits, Cyrillic, then Latin, case-insensitively and with
/// `ё` weighed as `е`. Ties fall through to `е` before `ё`, then lowercase
/// before uppercase.
pub fn compare_sources(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Compare two reviews by the active sorts
///
/// Tonality is the primary key when set; source breaks ties (or is primary
/// when tonality is unset). With neither set every pair is `Equal`, so a
/// stable sort keeps the input order.
pub fn compare_reviews(
    a: &ReviewItem,
    b: &ReviewItem,
    tonality_sort: Option<SortDirection>,
    source_sort: Option<SortDirection>,
) -> Ordering {
    let by_tonality = tonality_sort
        .map(|direction| direction.apply(a.tonality.rank().cmp(&b.tonality.rank())))
        .unwrap_or(Ordering::Equal);

    by_tonality.then_with(|| {
        source_sort
            .map(|direction| direction.apply(compare_sources(&a.source, &b.source)))
            .unwrap_or(Ordering::Equal)
    })
}

/// Stable-sort rows in place by the active sorts
pub fn sort_reviews(
    reviews: &mut [ReviewItem],
    tonality_sort: Option<SortDirection>,
    source_sort: Option<SortDirection>,
) {
    if tonality_sort.is_none() && source_sort.is_none() {
        return;
    }
    reviews.sort_by(|a, b| compare_reviews(a, b, tonality_sort, source_sort));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Tonality;

    fn review(id: &str, tonality: Tonality, source: &str) -> ReviewItem {
        ReviewItem {
            id: id.to_string(),
            tonality,
            source: source.to_string(),
            text: String::new(),
            label: tonality.label_id(),
        }
    }

    #[test]
    fn test_compare_sources_case_insensitive_first() {
        assert_eq!(compare_sources("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_sources("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_compare_sources_lowercase_before_uppercase() {
        assert_eq!(compare_sources("a", "A"), Ordering::Less);
        assert_eq!(compare_sources("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_compare_sources_yo_sorts_with_ye() {
        // Plain code-point order would put "ёж" after "я"
        assert_eq!(compare_sources("ёж", "я"), Ordering::Less);
        assert_eq!(compare_sources("еж", "ёж"), Ordering::Less);
        assert_eq!(compare_sources("ёж", "ежа"), Ordering::Less);
    }

    #[test]
    fn test_compare_sources_cyrillic_before_latin() {
        assert_eq!(compare_sources("Ёлка", "Ozon"), Ordering::Less);
        assert_eq!(compare_sources("яндекс", "Avito"), Ordering::Less);
        assert_eq!(compare_sources("wildberries", "Озон"), Ordering::Greater);
    }

    #[test]
    fn test_compare_sources_punctuation_then_digits() {
        assert_eq!(compare_sources("_x", "1shop"), Ordering::Less);
        assert_eq!(compare_sources("1shop", "Авито"), Ordering::Less);
        assert_eq!(compare_sources("2gis", "10shop"), Ordering::Greater);
        assert_eq!(compare_sources("-x", "_x"), Ordering::Greater);
    }

    #[test]
    fn test_compare_sources_mixed_script_order() {
        let mut sources = vec!["Ozon", "Ёлка", "Avito", "wildberries", "1shop", "_x"];
        sources.sort_by(|a, b| compare_sources(a, b));
        assert_eq!(sources, vec!["_x", "1shop", "Ёлка", "Avito", "Ozon", "wildberries"]);
    }

    #[test]
    fn test_compare_reviews_no_sort_is_equal() {
        let a = review("1", Tonality::Negative, "B");
        let b = review("2", Tonality::Positive, "A");
        assert_eq!(compare_reviews(&a, &b, None, None), Ordering::Equal);
    }

    #[test]
    fn test_compare_reviews_tonality_desc() {
        let a = review("1", Tonality::Positive, "A");
        let b = review("2", Tonality::Negative, "A");
        assert_eq!(
            compare_reviews(&a, &b, Some(SortDirection::Desc), None),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_reviews_source_breaks_tonality_tie() {
        let a = review("1", Tonality::Neutral, "Zeta");
        let b = review("2", Tonality::Neutral, "alpha");
        assert_eq!(
            compare_reviews(&a, &b, Some(SortDirection::Asc), Some(SortDirection::Asc)),
            Ordering::Greater
        );
        assert_eq!(
            compare_reviews(&a, &b, Some(SortDirection::Asc), Some(SortDirection::Desc)),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_reviews_is_stable() {
        let mut rows = vec![
            review("1", Tonality::Negative, "B"),
            review("2", Tonality::Positive, "A"),
            review("3", Tonality::Negative, "A"),
            review("4", Tonality::Positive, "B"),
        ];
        sort_reviews(&mut rows, Some(SortDirection::Asc), None);

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }
}
