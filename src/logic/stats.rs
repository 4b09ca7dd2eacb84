//! Report statistics
//!
//! Totals and percentages shown on the dashboard cards and bar chart.
//! Always computed over the unfiltered review list.

use crate::logic::tonality::{self, ToneMeta};
use crate::model::types::{ReviewItem, Tonality};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TonalityTotals {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
}

impl TonalityTotals {
    pub fn count(&self, tonality: Tonality) -> u64 {
        match tonality {
            Tonality::Positive => self.positive,
            Tonality::Neutral => self.neutral,
            Tonality::Negative => self.negative,
        }
    }
}

pub fn tonality_totals(reviews: &[ReviewItem]) -> TonalityTotals {
    reviews.iter().fold(TonalityTotals::default(), |mut acc, review| {
        match review.tonality {
            Tonality::Positive => acc.positive += 1,
            Tonality::Neutral => acc.neutral += 1,
            Tonality::Negative => acc.negative += 1,
        }
        acc.total += 1;
        acc
    })
}

/// Share of `count` in `total`, rounded half up; 0 when total is 0
pub fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count * 100 + total / 2) / total
}

/// One stat card on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub tone: ToneMeta,
    pub percent: u64,
    pub count_label: String,
}

pub fn stat_cards(totals: &TonalityTotals) -> Vec<StatCard> {
    Tonality::ASC
        .iter()
        .map(|tone| {
            let count = totals.count(*tone);
            StatCard {
                tone: tonality::meta(*tone),
                percent: percentage(count, totals.total),
                count_label: format!("{} reviews", count),
            }
        })
        .collect()
}

/// Bars for the chart: (label, value, tonality) in display order
pub fn chart_bars(totals: &TonalityTotals) -> Vec<(&'static str, u64, Tonality)> {
    Tonality::ASC
        .iter()
        .map(|tone| (tonality::meta(*tone).label, totals.count(*tone), *tone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(tonality: Tonality) -> ReviewItem {
        ReviewItem {
            id: String::new(),
            tonality,
            source: "s".to_string(),
            text: String::new(),
            label: tonality.label_id(),
        }
    }

    #[test]
    fn test_totals() {
        let rows = vec![
            review(Tonality::Positive),
            review(Tonality::Negative),
            review(Tonality::Positive),
        ];
        let totals = tonality_totals(&rows);

        assert_eq!(totals.positive, 2);
        assert_eq!(totals.neutral, 0);
        assert_eq!(totals.negative, 1);
        assert_eq!(totals.total, 3);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_stat_cards_order_and_labels() {
        let totals = TonalityTotals {
            positive: 1,
            neutral: 1,
            negative: 2,
            total: 4,
        };
        let cards = stat_cards(&totals);

        let labels: Vec<&str> = cards.iter().map(|c| c.tone.label).collect();
        assert_eq!(labels, vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(cards[2].percent, 50);
        assert_eq!(cards[2].count_label, "2 reviews");
    }

    #[test]
    fn test_empty_report_cards_are_zero() {
        let cards = stat_cards(&tonality_totals(&[]));
        assert!(cards.iter().all(|c| c.percent == 0 && c.count_label == "0 reviews"));
    }

    #[test]
    fn test_chart_bars() {
        let totals = TonalityTotals {
            positive: 3,
            neutral: 2,
            negative: 1,
            total: 6,
        };
        let values: Vec<u64> = chart_bars(&totals).iter().map(|b| b.1).collect();
        assert_eq!(values, vec![3, 2, 1]);
    }
}
