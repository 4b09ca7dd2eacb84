//! Tonality display metadata
//!
//! Labels, descriptions and accent colours for each sentiment class.

use crate::api::PredictedMark;
use crate::model::types::Tonality;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneMeta {
    pub tonality: Tonality,
    pub label: &'static str,
    pub description: &'static str,
    /// Accent colour as RGB
    pub accent: (u8, u8, u8),
}

pub fn meta(tonality: Tonality) -> ToneMeta {
    match tonality {
        Tonality::Positive => ToneMeta {
            tonality,
            label: "Positive",
            description: "Reviews with a positive tone",
            accent: (0x22, 0xa8, 0x73),
        },
        Tonality::Neutral => ToneMeta {
            tonality,
            label: "Neutral",
            description: "Restrained comments without emotion",
            accent: (0x7a, 0x6e, 0xe6),
        },
        Tonality::Negative => ToneMeta {
            tonality,
            label: "Negative",
            description: "Signals of customer dissatisfaction",
            accent: (0xd9, 0x6a, 0x66),
        },
    }
}

/// Metadata for a raw class id; unknown ids are neutral
pub fn meta_by_id(id: i64) -> ToneMeta {
    meta(Tonality::from_label(id))
}

/// Resolve the model's single-text answer to a tonality
pub fn from_predicted_mark(mark: &PredictedMark) -> Tonality {
    match mark {
        PredictedMark::Id(id) => Tonality::from_label(*id),
        PredictedMark::Key(key) => Tonality::from_key(key)
            .or_else(|| key.trim().parse().ok().map(Tonality::from_label))
            .unwrap_or(Tonality::Neutral),
    }
}
