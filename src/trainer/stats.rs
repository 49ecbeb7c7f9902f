use serde::{Deserialize, Serialize};

use crate::storage::Record;
use crate::trainer::predictor::FALLBACK_WORDS_PER_MINUTE;
use crate::trainer::sample::Sample;

/// Aggregates derived from the dataset, not authoritative.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_articles: usize,

    /// Words per minute over all the recorded sessions.
    pub average_speed: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_articles: 0,
            average_speed: FALLBACK_WORDS_PER_MINUTE as u32,
        }
    }
}

impl Stats {
    #[must_use]
    pub fn from_samples(samples: &[Sample]) -> Self {
        let (total_words, total_seconds) =
            samples.iter().fold((0_u64, 0_u64), |(words, seconds), sample| {
                (
                    words + u64::from(sample.features.word_count),
                    seconds + u64::from(sample.time_spent_seconds),
                )
            });
        let average_speed = if total_words != 0 && total_seconds != 0 {
            (total_words as f64 / (total_seconds as f64 / 60.0)).round() as u32
        } else {
            Self::default().average_speed
        };
        Self {
            total_articles: samples.len(),
            average_speed,
        }
    }
}

impl Record for Stats {
    const KEY: &'static str = "stats";
}
