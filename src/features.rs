//! Page features the reading time is estimated from.

use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 4;

/// `[word count, image count, code block count, has video]`.
pub type FeatureVector = [f64; N_FEATURES];

/// Raw counts supplied by the page inspection layer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub word_count: u32,

    #[serde(default)]
    pub image_count: u32,

    #[serde(default)]
    pub code_block_count: u32,

    #[serde(default)]
    pub has_video: bool,
}

impl Features {
    #[must_use]
    pub fn to_vector(self) -> FeatureVector {
        [
            f64::from(self.word_count),
            f64::from(self.image_count),
            f64::from(self.code_block_count),
            if self.has_video { 1.0 } else { 0.0 },
        ]
    }
}

/// Counts whitespace-separated words, ignoring single-character tokens.
#[must_use]
pub fn count_words(text: &str) -> u32 {
    let n_words = text
        .split_whitespace()
        .filter(|word| word.chars().nth(1).is_some())
        .count();
    u32::try_from(n_words).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_words_ok() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("A quick brown fox, a lazy dog."), 5);
        assert_eq!(count_words("Ёжик   в\tтумане\n"), 2);
    }

    #[test]
    fn to_vector_ok() {
        let features = Features {
            word_count: 500,
            image_count: 2,
            code_block_count: 1,
            has_video: true,
        };
        assert_eq!(features.to_vector(), [500.0, 2.0, 1.0, 1.0]);
        assert_eq!(Features::default().to_vector(), [0.0; N_FEATURES]);
    }
}
