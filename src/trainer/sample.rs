use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::features::Features;
use crate::prelude::*;
use crate::storage::Record;
use crate::trainer::predictor::fallback_seconds;
use crate::trainer::{MAX_PLAUSIBLE_FACTOR, MIN_PLAUSIBLE_SECONDS};

/// Single recorded reading session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(flatten)]
    pub features: Features,

    pub time_spent_seconds: u32,

    /// The user scrolled to the bottom of the page.
    #[serde(default)]
    pub completed_reading: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime,
}

impl Sample {
    /// Whether the observed time is believable for a page of this size.
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        let time_spent = f64::from(self.time_spent_seconds);
        time_spent > MIN_PLAUSIBLE_SECONDS
            && time_spent < fallback_seconds(self.features.word_count) * MAX_PLAUSIBLE_FACTOR
    }
}

/// Ordered dataset of all the recorded sessions, append-only until reset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct TrainingData(Vec<Sample>);

impl TrainingData {
    pub fn push(&mut self, sample: Sample) {
        self.0.push(sample);
    }
}

impl Deref for TrainingData {
    type Target = [Sample];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Sample>> for TrainingData {
    fn from(samples: Vec<Sample>) -> Self {
        Self(samples)
    }
}

impl Record for TrainingData {
    const KEY: &'static str = "trainingData";
}
