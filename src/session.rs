//! Tracking of a single page view.

use crate::features::Features;
use crate::helpers::time::round_seconds;
use crate::prelude::*;
use crate::trainer::sample::Sample;

/// Pages shorter than this get neither an estimate nor a sample.
pub const MIN_WORD_COUNT: u32 = 100;

pub const MIN_READ_SECONDS: u32 = 10;

/// The reading counts as completed once the viewport gets this close to the page bottom.
pub const COMPLETION_MARGIN_PIXELS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub features: Features,
    pub url: Option<String>,
    pub started_at: DateTime,
    pub completed_reading: bool,
}

impl Session {
    #[must_use]
    pub fn start(features: Features, url: Option<String>, now: DateTime) -> Self {
        Self {
            features,
            url,
            started_at: now,
            completed_reading: false,
        }
    }

    /// Marks the reading completed when the viewport bottom reaches the end of the page.
    pub fn track_scroll(&mut self, viewport_bottom: f64, page_height: f64) {
        if viewport_bottom >= page_height - COMPLETION_MARGIN_PIXELS {
            self.completed_reading = true;
        }
    }

    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime) -> u32 {
        round_seconds(now - self.started_at)
    }

    /// Turns the session into a sample, unless it looks like noise.
    #[must_use]
    pub fn finish(&self, now: DateTime) -> Option<Sample> {
        let time_spent_seconds = self.elapsed_seconds(now);
        if self.features.word_count < MIN_WORD_COUNT || time_spent_seconds < MIN_READ_SECONDS {
            debug!(
                word_count = self.features.word_count,
                time_spent_seconds,
                "the page or the visit is too short, not recording",
            );
            return None;
        }
        Some(Sample {
            features: self.features,
            time_spent_seconds,
            completed_reading: self.completed_reading,
            url: self.url.clone(),
            timestamp: now,
        })
    }
}
