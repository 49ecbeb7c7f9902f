//! Personal reading speed model.
//!
//! Fits an ordinary least squares regression from the page features
//! to the time the user actually spent on the page.

use clap::Args;

use crate::opts::parsers;
use crate::prelude::*;
use crate::trainer::model::Model;
use crate::trainer::sample::Sample;

pub mod model;
pub mod predictor;
pub mod regression;
pub mod sample;
pub mod stats;

pub const MIN_DATA_POINTS: usize = 20;
pub const RETRAIN_INTERVAL: usize = 10;

/// Samples at or below this duration are not considered genuine reads.
pub const MIN_PLAUSIBLE_SECONDS: f64 = 10.0;

/// Samples at or above this multiple of the naive estimate are considered idle tabs.
pub const MAX_PLAUSIBLE_FACTOR: f64 = 10.0;

#[derive(Args, Copy, Clone, Debug)]
pub struct TrainerOpts {
    /// Minimum number of samples needed to fit the model
    #[arg(
        long,
        default_value_t = MIN_DATA_POINTS,
        value_parser = parsers::non_zero_usize,
        env = "READING_TIME_MIN_DATA_POINTS",
    )]
    pub min_data_points: usize,

    /// Number of new samples after which the model gets refitted
    #[arg(
        long,
        default_value_t = RETRAIN_INTERVAL,
        value_parser = parsers::non_zero_usize,
        env = "READING_TIME_RETRAIN_INTERVAL",
    )]
    pub retrain_interval: usize,
}

impl Default for TrainerOpts {
    fn default() -> Self {
        Self {
            min_data_points: MIN_DATA_POINTS,
            retrain_interval: RETRAIN_INTERVAL,
        }
    }
}

/// Tells whether the dataset has grown enough since the last fit.
#[must_use]
pub fn should_retrain(n_samples: usize, model: Option<&Model>, opts: &TrainerOpts) -> bool {
    if n_samples < opts.min_data_points {
        return false;
    }
    match model {
        Some(model) => n_samples.saturating_sub(model.data_points) >= opts.retrain_interval,
        None => true,
    }
}

/// Drops the sessions which are implausible compared to the naive estimate.
#[must_use]
pub fn filter_outliers(samples: &[Sample]) -> Vec<&Sample> {
    samples.iter().filter(|sample| sample.is_plausible()).collect()
}

/// Fits a new model.
///
/// Returns [`None`] when there is not enough clean data or the fit fails,
/// in which case the caller should keep whatever model it had.
#[instrument(skip_all, fields(n_samples = samples.len()))]
pub fn train(samples: &[Sample], opts: &TrainerOpts, now: DateTime) -> Option<Model> {
    if samples.len() < opts.min_data_points {
        info!(min_data_points = opts.min_data_points, "not enough data to train");
        return None;
    }

    let clean_samples = filter_outliers(samples);
    if clean_samples.len() < opts.min_data_points {
        warn!(
            n_clean_samples = clean_samples.len(),
            min_data_points = opts.min_data_points,
            "not enough clean data after filtering the outliers",
        );
        return None;
    }

    match regression::fit(&clean_samples) {
        Ok(weights) => {
            let model = Model::new(weights, clean_samples.len(), now);
            info!(data_points = model.data_points, weights = ?model.weights, "trained");
            Some(model)
        }
        Err(error) => {
            warn!("failed to fit the model: {:#}", error);
            None
        }
    }
}
