//! Ordinary least squares.

use itertools::Itertools;
use nalgebra::{DMatrix, DVector};

use crate::prelude::*;
use crate::trainer::model::{Weights, N_WEIGHTS};
use crate::trainer::sample::Sample;

/// Singular values below this are treated as zero, which makes a constant
/// feature (e.g. no video on any page) get a zero coefficient.
const SINGULAR_VALUE_EPSILON: f64 = 1e-9;

/// Fits the intercept and feature coefficients to the observed reading times.
///
/// Solved via SVD, so the result is the minimum-norm least squares solution
/// and is deterministic for the same input.
#[instrument(level = "debug", skip_all, fields(n_samples = samples.len()))]
pub fn fit(samples: &[&Sample]) -> Result<Weights> {
    if samples.len() < N_WEIGHTS {
        return Err(anyhow!(
            "at least {} samples are needed, got {}",
            N_WEIGHTS,
            samples.len(),
        ));
    }

    let vectors = samples
        .iter()
        .map(|sample| sample.features.to_vector())
        .collect_vec();
    let design = DMatrix::from_fn(samples.len(), N_WEIGHTS, |row, column| match column {
        0 => 1.0,
        _ => vectors[row][column - 1],
    });
    let targets = DVector::from_iterator(
        samples.len(),
        samples
            .iter()
            .map(|sample| f64::from(sample.time_spent_seconds)),
    );

    let solution = design
        .svd(true, true)
        .solve(&targets, SINGULAR_VALUE_EPSILON)
        .map_err(|error| anyhow!("failed to solve the least squares problem: {}", error))?;
    if !solution.iter().all(|weight| weight.is_finite()) {
        return Err(anyhow!("the fitted weights are not finite: {}", solution));
    }

    let weights = Weights::try_from(solution.as_slice())?;
    debug!(?weights, "fitted");
    Ok(weights)
}
