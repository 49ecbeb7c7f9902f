use serde::{Deserialize, Serialize};

use crate::features::{Features, N_FEATURES};
use crate::math::vector::dot;
use crate::prelude::*;
use crate::storage::Record;

pub const N_WEIGHTS: usize = N_FEATURES + 1;

/// Intercept followed by one coefficient per feature.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Weights(pub [f64; N_WEIGHTS]);

impl Weights {
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.0[1..]
    }

    /// Raw regression output, not clamped.
    #[must_use]
    pub fn apply(&self, features: &Features) -> f64 {
        self.intercept() + dot(self.coefficients(), &features.to_vector())
    }
}

impl TryFrom<&[f64]> for Weights {
    type Error = anyhow::Error;

    fn try_from(slice: &[f64]) -> Result<Self> {
        let weights = <[f64; N_WEIGHTS]>::try_from(slice)
            .map_err(|_| anyhow!("expected {} weights, got {}", N_WEIGHTS, slice.len()))?;
        Ok(Self(weights))
    }
}

/// Fitted model, replaced as a whole on every refit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub weights: Weights,
    pub trained: bool,

    /// Number of clean samples the model has been fitted on.
    pub data_points: usize,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub trained_at: DateTime,
}

impl Model {
    #[must_use]
    pub const fn new(weights: Weights, data_points: usize, trained_at: DateTime) -> Self {
        Self {
            weights,
            trained: true,
            data_points,
            trained_at,
        }
    }
}

/// Absent until the first successful fit, `null` after a reset.
impl Record for Option<Model> {
    const KEY: &'static str = "model";
}
