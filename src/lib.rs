//! Personalized reading time estimates.
//!
//! Every finished page view becomes a [`trainer::sample::Sample`]. Once enough of them are
//! collected, a linear model is fitted to predict how long the user spends on a page.
//! Until then, the estimate falls back to a fixed reading speed.

#![warn(clippy::all)]

pub mod badge;
pub mod dashboard;
pub mod features;
pub mod helpers;
pub mod learner;
pub mod math;
pub mod opts;
pub mod prelude;
pub mod session;
pub mod storage;
pub mod trainer;

pub use crate::prelude::{DateTime, Result};
