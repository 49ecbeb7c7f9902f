use crate::features::Features;
use crate::trainer::model::{Model, Weights};

pub const FALLBACK_WORDS_PER_MINUTE: f64 = 200.0;

/// Floor for the model output, noisy fits may go near zero or negative.
pub const MIN_PREDICTED_SECONDS: f64 = 30.0;

/// Naive estimate at the fixed reading speed.
#[must_use]
pub fn fallback_seconds(word_count: u32) -> f64 {
    f64::from(word_count) / FALLBACK_WORDS_PER_MINUTE * 60.0
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Predictor {
    /// No trained model yet.
    Fallback,

    Trained(Weights),
}

impl From<Option<&Model>> for Predictor {
    fn from(model: Option<&Model>) -> Self {
        match model {
            Some(model) if model.trained => Self::Trained(model.weights),
            _ => Self::Fallback,
        }
    }
}

impl Predictor {
    #[must_use]
    pub fn predict(&self, features: &Features) -> Estimate {
        match self {
            Self::Fallback => Estimate {
                seconds: fallback_seconds(features.word_count),
                source: Source::Fallback,
            },
            Self::Trained(weights) => Estimate {
                seconds: weights.apply(features).max(MIN_PREDICTED_SECONDS),
                source: Source::Model,
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Source {
    Model,
    Fallback,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Estimate {
    pub seconds: f64,
    pub source: Source,
}

impl Estimate {
    /// Whole minutes for display, never less than one.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        (self.seconds / 60.0).round().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::trainer::tests::now;

    fn features(
        word_count: u32,
        image_count: u32,
        code_block_count: u32,
        has_video: bool,
    ) -> Features {
        Features {
            word_count,
            image_count,
            code_block_count,
            has_video,
        }
    }

    #[test]
    fn fallback_ok() {
        let estimate = Predictor::from(None::<&Model>).predict(&features(1000, 0, 0, false));
        assert_eq!(estimate.source, Source::Fallback);
        assert!((estimate.seconds - 300.0).abs() < f64::EPSILON);
        assert_eq!(estimate.minutes(), 5);
    }

    #[test]
    fn trained_ok() {
        let model = Model::new(Weights([30.0, 0.2, 1.0, 0.5, 10.0]), 20, now());
        let predictor = Predictor::from(Some(&model));
        assert_eq!(predictor, Predictor::Trained(model.weights));

        let estimate = predictor.predict(&features(500, 2, 1, false));
        assert_eq!(estimate.source, Source::Model);
        assert!((estimate.seconds - 132.5).abs() < 1e-9);
        assert_eq!(estimate.minutes(), 2);
    }

    #[test]
    fn trained_floor_ok() {
        let weights = Weights([-500.0, 0.1, 0.0, 0.0, 0.0]);
        let estimate = Predictor::Trained(weights).predict(&features(1000, 0, 0, false));
        assert!((estimate.seconds - MIN_PREDICTED_SECONDS).abs() < f64::EPSILON);
    }

    #[test]
    fn untrained_model_falls_back() {
        let mut model = Model::new(Weights([30.0, 0.2, 1.0, 0.5, 10.0]), 20, now());
        model.trained = false;
        assert_eq!(Predictor::from(Some(&model)), Predictor::Fallback);
    }

    #[test]
    fn minutes_at_least_one() {
        let estimate = Predictor::Fallback.predict(&features(10, 0, 0, false));
        assert_eq!(estimate.minutes(), 1);
    }

    proptest! {
        #[test]
        fn trained_never_below_floor(
            weights in prop::array::uniform5(-1000.0..1000.0_f64),
            word_count in 0..100_000_u32,
            image_count in 0..100_u32,
            code_block_count in 0..100_u32,
            has_video in any::<bool>(),
        ) {
            let features = features(word_count, image_count, code_block_count, has_video);
            let estimate = Predictor::Trained(Weights(weights)).predict(&features);
            prop_assert!(estimate.seconds >= MIN_PREDICTED_SECONDS);
        }
    }
}
