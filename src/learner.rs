//! Glue between the page events, the trainer and the storage.

use crate::badge::Badge;
use crate::dashboard::Dashboard;
use crate::features::Features;
use crate::prelude::*;
use crate::session::{Session, MIN_WORD_COUNT};
use crate::storage::{Record, Storage};
use crate::trainer::model::Model;
use crate::trainer::predictor::{Predictor, Source};
use crate::trainer::sample::{Sample, TrainingData};
use crate::trainer::stats::Stats;
use crate::trainer::{should_retrain, train, TrainerOpts};

pub struct Learner<S> {
    storage: S,
    opts: TrainerOpts,
}

/// Outcome of recording a sample.
#[derive(Debug)]
pub struct Recorded {
    pub stats: Stats,

    /// Set when the sample triggered a successful refit.
    pub model: Option<Model>,
}

impl<S: Storage> Learner<S> {
    pub fn new(storage: S, opts: TrainerOpts) -> Self {
        Self { storage, opts }
    }

    /// Estimates the reading time for the badge.
    ///
    /// Pages which are too short get no badge at all.
    #[instrument(skip_all, fields(word_count = features.word_count))]
    pub async fn estimate(&self, features: &Features) -> Result<Option<Badge>> {
        if features.word_count < MIN_WORD_COUNT {
            debug!("the page is too short, not showing an estimate");
            return Ok(None);
        }

        let model = Option::<Model>::load(&self.storage).await?;
        let training_data = TrainingData::load(&self.storage).await?;
        let estimate = Predictor::from(model.as_ref()).predict(features);
        let is_learning = match estimate.source {
            Source::Model => false,
            Source::Fallback => training_data.len() < self.opts.min_data_points,
        };
        info!(
            seconds = estimate.seconds,
            source = ?estimate.source,
            n_samples = training_data.len(),
            "estimated",
        );

        Ok(Some(Badge {
            minutes: estimate.minutes(),
            is_learning,
        }))
    }

    /// Appends the sample, refreshes the stats, and refits the model when it is due.
    #[instrument(
        skip_all,
        fields(
            word_count = sample.features.word_count,
            time_spent_seconds = sample.time_spent_seconds,
        ),
    )]
    pub async fn record(&self, sample: Sample, now: DateTime) -> Result<Recorded> {
        let mut training_data = TrainingData::load(&self.storage).await?;
        training_data.push(sample);
        training_data.save(&self.storage).await?;

        let stats = Stats::from_samples(&training_data);
        stats.save(&self.storage).await?;
        info!(
            total_articles = stats.total_articles,
            average_speed = stats.average_speed,
            "recorded",
        );

        let model = Option::<Model>::load(&self.storage).await?;
        let model = if should_retrain(training_data.len(), model.as_ref(), &self.opts) {
            info!("retraining…");
            self.fit(&training_data, now).await?
        } else {
            None
        };

        Ok(Recorded { stats, model })
    }

    /// Records the finished session, when the page goes away.
    ///
    /// Never fails: the errors are logged, and the next sessions still get recorded.
    pub async fn save_session(&self, session: &Session, now: DateTime) -> Option<Recorded> {
        let sample = session.finish(now)?;
        match self.record(sample, now).await {
            Ok(recorded) => Some(recorded),
            Err(error) => {
                error!("failed to save the session: {:#}", error);
                None
            }
        }
    }

    /// Refits the model on the whole dataset, regardless of the retraining schedule.
    #[instrument(skip_all)]
    pub async fn train(&self, now: DateTime) -> Result<Option<Model>> {
        let training_data = TrainingData::load(&self.storage).await?;
        self.fit(&training_data, now).await
    }

    /// Persists the new model, the previous one stays when the fit fails.
    async fn fit(&self, samples: &[Sample], now: DateTime) -> Result<Option<Model>> {
        let model = train(samples, &self.opts, now);
        if model.is_some() {
            model.save(&self.storage).await?;
        }
        Ok(model)
    }

    #[instrument(skip_all)]
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let training_data = TrainingData::load(&self.storage).await?;
        let model = Option::<Model>::load(&self.storage).await?;
        let stats = Stats::load(&self.storage).await?;
        Ok(Dashboard::new(
            &training_data,
            model.as_ref(),
            &stats,
            self.opts.min_data_points,
        ))
    }

    /// Forgets everything learned so far.
    #[instrument(skip_all)]
    pub async fn reset(&self) -> Result {
        TrainingData::default().save(&self.storage).await?;
        None::<Model>.save(&self.storage).await?;
        Stats::default().save(&self.storage).await?;
        info!("reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use serde_json::Value;

    use super::*;
    use crate::storage::memory::MemoryStorage;
    use crate::trainer::model::Weights;
    use crate::trainer::tests::{now, sample, samples};

    fn learner() -> Learner<MemoryStorage> {
        Learner::new(MemoryStorage::default(), TrainerOpts::default())
    }

    fn features(word_count: u32) -> Features {
        Features {
            word_count,
            ..Features::default()
        }
    }

    #[tokio::test]
    async fn estimate_fallback_ok() -> crate::Result {
        let badge = learner().estimate(&features(1000)).await?;
        assert_eq!(
            badge,
            Some(Badge {
                minutes: 5,
                is_learning: true,
            }),
        );
        Ok(())
    }

    #[tokio::test]
    async fn estimate_short_page_none() -> crate::Result {
        assert_eq!(learner().estimate(&features(99)).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn estimate_trained_ok() -> crate::Result {
        let learner = learner();
        Some(Model::new(Weights([30.0, 0.2, 1.0, 0.5, 10.0]), 20, now()))
            .save(&learner.storage)
            .await?;
        let features = Features {
            word_count: 500,
            image_count: 2,
            code_block_count: 1,
            has_video: false,
        };
        let badge = learner.estimate(&features).await?;
        assert_eq!(
            badge,
            Some(Badge {
                minutes: 2,
                is_learning: false,
            }),
        );
        Ok(())
    }

    #[tokio::test]
    async fn estimate_enough_data_not_learning() -> crate::Result {
        let learner = learner();
        TrainingData::from(samples(25)).save(&learner.storage).await?;
        let badge = learner.estimate(&features(1000)).await?.unwrap();
        assert!(!badge.is_learning);
        Ok(())
    }

    #[tokio::test]
    async fn record_retrains_on_schedule() -> crate::Result {
        let learner = learner();
        let mut samples = samples(31).into_iter();

        for _ in 0..19 {
            let recorded = learner.record(samples.next().unwrap(), now()).await?;
            assert!(recorded.model.is_none());
        }
        assert_eq!(Option::<Model>::load(&learner.storage).await?, None);

        let recorded = learner.record(samples.next().unwrap(), now()).await?;
        assert_eq!(recorded.stats.total_articles, 20);
        let model = recorded.model.expect("the 20th sample should trigger a fit");
        assert_eq!(model.data_points, 20);
        assert_eq!(Option::<Model>::load(&learner.storage).await?, Some(model));

        for _ in 0..9 {
            assert!(learner.record(samples.next().unwrap(), now()).await?.model.is_none());
        }
        let later = now() + Duration::days(1);
        let recorded = learner.record(samples.next().unwrap(), later).await?;
        let model = recorded.model.expect("the 30th sample should trigger a refit");
        assert_eq!(model.data_points, 30);
        assert_eq!(model.trained_at, later);

        assert_eq!(TrainingData::load(&learner.storage).await?.len(), 30);
        assert_eq!(Stats::load(&learner.storage).await?.total_articles, 30);
        Ok(())
    }

    #[tokio::test]
    async fn failed_fit_keeps_previous_model() -> crate::Result {
        let learner = learner();
        let previous = Some(Model::new(Weights([1.0, 0.3, 0.0, 0.0, 0.0]), 5, now()));
        previous.save(&learner.storage).await?;

        let mut idle_tabs = samples(20);
        for sample in &mut idle_tabs {
            sample.time_spent_seconds = 100_000;
        }
        TrainingData::from(idle_tabs).save(&learner.storage).await?;

        assert!(learner.train(now()).await?.is_none());
        assert_eq!(Option::<Model>::load(&learner.storage).await?, previous);
        Ok(())
    }

    #[tokio::test]
    async fn save_session_ok() {
        let learner = learner();
        let session = Session::start(features(1000), None, now());
        let recorded = learner
            .save_session(&session, now() + Duration::seconds(240))
            .await
            .unwrap();
        assert_eq!(recorded.stats.total_articles, 1);
        assert_eq!(recorded.stats.average_speed, 250);

        assert!(learner.save_session(&session, now() + Duration::seconds(5)).await.is_none());
    }

    struct BrokenStorage;

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn get(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Value) -> Result {
            Err(anyhow!("quota exceeded"))
        }
    }

    #[tokio::test]
    async fn save_session_storage_error_swallowed() {
        let learner = Learner::new(BrokenStorage, TrainerOpts::default());
        let session = Session::start(features(1000), None, now());
        let recorded = learner.save_session(&session, now() + Duration::minutes(4)).await;
        assert!(recorded.is_none());
    }

    #[tokio::test]
    async fn reset_ok() -> crate::Result {
        let learner = learner();
        for sample in samples(20) {
            learner.record(sample, now()).await?;
        }
        learner.record(sample(1000, 0, 0), now()).await?;
        assert!(Option::<Model>::load(&learner.storage).await?.is_some());

        learner.reset().await?;
        assert!(TrainingData::load(&learner.storage).await?.is_empty());
        assert_eq!(Option::<Model>::load(&learner.storage).await?, None);
        assert_eq!(Stats::load(&learner.storage).await?, Stats::default());
        Ok(())
    }
}
