use chrono::Utc;
use clap::Parser;

use reading_time::helpers;
use reading_time::learner::Learner;
use reading_time::opts::{EstimateOpts, Opts, RecordOpts, Subcommand};
use reading_time::prelude::*;
use reading_time::session::Session;
use reading_time::storage::file::FileStorage;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    helpers::tracing::init()?;
    info!(version = env!("CARGO_PKG_VERSION"), storage = ?opts.storage, "starting…");

    let learner = Learner::new(FileStorage::new(opts.storage), opts.trainer);
    match opts.subcommand {
        Subcommand::Estimate(opts) => estimate(&learner, opts).await,
        Subcommand::Record(opts) => record(&learner, opts).await,
        Subcommand::Train => train(&learner).await,
        Subcommand::Stats => {
            println!("{}", learner.dashboard().await?);
            Ok(())
        }
        Subcommand::Reset(opts) if opts.yes => {
            learner.reset().await?;
            println!("All the training data has been deleted.");
            Ok(())
        }
        Subcommand::Reset(_) => {
            println!("This deletes all the training data and cannot be undone.");
            println!("Pass `--yes` to confirm.");
            Ok(())
        }
    }
}

async fn estimate(learner: &Learner<FileStorage>, opts: EstimateOpts) -> Result {
    let features = opts.page.features().await?;
    match learner.estimate(&features).await? {
        Some(badge) => println!("{}", badge),
        None => println!("The page is too short to estimate."),
    }
    Ok(())
}

async fn record(learner: &Learner<FileStorage>, opts: RecordOpts) -> Result {
    let features = opts.page.features().await?;
    let now = Utc::now();
    let started_at = opts.started_at(now)?;

    let mut session = Session::start(features, opts.url, started_at);
    if let (Some(viewport_bottom), Some(page_height)) = (opts.viewport_bottom, opts.page_height) {
        session.track_scroll(viewport_bottom, page_height);
    }
    session.completed_reading |= opts.completed;

    match learner.save_session(&session, now).await {
        Some(recorded) => {
            println!(
                "Recorded: {} articles, {} wpm on average.",
                recorded.stats.total_articles, recorded.stats.average_speed,
            );
            if let Some(model) = recorded.model {
                println!("Model trained with {} articles.", model.data_points);
            }
        }
        None => println!("The session has not been recorded."),
    }
    Ok(())
}

async fn train(learner: &Learner<FileStorage>) -> Result {
    match learner.train(Utc::now()).await? {
        Some(model) => println!(
            "Model trained with {} articles: {:?}",
            model.data_points, model.weights.0,
        ),
        None => println!("Not enough clean data to train the model, the previous one is kept."),
    }
    Ok(())
}
