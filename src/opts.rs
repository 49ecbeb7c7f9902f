//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::features::{count_words, Features};
use crate::prelude::*;
use crate::trainer::TrainerOpts;

pub mod parsers;

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Opts {
    /// JSON file with the training data, the model and the stats
    #[arg(
        short,
        long,
        default_value = "reading-time.json",
        env = "READING_TIME_STORAGE"
    )]
    pub storage: PathBuf,

    #[command(flatten)]
    pub trainer: TrainerOpts,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Estimate(EstimateOpts),
    Record(RecordOpts),

    /// Refits the model on all the recorded sessions
    Train,

    /// Shows the learning progress and the recent sessions
    Stats,

    Reset(ResetOpts),
}

/// Estimates the reading time of a page
#[derive(Args)]
pub struct EstimateOpts {
    #[command(flatten)]
    pub page: PageOpts,
}

/// Records a finished reading session and refits the model when it is due
#[derive(Args)]
pub struct RecordOpts {
    #[command(flatten)]
    pub page: PageOpts,

    /// Time spent on the page, for example: `4m 30s`
    #[arg(long, value_parser = parsers::duration)]
    pub time_spent: StdDuration,

    /// The page has been scrolled to the bottom
    #[arg(long)]
    pub completed: bool,

    /// Lowest viewport position reached, in pixels
    #[arg(long, requires = "page_height")]
    pub viewport_bottom: Option<f64>,

    /// Full page height, in pixels
    #[arg(long, requires = "viewport_bottom")]
    pub page_height: Option<f64>,

    /// Page URL
    #[arg(long)]
    pub url: Option<String>,
}

impl RecordOpts {
    /// When the session has started, given it ends now.
    pub fn started_at(&self, now: DateTime) -> Result<DateTime> {
        let time_spent = chrono::Duration::from_std(self.time_spent)
            .context("the time spent is out of range")?;
        now.checked_sub_signed(time_spent)
            .ok_or_else(|| anyhow!("the time spent is too long"))
    }
}

/// Deletes the recorded sessions and the model
#[derive(Args)]
pub struct ResetOpts {
    /// Confirm the deletion, nothing is deleted without it
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct PageOpts {
    /// Number of words in the article
    #[arg(long, required_unless_present = "text", conflicts_with = "text")]
    pub words: Option<u32>,

    /// Plain text file to count the words in
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Number of images in the article
    #[arg(long, default_value_t = 0)]
    pub images: u32,

    /// Number of code blocks in the article
    #[arg(long, default_value_t = 0)]
    pub code_blocks: u32,

    /// The article embeds a video
    #[arg(long)]
    pub video: bool,
}

impl PageOpts {
    pub async fn features(&self) -> Result<Features> {
        let word_count = match (&self.words, &self.text) {
            (Some(word_count), _) => *word_count,
            (None, Some(path)) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                count_words(&text)
            }
            (None, None) => return Err(anyhow!("either the word count or the text is required")),
        };
        Ok(Features {
            word_count,
            image_count: self.images,
            code_block_count: self.code_blocks,
            has_video: self.video,
        })
    }
}
