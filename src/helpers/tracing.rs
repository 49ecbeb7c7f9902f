use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises tracing.
///
/// Logs go to the standard error, so that the command output stays clean.
pub fn init() -> Result {
    let format_filter = EnvFilter::try_from_env("READING_TIME_LOG")
        .or_else(|_| EnvFilter::try_new("reading_time=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(format_layer)
        .try_init()
        .context("failed to initialise tracing")?;

    Ok(())
}
