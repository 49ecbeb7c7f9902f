//! Learning progress overview.

use std::fmt::{Display, Formatter};

use crate::helpers::time::format_seconds;
use crate::trainer::model::Model;
use crate::trainer::sample::Sample;
use crate::trainer::stats::Stats;

const N_RECENT_ITEMS: usize = 5;
const MAX_URL_LENGTH: usize = 40;

pub struct Dashboard {
    pub n_articles: usize,

    /// [`None`] until something gets recorded.
    pub average_speed: Option<u32>,

    pub min_data_points: usize,
    pub status: ModelStatus,

    /// Newest first.
    pub recent: Vec<RecentItem>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ModelStatus {
    Trained { n_data_points: usize },
    ReadyToTrain,
    Learning { n_remaining: usize },
}

#[derive(Debug, PartialEq, Eq)]
pub struct RecentItem {
    pub url: String,
    pub word_count: u32,
    pub time_spent_seconds: u32,
    pub completed_reading: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new(
        training_data: &[Sample],
        model: Option<&Model>,
        stats: &Stats,
        min_data_points: usize,
    ) -> Self {
        let n_articles = training_data.len();
        let status = match model {
            Some(model) if model.trained => ModelStatus::Trained {
                n_data_points: model.data_points,
            },
            _ if n_articles >= min_data_points => ModelStatus::ReadyToTrain,
            _ => ModelStatus::Learning {
                n_remaining: min_data_points - n_articles,
            },
        };
        let recent = training_data
            .iter()
            .rev()
            .take(N_RECENT_ITEMS)
            .map(|sample| RecentItem {
                url: sample
                    .url
                    .as_deref()
                    .map_or_else(String::new, |url| shorten_url(url, MAX_URL_LENGTH)),
                word_count: sample.features.word_count,
                time_spent_seconds: sample.time_spent_seconds,
                completed_reading: sample.completed_reading,
            })
            .collect();

        Self {
            n_articles,
            average_speed: (n_articles != 0).then_some(stats.average_speed),
            min_data_points,
            status,
            recent,
        }
    }

    /// Percentage of the samples collected towards the first fit.
    #[must_use]
    pub fn progress(&self) -> u32 {
        let progress = self.n_articles as f64 / self.min_data_points.max(1) as f64 * 100.0;
        progress.min(100.0).round() as u32
    }
}

impl Display for ModelStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trained { n_data_points } => {
                write!(formatter, "Model trained with {} articles", n_data_points)
            }
            Self::ReadyToTrain => formatter.write_str("Ready to train..."),
            Self::Learning { n_remaining } => {
                write!(formatter, "Learning... need {} more articles", n_remaining)
            }
        }
    }
}

impl Display for RecentItem {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{} • {} words • {}",
            self.url,
            self.word_count,
            format_seconds(self.time_spent_seconds),
        )?;
        if self.completed_reading {
            formatter.write_str(" ✓")?;
        }
        Ok(())
    }
}

impl Display for Dashboard {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(formatter, "Articles tracked: {}", self.n_articles)?;
        match self.average_speed {
            Some(average_speed) => writeln!(formatter, "Average speed:    {} wpm", average_speed)?,
            None => writeln!(formatter, "Average speed:    -- wpm")?,
        }
        writeln!(
            formatter,
            "Progress:         {}/{} articles ({}%)",
            self.n_articles,
            self.min_data_points,
            self.progress(),
        )?;
        writeln!(formatter, "Status:           {}", self.status)?;
        writeln!(formatter)?;
        if self.recent.is_empty() {
            write!(formatter, "No articles tracked yet. Start reading!")
        } else {
            writeln!(formatter, "Recent:")?;
            for item in &self.recent {
                writeln!(formatter, "  {}", item)?;
            }
            Ok(())
        }
    }
}

/// Host and path only, truncated to the maximum length.
///
/// Anything that does not look like a URL is just cut at the maximum length.
#[must_use]
pub fn shorten_url(url: &str, max_length: usize) -> String {
    let (_, rest) = match url.split_once("://") {
        Some(parts) => parts,
        None => return url.chars().take(max_length).collect(),
    };
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (authority, path) = rest
        .find('/')
        .map_or((rest, "/"), |index| rest.split_at(index));
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = match host.rfind(']') {
        // IPv6 literal, the port (if any) follows the closing bracket.
        Some(index) => &host[..=index],
        None => host.split(':').next().unwrap_or_default(),
    };

    let display = format!("{}{}", host, path);
    if display.chars().count() > max_length {
        let mut truncated: String = display.chars().take(max_length).collect();
        truncated.push_str("...");
        truncated
    } else {
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::model::Weights;
    use crate::trainer::tests::{now, sample, samples};

    #[test]
    fn empty_ok() {
        let dashboard = Dashboard::new(&[], None, &Stats::default(), 20);
        assert_eq!(dashboard.average_speed, None);
        assert_eq!(dashboard.status, ModelStatus::Learning { n_remaining: 20 });
        assert_eq!(dashboard.progress(), 0);

        let text = dashboard.to_string();
        assert!(text.contains("-- wpm"), "{}", text);
        assert!(text.contains("0/20 articles (0%)"), "{}", text);
        assert!(text.contains("No articles tracked yet"), "{}", text);
    }

    #[test]
    fn status_ok() {
        let samples = samples(25);
        let stats = Stats::from_samples(&samples);

        let dashboard = Dashboard::new(&samples[..12], None, &stats, 20);
        assert_eq!(dashboard.status, ModelStatus::Learning { n_remaining: 8 });
        assert_eq!(dashboard.progress(), 60);

        let dashboard = Dashboard::new(&samples, None, &stats, 20);
        assert_eq!(dashboard.status, ModelStatus::ReadyToTrain);
        assert_eq!(dashboard.progress(), 100);

        let model = Model::new(Weights::default(), 21, now());
        let dashboard = Dashboard::new(&samples, Some(&model), &stats, 20);
        assert_eq!(dashboard.status, ModelStatus::Trained { n_data_points: 21 });
        assert_eq!(dashboard.status.to_string(), "Model trained with 21 articles");
        assert_eq!(dashboard.average_speed, Some(stats.average_speed));
    }

    #[test]
    fn recent_ok() {
        let mut samples = samples(7);
        let mut latest = sample(1200, 0, 0);
        latest.time_spent_seconds = 45;
        latest.url = Some("https://example.com/blog/post?utm_source=feed".to_string());
        samples.push(latest);

        let dashboard = Dashboard::new(&samples, None, &Stats::from_samples(&samples), 20);
        assert_eq!(dashboard.recent.len(), 5);
        assert_eq!(dashboard.recent[0].word_count, 1200);
        assert_eq!(dashboard.recent[1].word_count, samples[6].features.word_count);
        assert_eq!(
            dashboard.recent[0].to_string(),
            "example.com/blog/post • 1200 words • 45s ✓",
        );
    }

    #[test]
    fn shorten_url_ok() {
        assert_eq!(shorten_url("https://example.com", 40), "example.com/");
        assert_eq!(
            shorten_url("http://user@example.com:8080/a/b#top", 40),
            "example.com/a/b",
        );
        assert_eq!(
            shorten_url("https://blog.example.com/2024/01/a-very-long-article-slug-here", 40),
            "blog.example.com/2024/01/a-very-long-art...",
        );
        assert_eq!(shorten_url("http://[::1]:8080/a", 40), "[::1]/a");
        assert_eq!(shorten_url("https://[2001:db8::7]/docs?q=1", 40), "[2001:db8::7]/docs");
        assert_eq!(shorten_url("not a url at all, just some text", 10), "not a url ");
        assert_eq!(shorten_url("not a url", 40), "not a url");
    }
}
