//! Run execution
//!
//! Glues the pieces together for one invocation: session → orchestrator →
//! artifact writer. [`run_scrape`] is what the binary calls;
//! [`scrape_with_page`] runs the same pipeline on any [`ScrapePage`].

use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use super::orchestrator::FeedOrchestrator;
use crate::artifact_writer::{ArtifactWriter, RunMetadata, RunStatus, format_timestamp};
use crate::config::ScrapeConfig;
use crate::error::ScrapeResult;
use crate::feed::FeedResults;
use crate::session::{ScrapePage, with_session};

/// Outcome of one invocation
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub metadata: RunMetadata,
    pub elapsed: Duration,
}

impl RunSummary {
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.metadata.total_records
    }

    #[must_use]
    pub fn found_data(&self) -> bool {
        self.metadata.status == RunStatus::DataFound
    }

    /// Final tally, logged regardless of outcome
    pub fn log(&self) {
        let per_feed = self
            .metadata
            .records_by_type
            .iter()
            .map(|(feed, n)| format!("{feed}={n}"))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            status = %self.metadata.status,
            total = self.metadata.total_records,
            "Scrape finished in {:.1}s: {}",
            self.elapsed.as_secs_f64(),
            per_feed
        );
    }
}

/// Launch a browser, scrape every configured feed, write all artifacts.
///
/// Fails only when the browser session cannot be started or the artifacts
/// cannot be written.
pub async fn run_scrape(config: &ScrapeConfig) -> ScrapeResult<RunSummary> {
    let started = Instant::now();
    info!("Starting scrape of {} feeds", config.targets().len());

    let results = with_session(config, |page| async move {
        FeedOrchestrator::new(&page, config)
            .run(config.targets())
            .await
    })
    .await
    .inspect_err(|e| error!("Cannot start browser session: {e}"))?;

    finish(config, &results, started).await
}

/// Scrape every configured feed on `page` and write all artifacts.
pub async fn scrape_with_page<P: ScrapePage>(
    page: &P,
    config: &ScrapeConfig,
) -> ScrapeResult<RunSummary> {
    let started = Instant::now();
    let results = FeedOrchestrator::new(page, config)
        .run(config.targets())
        .await;
    finish(config, &results, started).await
}

async fn finish(
    config: &ScrapeConfig,
    results: &FeedResults,
    started: Instant,
) -> ScrapeResult<RunSummary> {
    let timestamp = format_timestamp(Utc::now());
    let metadata = ArtifactWriter::new(config.output_dir())
        .write(results, config.targets(), &timestamp)
        .await?;

    let summary = RunSummary {
        metadata,
        elapsed: started.elapsed(),
    };
    summary.log();
    Ok(summary)
}
