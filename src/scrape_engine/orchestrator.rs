//! Feed orchestration
//!
//! Walks the configured feeds one after another on the single shared page.
//! Feeds are never processed concurrently: one page cannot serve two
//! navigations, and the site throttles rapid access.

use std::time::Instant;
use tracing::{info, warn};

use super::extractor::extract;
use crate::config::ScrapeConfig;
use crate::feed::{FeedResults, FeedTarget};
use crate::session::ScrapePage;

/// Drives navigation and extraction for every feed on one page
pub struct FeedOrchestrator<'a, P: ScrapePage> {
    page: &'a P,
    config: &'a ScrapeConfig,
}

impl<'a, P: ScrapePage> FeedOrchestrator<'a, P> {
    #[must_use]
    pub fn new(page: &'a P, config: &'a ScrapeConfig) -> Self {
        Self { page, config }
    }

    /// Scrape every target in order. Always returns one result per target.
    pub async fn run(&self, targets: &[FeedTarget]) -> FeedResults {
        let mut results = FeedResults::new();
        let total = targets.len();

        for (i, target) in targets.iter().enumerate() {
            if i > 0 && !self.config.inter_feed_delay().is_zero() {
                tokio::time::sleep(self.config.inter_feed_delay()).await;
            }

            info!("==== [{}/{}] {} ====", i + 1, total, target.kind);
            let started = Instant::now();

            let result = extract(self.page, target, self.config).await;

            if result.is_empty() {
                warn!(feed = %target.kind, "✗ {}: no data extracted", target.kind);
            } else {
                info!(feed = %target.kind, rows = result.len(), "✓ {}: {} records", target.kind, result.len());
            }
            info!(
                "==== {} finished in {:.1}s ====",
                target.kind,
                started.elapsed().as_secs_f64()
            );

            results.insert(result);
        }

        let with_data = results.iter().filter(|r| !r.is_empty()).count();
        info!(
            "Feeds with data: {}/{} ({} records)",
            with_data,
            total,
            results.total_records()
        );

        results
    }
}
