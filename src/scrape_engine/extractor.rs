//! Multi-strategy extractor
//!
//! Per feed: navigate, let client-side rendering settle, probe, parse tables.
//! If nothing came out, wait longer and look again. Every failure inside this
//! module ends as an empty [`ExtractionResult`] for the feed; nothing
//! propagates to the orchestrator.

use tracing::{debug, error, info, warn};

use super::page_timeout::with_page_timeout;
use super::prober::probe;
use super::table_parser::{TableScan, scan_tables};
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::feed::{ExtractionResult, FeedTarget};
use crate::session::{PageSnapshot, ScrapePage};

/// Scrape one feed. Never fails.
pub async fn extract<P: ScrapePage>(
    page: &P,
    target: &FeedTarget,
    config: &ScrapeConfig,
) -> ExtractionResult {
    match try_extract(page, target, config).await {
        Ok(result) => result,
        Err(e) => {
            error!(
                feed = %target.kind,
                url = %target.url,
                error = %e,
                "Feed failed, recording empty result"
            );
            ExtractionResult::empty(target.kind)
        }
    }
}

async fn try_extract<P: ScrapePage>(
    page: &P,
    target: &FeedTarget,
    config: &ScrapeConfig,
) -> ScrapeResult<ExtractionResult> {
    let feed = target.kind;

    info!(feed = %feed, url = %target.url, "Navigating");
    with_page_timeout(
        page.navigate(&target.url),
        config.navigation_timeout(),
        "Page navigation",
    )
    .await
    .map_err(|e| ScrapeError::Navigation {
        feed,
        url: target.url.clone(),
        message: format!("{e:#}"),
    })?;

    debug!(feed = %feed, "Settling for {:?}", config.settle_delay());
    tokio::time::sleep(config.settle_delay()).await;

    // Strategy 1: direct table parse
    let snapshot = take_snapshot(page, target).await?;
    probe(&snapshot, config.probe_keywords()).log(feed);

    let first = scan_tables(&snapshot.html, config.max_rows_per_table());
    if !first.rows.is_empty() {
        info!(
            feed = %feed,
            tables = first.table_count,
            rows = first.rows.len(),
            "Extracted rows on first pass"
        );
        return Ok(ExtractionResult::new(feed, first.rows));
    }

    if first.table_count == 0 {
        warn!(feed = %feed, "No tables on page");
    } else {
        warn!(feed = %feed, tables = first.table_count, "Tables found but none has data rows");
    }

    // Strategy 2: extended wait for late content
    info!(
        feed = %feed,
        "Waiting {:?} for late content",
        config.extended_settle_delay()
    );
    tokio::time::sleep(config.extended_settle_delay()).await;

    let snapshot = take_snapshot(page, target).await?;
    let second = scan_tables(&snapshot.html, config.max_rows_per_table());
    log_table_count_change(target, &first, &second);

    if !config.retry_after_extended_wait() {
        return Ok(ExtractionResult::empty(feed));
    }

    if second.rows.is_empty() {
        warn!(feed = %feed, "No rows after extended wait");
    } else {
        info!(
            feed = %feed,
            tables = second.table_count,
            rows = second.rows.len(),
            "Extracted rows after extended wait"
        );
    }
    Ok(ExtractionResult::new(feed, second.rows))
}

async fn take_snapshot<P: ScrapePage>(page: &P, target: &FeedTarget) -> ScrapeResult<PageSnapshot> {
    page.snapshot()
        .await
        .map_err(|e| ScrapeError::Extraction {
            feed: target.kind,
            message: format!("{e:#}"),
        })
}

fn log_table_count_change(target: &FeedTarget, before: &TableScan, after: &TableScan) {
    if before.table_count == after.table_count {
        info!(
            feed = %target.kind,
            tables = after.table_count,
            "Table count unchanged after extended wait"
        );
    } else {
        info!(
            feed = %target.kind,
            before = before.table_count,
            after = after.table_count,
            "Table count changed after extended wait, content arrived late"
        );
    }
}
