//! Core configuration types for scrape runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::FeedTarget;

/// Main configuration struct for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Directory receiving the feed CSVs and `metadata.json`.
    ///
    /// **INVARIANT:** Always an absolute path (normalized in builder).
    pub(crate) output_dir: PathBuf,

    /// Feeds in processing order. Non-empty, one target per feed kind.
    pub(crate) targets: Vec<FeedTarget>,

    pub(crate) headless: bool,

    /// Explicit Chrome/Chromium binary, bypassing discovery
    pub(crate) chrome_executable: Option<PathBuf>,

    /// Bound on each navigation, including the network-quiescence wait.
    /// Also used as the CDP request timeout for the whole session.
    ///
    /// Default: 60 seconds
    pub(crate) navigation_timeout: Duration,

    /// Pause after navigation before the first snapshot
    ///
    /// Default: 5 seconds
    pub(crate) settle_delay: Duration,

    /// Pause before the second snapshot when the first one yielded no rows
    ///
    /// Default: 10 seconds
    pub(crate) extended_settle_delay: Duration,

    /// Gap between feeds on the shared page
    ///
    /// Default: 3 seconds
    pub(crate) inter_feed_delay: Duration,

    /// Data rows taken from any single table
    ///
    /// Default: 10
    pub(crate) max_rows_per_table: usize,

    /// Parse tables again after the extended wait instead of only logging
    /// the table count.
    ///
    /// Default: true
    pub(crate) retry_after_extended_wait: bool,

    /// Treat a run that extracted zero records as a failed run
    /// (non-zero process exit in the binary).
    ///
    /// Default: false
    pub(crate) fail_on_empty: bool,

    /// Words counted in visible page text for diagnostics
    pub(crate) probe_keywords: Vec<String>,
}
