//! Shared configuration constants for the scraper
//!
//! Default values used throughout the codebase to keep the timing model and
//! output contract in one place.

use std::time::Duration;

/// Bound on navigation and on every CDP request issued by the session.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause after network quiescence so client-side rendering can finish.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Second, longer pause used when the first snapshot yielded no rows.
///
/// Must stay longer than [`DEFAULT_SETTLE_DELAY`].
pub const DEFAULT_EXTENDED_SETTLE_DELAY: Duration = Duration::from_secs(10);

/// Gap between consecutive feeds on the shared page.
pub const DEFAULT_INTER_FEED_DELAY: Duration = Duration::from_secs(3);

/// Data rows taken from any single table.
pub const DEFAULT_MAX_ROWS_PER_TABLE: usize = 10;

/// Default directory for CSV and metadata artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Words counted in the visible page text by the structural prober
pub const DEFAULT_PROBE_KEYWORDS: &[&str] = &[
    "flow", "capacity", "storage", "gas", "facility", "date", "tj", "pipeline",
];

/// Version tag stamped into placeholder artifacts and `metadata.json`
pub const SCRAPER_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Chrome user agent string presented to the site
///
/// A plain desktop Chrome identity; headless Chrome otherwise advertises
/// `HeadlessChrome`, which the bulletin board's CDN answers with a bot page.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
