//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::feed::FeedTarget;

impl ScrapeConfig {
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn targets(&self) -> &[FeedTarget] {
        &self.targets
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&PathBuf> {
        self.chrome_executable.as_ref()
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    #[must_use]
    pub fn extended_settle_delay(&self) -> Duration {
        self.extended_settle_delay
    }

    #[must_use]
    pub fn inter_feed_delay(&self) -> Duration {
        self.inter_feed_delay
    }

    #[must_use]
    pub fn max_rows_per_table(&self) -> usize {
        self.max_rows_per_table
    }

    #[must_use]
    pub fn retry_after_extended_wait(&self) -> bool {
        self.retry_after_extended_wait
    }

    #[must_use]
    pub fn fail_on_empty(&self) -> bool {
        self.fail_on_empty
    }

    #[must_use]
    pub fn probe_keywords(&self) -> &[String] {
        &self.probe_keywords
    }
}
