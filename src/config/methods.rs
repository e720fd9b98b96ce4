//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ScrapeConfigBuilder;

impl<State> ScrapeConfigBuilder<State> {
    /// Set browser headless mode
    ///
    /// Headed mode is for watching a run locally; it needs a display server.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Use this Chrome/Chromium binary instead of searching for one
    #[must_use]
    pub fn chrome_executable(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_executable = path;
        self
    }

    #[must_use]
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn extended_settle_delay(mut self, delay: Duration) -> Self {
        self.extended_settle_delay = delay;
        self
    }

    #[must_use]
    pub fn inter_feed_delay(mut self, delay: Duration) -> Self {
        self.inter_feed_delay = delay;
        self
    }

    /// Set every wait to zero. Intended for tests against in-memory pages.
    #[must_use]
    pub fn without_delays(self) -> Self {
        self.settle_delay(Duration::ZERO)
            .extended_settle_delay(Duration::ZERO)
            .inter_feed_delay(Duration::ZERO)
    }

    #[must_use]
    pub fn max_rows_per_table(mut self, rows: usize) -> Self {
        self.max_rows_per_table = rows;
        self
    }

    /// Re-parse tables after the extended wait (default) or only log how
    /// the table count changed
    #[must_use]
    pub fn retry_after_extended_wait(mut self, retry: bool) -> Self {
        self.retry_after_extended_wait = retry;
        self
    }

    #[must_use]
    pub fn fail_on_empty(mut self, fail: bool) -> Self {
        self.fail_on_empty = fail;
        self
    }

    #[must_use]
    pub fn probe_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probe_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
