//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that the output directory and the feed targets are set before
//! building a `ScrapeConfig`.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::feed::FeedTarget;
use crate::utils::{
    DEFAULT_EXTENDED_SETTLE_DELAY, DEFAULT_INTER_FEED_DELAY, DEFAULT_MAX_ROWS_PER_TABLE,
    DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_PROBE_KEYWORDS, DEFAULT_SETTLE_DELAY,
};

// Type states for the builder
pub struct WithOutputDir;
pub struct Complete;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) targets: Vec<FeedTarget>,
    pub(crate) headless: bool,
    pub(crate) chrome_executable: Option<PathBuf>,
    pub(crate) navigation_timeout: Duration,
    pub(crate) settle_delay: Duration,
    pub(crate) extended_settle_delay: Duration,
    pub(crate) inter_feed_delay: Duration,
    pub(crate) max_rows_per_table: usize,
    pub(crate) retry_after_extended_wait: bool,
    pub(crate) fail_on_empty: bool,
    pub(crate) probe_keywords: Vec<String>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            output_dir: None,
            targets: Vec::new(),
            headless: true,
            chrome_executable: None,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            extended_settle_delay: DEFAULT_EXTENDED_SETTLE_DELAY,
            inter_feed_delay: DEFAULT_INTER_FEED_DELAY,
            max_rows_per_table: DEFAULT_MAX_ROWS_PER_TABLE,
            retry_after_extended_wait: true,
            fail_on_empty: false,
            probe_keywords: DEFAULT_PROBE_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl<State> ScrapeConfigBuilder<State> {
    fn into_state<Next>(self) -> ScrapeConfigBuilder<Next> {
        ScrapeConfigBuilder {
            output_dir: self.output_dir,
            targets: self.targets,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
            navigation_timeout: self.navigation_timeout,
            settle_delay: self.settle_delay,
            extended_settle_delay: self.extended_settle_delay,
            inter_feed_delay: self.inter_feed_delay,
            max_rows_per_table: self.max_rows_per_table,
            retry_after_extended_wait: self.retry_after_extended_wait,
            fail_on_empty: self.fail_on_empty,
            probe_keywords: self.probe_keywords,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> ScrapeConfigBuilder<WithOutputDir> {
        self.output_dir = Some(dir.into());
        self.into_state()
    }
}

impl ScrapeConfigBuilder<WithOutputDir> {
    pub fn targets(
        mut self,
        targets: impl IntoIterator<Item = FeedTarget>,
    ) -> ScrapeConfigBuilder<Complete> {
        self.targets = targets.into_iter().collect();
        self.into_state()
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<Complete> {
    pub fn build(self) -> ScrapeResult<ScrapeConfig> {
        let output_dir = self
            .output_dir
            .ok_or_else(|| ScrapeError::InvalidConfig("output_dir is required".into()))?;
        let output_dir = std::path::absolute(&output_dir).map_err(|e| {
            ScrapeError::InvalidConfig(format!(
                "cannot resolve output_dir {}: {e}",
                output_dir.display()
            ))
        })?;

        validate_targets(&self.targets)?;

        if self.max_rows_per_table == 0 {
            return Err(ScrapeError::InvalidConfig(
                "max_rows_per_table must be at least 1".into(),
            ));
        }
        if self.navigation_timeout.is_zero() {
            return Err(ScrapeError::InvalidConfig(
                "navigation_timeout must be non-zero".into(),
            ));
        }

        Ok(ScrapeConfig {
            output_dir,
            targets: self.targets,
            headless: self.headless,
            chrome_executable: self.chrome_executable,
            navigation_timeout: self.navigation_timeout,
            settle_delay: self.settle_delay,
            extended_settle_delay: self.extended_settle_delay,
            inter_feed_delay: self.inter_feed_delay,
            max_rows_per_table: self.max_rows_per_table,
            retry_after_extended_wait: self.retry_after_extended_wait,
            fail_on_empty: self.fail_on_empty,
            probe_keywords: self.probe_keywords,
        })
    }
}

fn validate_targets(targets: &[FeedTarget]) -> ScrapeResult<()> {
    if targets.is_empty() {
        return Err(ScrapeError::InvalidConfig(
            "at least one feed target is required".into(),
        ));
    }

    let mut seen = HashSet::new();
    for target in targets {
        if !seen.insert(target.kind) {
            return Err(ScrapeError::InvalidConfig(format!(
                "feed '{}' is configured more than once",
                target.kind
            )));
        }

        let parsed = url::Url::parse(&target.url).map_err(|e| {
            ScrapeError::InvalidConfig(format!(
                "invalid URL for feed '{}': {} ({e})",
                target.kind, target.url
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(ScrapeError::InvalidConfig(format!(
                "unsupported URL scheme '{}' for feed '{}'",
                parsed.scheme(),
                target.kind
            )));
        }
    }

    Ok(())
}
