//! The page seam between the browser and the scrape engine
//!
//! The engine only ever needs two things from a page: go somewhere, and hand
//! back what is currently rendered. [`ChromePage`] provides them on top of a
//! chromiumoxide `Page`; tests provide them from memory.

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Rendered state of a page at one instant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub title: String,
    /// Serialized DOM (`document.documentElement.outerHTML`)
    pub html: String,
}

impl PageSnapshot {
    #[must_use]
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
        }
    }
}

/// A page the scrape engine can drive
///
/// Implementations are used from a single task; calls never overlap.
pub trait ScrapePage {
    /// Navigate to `url` and wait until the network has gone quiet.
    ///
    /// Callers bound this with their own timeout.
    fn navigate(&self, url: &str) -> impl Future<Output = Result<()>> + Send;

    /// Capture the current title and DOM. Must not change page state.
    fn snapshot(&self) -> impl Future<Output = Result<PageSnapshot>> + Send;
}

/// Script reporting load state and how many resources have been requested so far
const NETWORK_STATE_SCRIPT: &str = r#"
    (() => ({
        readyState: document.readyState,
        resources: performance.getEntriesByType('resource').length
    }))()
"#;

/// Network counts as quiet once no new resource entry appeared for this long
const QUIET_WINDOW: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Chromium-backed page owned by a [`super::BrowserSession`]
#[derive(Debug, Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub(crate) fn new(page: Page) -> Self {
        Self { page }
    }

    /// Poll until the document is complete and no new resource has been
    /// requested for [`QUIET_WINDOW`].
    async fn wait_for_network_quiet(&self) -> Result<()> {
        let start = Instant::now();
        let mut last_count: Option<u64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let state: serde_json::Value = self
                .page
                .evaluate(NETWORK_STATE_SCRIPT)
                .await
                .context("Failed to read network state")?
                .into_value()
                .context("Failed to decode network state")?;

            let complete = state.get("readyState").and_then(|v| v.as_str()) == Some("complete");
            let count = state.get("resources").and_then(serde_json::Value::as_u64);

            if count != last_count {
                trace!("Resource count changed: {:?} -> {:?}", last_count, count);
                last_count = count;
                quiet_since = Instant::now();
            } else if complete && quiet_since.elapsed() >= QUIET_WINDOW {
                debug!(
                    "Network quiet after {:.2}s ({} resources)",
                    start.elapsed().as_secs_f64(),
                    count.unwrap_or_default()
                );
                return Ok(());
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl ScrapePage for ChromePage {
    async fn navigate(&self, url: &str) -> Result<()> {
        // The bulletin board views differ only by fragment, and a
        // fragment-only change never fires a load event.
        self.page
            .goto("about:blank")
            .await
            .context("Failed to reset page to about:blank")?;

        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;

        self.wait_for_network_quiet().await
    }

    async fn snapshot(&self) -> Result<PageSnapshot> {
        let html = self
            .page
            .content()
            .await
            .context("Failed to read page content")?;
        let title = self
            .page
            .get_title()
            .await
            .context("Failed to read page title")?
            .unwrap_or_default();

        Ok(PageSnapshot { title, html })
    }
}
