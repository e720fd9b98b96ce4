//! Browser session lifecycle
//!
//! One Chromium instance and one page per run. [`with_session`] is the only
//! way the rest of the crate obtains a page, so the browser is released on
//! every exit path: explicitly after the run body finishes, and through
//! `Drop` if the body panics or its future is dropped.

mod page;

pub use page::{ChromePage, PageSnapshot, ScrapePage};

use chromiumoxide::browser::Browser;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::browser_profile::{BrowserProfile, create_unique_profile};
use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Running browser plus the resources that must die with it
///
/// Field order matters for `Drop`: the browser (whose own drop kills the
/// Chrome process) goes before the profile directory is removed.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    profile: Option<BrowserProfile>,
    closed: bool,
}

impl BrowserSession {
    /// Launch Chromium with a fresh profile
    pub async fn launch(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let profile = create_unique_profile()
            .map_err(|e| ScrapeError::SessionLaunch(format!("{e:#}")))?;

        let (browser, handler) = launch_browser(config, profile.path())
            .await
            .map_err(|e| ScrapeError::SessionLaunch(format!("{e:#}")))?;

        info!("Browser session started");
        Ok(Self {
            browser,
            handler,
            profile: Some(profile),
            closed: false,
        })
    }

    /// Open the single page used for the whole run
    pub async fn open_page(&self) -> ScrapeResult<ChromePage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::SessionLaunch(format!("Failed to create page: {e}")))?;
        Ok(ChromePage::new(page))
    }

    /// Close the browser, wait for the process to exit, then remove the profile
    pub async fn shutdown(mut self) {
        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        self.closed = true;
        self.handler.abort();
        // Removes the profile directory now that Chrome has released it
        self.profile.take();
        info!("Browser session closed");
    }
}

/// Runs on every exit path; only does real work when `shutdown` was skipped
/// (a panic in the run body or a dropped future).
///
/// On that path `Browser`'s own drop only starts killing Chrome and does not
/// wait for it, so removing the profile right after can race Chrome's open
/// files. A directory that survives is reported at `warn!` with its path by
/// `BrowserProfile`; later runs never reuse it since each gets a fresh one.
impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if !self.closed {
            let profile = self
                .profile
                .as_ref()
                .map(|p| p.path().display().to_string())
                .unwrap_or_default();
            warn!(
                profile = %profile,
                "BrowserSession dropped without shutdown, Chrome is killed on drop and its profile may outlive it"
            );
        }
    }
}

/// Run `run` with a freshly launched browser page, releasing the browser afterwards.
///
/// Launch failure is the only error returned: it is fatal for the run since
/// no feed can be processed without a page.
pub async fn with_session<T, F, Fut>(config: &ScrapeConfig, run: F) -> ScrapeResult<T>
where
    F: FnOnce(ChromePage) -> Fut,
    Fut: Future<Output = T>,
{
    let session = BrowserSession::launch(config).await?;

    let page = match session.open_page().await {
        Ok(page) => page,
        Err(e) => {
            session.shutdown().await;
            return Err(e);
        }
    };

    let output = run(page).await;
    session.shutdown().await;
    Ok(output)
}
