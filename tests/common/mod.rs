//! Test utilities shared by the gbb_scraper integration tests

use anyhow::{Result, anyhow};
use gbb_scraper::{FeedKind, FeedTarget, PageSnapshot, ScrapeConfig, ScrapePage};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::Path;

/// In-memory page serving scripted snapshots per URL
///
/// Each URL holds a sequence of snapshots; every `snapshot()` call after a
/// navigation advances through it and sticks at the last one, which models
/// content that renders late.
#[allow(dead_code)]
#[derive(Default)]
pub struct StaticPage {
    pages: HashMap<String, Vec<PageSnapshot>>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    state: Mutex<PageState>,
}

#[derive(Default)]
struct PageState {
    current: Option<String>,
    cursor: usize,
    visits: Vec<String>,
}

#[allow(dead_code)]
impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for every snapshot of `url`
    pub fn with_page(self, url: &str, html: impl Into<String>) -> Self {
        self.with_sequence(url, vec![html.into()])
    }

    /// Serve each entry of `htmls` for successive snapshots of `url`
    pub fn with_sequence(mut self, url: &str, htmls: Vec<String>) -> Self {
        let snapshots = htmls
            .into_iter()
            .map(|html| PageSnapshot::new("WA Gas Bulletin Board", html))
            .collect();
        self.pages.insert(url.to_string(), snapshots);
        self
    }

    /// Navigation to `url` fails immediately
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Navigation to `url` never completes
    pub fn with_hang(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    /// URLs navigated to, in order
    pub fn visits(&self) -> Vec<String> {
        self.state.lock().visits.clone()
    }
}

impl ScrapePage for StaticPage {
    fn navigate(&self, url: &str) -> impl Future<Output = Result<()>> + Send {
        let hang = self.hanging.contains(url);
        let outcome = {
            let mut state = self.state.lock();
            state.visits.push(url.to_string());
            if self.failing.contains(url) {
                Err(anyhow!("net::ERR_NAME_NOT_RESOLVED at {url}"))
            } else {
                state.current = Some(url.to_string());
                state.cursor = 0;
                Ok(())
            }
        };

        async move {
            if hang {
                std::future::pending::<()>().await;
            }
            outcome
        }
    }

    fn snapshot(&self) -> impl Future<Output = Result<PageSnapshot>> + Send {
        let outcome = {
            let mut state = self.state.lock();
            let snapshot = state
                .current
                .as_ref()
                .and_then(|url| self.pages.get(url))
                .and_then(|seq| seq.get(state.cursor.min(seq.len().saturating_sub(1))))
                .cloned()
                .unwrap_or_else(|| PageSnapshot::new("", blank_page()));
            state.cursor += 1;
            Ok(snapshot)
        };
        std::future::ready(outcome)
    }
}

/// A page whose shell rendered but whose data did not
#[allow(dead_code)]
pub fn blank_page() -> String {
    "<html><head><title>WA GBB</title></head><body><div id=\"app\">Loading…</div></body></html>"
        .to_string()
}

/// One `<table>` element with `headers` and `rows`
#[allow(dead_code)]
pub fn table_html(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table><thead><tr>");
    for h in headers {
        html.push_str(&format!("<th>{h}</th>"));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// HTML document holding one table with `headers` and `rows`
#[allow(dead_code)]
pub fn table_page(headers: &[&str], rows: &[Vec<String>]) -> String {
    format!("<html><body>{}</body></html>", table_html(headers, rows))
}

/// Flows-style rows: `n` consecutive days with a flow value
#[allow(dead_code)]
pub fn flow_rows(n: usize) -> Vec<Vec<String>> {
    (1..=n)
        .map(|i| vec![format!("2024-01-{i:02}"), (100 + i).to_string()])
        .collect()
}

/// Local targets that never touch the network
#[allow(dead_code)]
pub fn test_targets() -> Vec<FeedTarget> {
    FeedKind::ALL
        .into_iter()
        .map(|kind| FeedTarget::new(kind, format!("https://gbb.test/#{}", kind.as_str())))
        .collect()
}

#[allow(dead_code)]
pub fn url_for(kind: FeedKind) -> String {
    format!("https://gbb.test/#{}", kind.as_str())
}

/// Config with no waits, writing into `dir`
#[allow(dead_code)]
pub fn test_config(dir: &Path) -> ScrapeConfig {
    ScrapeConfig::builder()
        .output_dir(dir)
        .targets(test_targets())
        .without_delays()
        .build()
        .expect("test config must build")
}
