//! Structural prober
//!
//! Describes the shape of a rendered page for the operator: how many tables
//! and containers it has, which domain words appear in its visible text, and
//! whether it carries error/alert markup. Purely diagnostic. Nothing in the
//! engine branches on a [`ProbeReport`].

use scraper::{Html, Node, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::feed::FeedKind;
use crate::session::PageSnapshot;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded CSS selector 'table' is invalid")
});

static DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("BUG: hardcoded CSS selector 'div' is invalid"));

static SPAN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span").expect("BUG: hardcoded CSS selector 'span' is invalid")
});

static ERROR_MARKER_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".error, .alert, [role='alert'], .error-message, .errorMessage")
        .expect("BUG: hardcoded error marker selector is invalid")
});

/// Elements whose text never reaches the screen
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Shape of one page snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub title: String,
    /// Size of the serialized DOM in bytes
    pub content_length: usize,
    pub table_count: usize,
    pub div_count: usize,
    pub span_count: usize,
    /// Case-insensitive occurrences of each keyword in the visible text
    pub keyword_counts: BTreeMap<String, usize>,
    pub error_marker_count: usize,
}

/// Inspect a snapshot. Never fails: anything absent is a zero count.
#[must_use]
pub fn probe(snapshot: &PageSnapshot, keywords: &[String]) -> ProbeReport {
    let document = Html::parse_document(&snapshot.html);
    let text = visible_text(&document).to_lowercase();

    let keyword_counts = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| (k.clone(), text.matches(&k.to_lowercase()).count()))
        .collect();

    ProbeReport {
        title: snapshot.title.clone(),
        content_length: snapshot.html.len(),
        table_count: document.select(&TABLE_SELECTOR).count(),
        div_count: document.select(&DIV_SELECTOR).count(),
        span_count: document.select(&SPAN_SELECTOR).count(),
        keyword_counts,
        error_marker_count: document.select(&ERROR_MARKER_SELECTOR).count(),
    }
}

/// Text nodes outside [`INVISIBLE_TAGS`], space separated
fn visible_text(document: &Html) -> String {
    let mut out = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| INVISIBLE_TAGS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(trimmed);
        }
    }

    out
}

impl ProbeReport {
    /// Emit the report as structured log lines for `feed`
    pub fn log(&self, feed: FeedKind) {
        let keywords = self
            .keyword_counts
            .iter()
            .map(|(k, n)| format!("{k}={n}"))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            feed = %feed,
            title = %self.title,
            content_length = self.content_length,
            tables = self.table_count,
            divs = self.div_count,
            spans = self.span_count,
            keywords = %keywords,
            "Page structure"
        );

        if self.error_marker_count > 0 {
            warn!(
                feed = %feed,
                markers = self.error_marker_count,
                "Page contains error/alert markup"
            );
        }
    }
}
