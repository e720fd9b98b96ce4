//! Data structures for feeds, row-records and extraction results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Feeds
// =============================================================================

/// One of the three market views scraped per run
///
/// Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Flows,
    Capacity,
    Storage,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Flows, FeedKind::Capacity, FeedKind::Storage];

    /// Stable name used in logs and as the key in `metadata.json`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flows => "flows",
            Self::Capacity => "capacity",
            Self::Storage => "storage",
        }
    }

    /// Artifact file name inside the output directory
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Flows => "flows_data.csv",
            Self::Capacity => "capacity_data.csv",
            Self::Storage => "storage_data.csv",
        }
    }

    /// Bulletin board view scraped when no override is configured
    #[must_use]
    pub const fn default_url(self) -> &'static str {
        match self {
            Self::Flows => "https://gbbwa.aemo.com.au/#flows",
            Self::Capacity => "https://gbbwa.aemo.com.au/#reports/mediumTermCapacity",
            Self::Storage => "https://gbbwa.aemo.com.au/#reports/actualFlow",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feed and the page it is scraped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedTarget {
    pub kind: FeedKind,
    pub url: String,
}

impl FeedTarget {
    #[must_use]
    pub fn new(kind: FeedKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    /// All three feeds pointing at their default URLs
    #[must_use]
    pub fn defaults() -> Vec<FeedTarget> {
        FeedKind::ALL
            .into_iter()
            .map(|kind| FeedTarget::new(kind, kind.default_url()))
            .collect()
    }
}

// =============================================================================
// Row-records
// =============================================================================

/// One data row lifted from a table on the page
///
/// `cells` keeps header order. Labels are unique within a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Position of the source table among all tables on the page
    pub table_index: usize,
    /// Position of the source row among the table's rows (header is 0)
    pub row_index: usize,
    pub cells: Vec<(String, String)>,
}

impl RowRecord {
    /// Cell text for `label`, if this row has that column
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of scraping one feed
///
/// An empty `rows` vector is the structural representation of "no data";
/// there is no separate flag that could disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub feed: FeedKind,
    pub rows: Vec<RowRecord>,
}

impl ExtractionResult {
    #[must_use]
    pub fn new(feed: FeedKind, rows: Vec<RowRecord>) -> Self {
        Self { feed, rows }
    }

    #[must_use]
    pub fn empty(feed: FeedKind) -> Self {
        Self {
            feed,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Per-feed results of one run, ordered by feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedResults {
    results: BTreeMap<FeedKind, ExtractionResult>,
}

impl FeedResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for its feed, replacing any earlier one
    pub fn insert(&mut self, result: ExtractionResult) {
        self.results.insert(result.feed, result);
    }

    #[must_use]
    pub fn get(&self, feed: FeedKind) -> Option<&ExtractionResult> {
        self.results.get(&feed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.results.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.results.values().map(ExtractionResult::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_cover_every_feed_once() {
        let targets = FeedTarget::defaults();
        let kinds: Vec<_> = targets.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, FeedKind::ALL.to_vec());
        assert!(targets.iter().all(|t| t.url.starts_with("https://gbbwa.aemo.com.au/")));
    }

    #[test]
    fn feed_results_iterate_in_feed_order() {
        let mut results = FeedResults::new();
        results.insert(ExtractionResult::empty(FeedKind::Storage));
        results.insert(ExtractionResult::empty(FeedKind::Flows));
        results.insert(ExtractionResult::empty(FeedKind::Capacity));

        let order: Vec<_> = results.iter().map(|r| r.feed).collect();
        assert_eq!(order, vec![FeedKind::Flows, FeedKind::Capacity, FeedKind::Storage]);
    }

    #[test]
    fn feed_kind_serializes_lowercase() {
        let json = serde_json::to_string(&FeedKind::Capacity).unwrap();
        assert_eq!(json, "\"capacity\"");
    }
}
