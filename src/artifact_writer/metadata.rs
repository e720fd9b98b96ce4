//! Run-level metadata document

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::feed::{FeedKind, FeedResults, FeedTarget};
use crate::utils::SCRAPER_VERSION;

/// File name of the metadata document inside the output directory
pub const METADATA_FILE: &str = "metadata.json";

/// Render the run timestamp exactly as it appears in every artifact
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether the run extracted anything at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    DataFound,
    NoDataExtracted,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DataFound => "data_found",
            Self::NoDataExtracted => "no_data_extracted",
        })
    }
}

/// Summary written once per run as `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub scrape_timestamp: String,
    pub records_by_type: BTreeMap<FeedKind, usize>,
    pub total_records: usize,
    pub status: RunStatus,
    pub urls_tested: BTreeMap<FeedKind, String>,
    pub scraper_version: String,
}

impl RunMetadata {
    /// Build the summary for `targets`. A target without a result counts as zero.
    #[must_use]
    pub fn from_results(results: &FeedResults, targets: &[FeedTarget], timestamp: &str) -> Self {
        let records_by_type: BTreeMap<FeedKind, usize> = targets
            .iter()
            .map(|t| (t.kind, results.get(t.kind).map_or(0, |r| r.len())))
            .collect();
        let total_records = records_by_type.values().sum();
        let urls_tested = targets.iter().map(|t| (t.kind, t.url.clone())).collect();

        Self {
            scrape_timestamp: timestamp.to_string(),
            records_by_type,
            total_records,
            status: if total_records > 0 {
                RunStatus::DataFound
            } else {
                RunStatus::NoDataExtracted
            },
            urls_tested,
            scraper_version: SCRAPER_VERSION.to_string(),
        }
    }
}
