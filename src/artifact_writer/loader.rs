//! Reading artifacts back
//!
//! Used by the `verify` subcommand and by downstream consumers that want the
//! same tolerant loading the dashboard applies: a missing or malformed file
//! is an empty table, never an error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::csv_saver::{NO_DATA_STATUS, PLACEHOLDER_COLUMNS, SCRAPED_AT_COLUMN};
use super::metadata::{METADATA_FILE, RunMetadata};
use crate::error::ScrapeResult;
use crate::feed::{FeedKind, FeedTarget};

/// A CSV artifact loaded into memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LoadedTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when this is a "no data" placeholder rather than data
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.headers.iter().map(String::as_str).eq(PLACEHOLDER_COLUMNS)
            && self
                .rows
                .first()
                .and_then(|r| r.first())
                .is_some_and(|s| s == NO_DATA_STATUS)
    }

    /// Values of one column, if present
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(move |r| r.get(idx).map(String::as_str).unwrap_or_default()),
        )
    }
}

/// Load a feed CSV. Missing, unreadable or malformed files load as empty.
pub fn load_feed_csv(path: &Path) -> LoadedTable {
    match try_load(path) {
        Ok(table) => table,
        Err(e) => {
            warn!("Cannot load {}: {e}", path.display());
            LoadedTable::default()
        }
    }
}

fn try_load(path: &Path) -> Result<LoadedTable, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
        .collect::<Result<_, _>>()?;
    Ok(LoadedTable { headers, rows })
}

/// True when `table` has rows and every column in `required`
#[must_use]
pub fn validate_columns(table: &LoadedTable, required: &[&str]) -> bool {
    if table.is_empty() {
        warn!("Table has no rows");
        return false;
    }
    let present: HashSet<&str> = table.headers.iter().map(String::as_str).collect();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|c| !present.contains(c))
        .collect();
    if !missing.is_empty() {
        warn!("Missing columns: {}", missing.join(", "));
    }
    missing.is_empty()
}

pub fn load_metadata(dir: &Path) -> ScrapeResult<RunMetadata> {
    let text = std::fs::read_to_string(dir.join(METADATA_FILE))?;
    Ok(serde_json::from_str(&text)?)
}

/// Findings from checking an output directory against the artifact contract
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub dir: PathBuf,
    pub problems: Vec<String>,
    pub records_by_type: Vec<(FeedKind, usize)>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check that `dir` holds a consistent set of artifacts for `targets`
///
/// Every feed file must exist and be either a placeholder or a data file
/// whose rows all carry the metadata timestamp, and the metadata counts must
/// match the files.
pub fn verify_output_dir(dir: &Path, targets: &[FeedTarget]) -> VerifyReport {
    let mut report = VerifyReport {
        dir: dir.to_path_buf(),
        ..VerifyReport::default()
    };

    let metadata = match load_metadata(dir) {
        Ok(m) => Some(m),
        Err(e) => {
            report.problems.push(format!("{METADATA_FILE}: {e}"));
            None
        }
    };

    for target in targets {
        let path = dir.join(target.kind.file_name());
        if !path.exists() {
            report.problems.push(format!("{} is missing", target.kind.file_name()));
            continue;
        }
        let table = load_feed_csv(&path);

        let count = if table.is_placeholder() {
            0
        } else if validate_columns(&table, &["table_index", "row_index", SCRAPED_AT_COLUMN]) {
            if let Some(meta) = &metadata {
                let stale = table
                    .column(SCRAPED_AT_COLUMN)
                    .into_iter()
                    .flatten()
                    .any(|ts| ts != meta.scrape_timestamp);
                if stale {
                    report.problems.push(format!(
                        "{}: scraped_at differs from metadata timestamp",
                        target.kind.file_name()
                    ));
                }
            }
            table.rows.len()
        } else {
            report.problems.push(format!(
                "{} is neither a placeholder nor a data file",
                target.kind.file_name()
            ));
            continue;
        };
        report.records_by_type.push((target.kind, count));

        if let Some(meta) = &metadata {
            let recorded = meta.records_by_type.get(&target.kind).copied();
            if recorded != Some(count) {
                report.problems.push(format!(
                    "{}: metadata records {:?}, file has {count}",
                    target.kind, recorded
                ));
            }
        }
    }

    if let Some(meta) = &metadata {
        let sum: usize = meta.records_by_type.values().sum();
        if sum != meta.total_records {
            report.problems.push(format!(
                "total_records {} does not equal per-feed sum {sum}",
                meta.total_records
            ));
        }
    }

    report
}
