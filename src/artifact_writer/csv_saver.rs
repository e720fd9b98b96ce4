//! CSV rendering of extraction results

use std::collections::HashSet;

use crate::error::{ScrapeError, ScrapeResult};
use crate::feed::RowRecord;

/// Placeholder status written when a feed produced nothing
pub const NO_DATA_STATUS: &str = "no_data_found";

/// Exact header of every placeholder artifact
pub const PLACEHOLDER_COLUMNS: [&str; 4] = ["debug_status", "timestamp", "url_tested", "scraper_version"];

/// Column stamped with the run timestamp on every data row
pub const SCRAPED_AT_COLUMN: &str = "scraped_at";

/// Labels across `rows` in first-seen order
fn column_labels(rows: &[RowRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut labels = Vec::new();
    for label in rows.iter().flat_map(RowRecord::labels) {
        if seen.insert(label) {
            labels.push(label);
        }
    }
    labels
}

/// Render data rows: `table_index, row_index, <labels…>, scraped_at`
///
/// A row lacking one of the labels gets an empty cell there.
pub fn render_rows(rows: &[RowRecord], timestamp: &str) -> ScrapeResult<Vec<u8>> {
    let labels = column_labels(rows);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["table_index", "row_index"];
    header.extend(labels.iter().copied());
    header.push(SCRAPED_AT_COLUMN);
    writer.write_record(&header)?;

    for row in rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.table_index.to_string());
        record.push(row.row_index.to_string());
        record.extend(
            labels
                .iter()
                .map(|label| row.get(label).unwrap_or_default().to_string()),
        );
        record.push(timestamp.to_string());
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}

/// Render the one-row "no data" placeholder
pub fn render_placeholder(url: &str, timestamp: &str, version: &str) -> ScrapeResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PLACEHOLDER_COLUMNS)?;
    writer.write_record([NO_DATA_STATUS, timestamp, url, version])?;
    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}
