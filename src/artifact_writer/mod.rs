//! Artifact output for a scrape run
//!
//! Every run leaves exactly one CSV per configured feed plus `metadata.json`
//! in the output directory. A feed that produced nothing still gets a file:
//! a one-row placeholder describing what was tried.

mod csv_saver;
pub mod loader;
mod metadata;

pub use csv_saver::{NO_DATA_STATUS, PLACEHOLDER_COLUMNS, SCRAPED_AT_COLUMN};
pub use loader::{LoadedTable, VerifyReport, load_feed_csv, load_metadata, validate_columns, verify_output_dir};
pub use metadata::{METADATA_FILE, RunMetadata, RunStatus, format_timestamp};

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::error::{ScrapeError, ScrapeResult};
use crate::feed::{FeedResults, FeedTarget};
use crate::utils::SCRAPER_VERSION;

/// Writes run artifacts into one output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Write one CSV per target and the metadata document.
    ///
    /// `timestamp` is stamped on every data row, every placeholder and the
    /// metadata, so all artifacts of a run agree.
    pub async fn write(
        &self,
        results: &FeedResults,
        targets: &[FeedTarget],
        timestamp: &str,
    ) -> ScrapeResult<RunMetadata> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for target in targets {
            let path = self.dir.join(target.kind.file_name());
            let rows = results.get(target.kind).map(|r| r.rows.as_slice()).unwrap_or_default();

            if rows.is_empty() {
                let bytes = csv_saver::render_placeholder(&target.url, timestamp, SCRAPER_VERSION)?;
                self.write_atomic(&path, bytes).await?;
                warn!(feed = %target.kind, "No data, wrote placeholder {}", path.display());
            } else {
                let bytes = csv_saver::render_rows(rows, timestamp)?;
                self.write_atomic(&path, bytes).await?;
                info!(feed = %target.kind, rows = rows.len(), "Saved {}", path.display());
            }
        }

        let metadata = RunMetadata::from_results(results, targets, timestamp);
        let json = serde_json::to_string_pretty(&metadata)?;
        self.write_atomic(&self.dir.join(METADATA_FILE), json.into_bytes())
            .await?;

        if metadata.total_records == 0 {
            error!(
                "ALERT: no records extracted from any feed; check the site structure and {}",
                self.dir.display()
            );
        }

        Ok(metadata)
    }

    /// Write through a temp file in the output directory, then rename into place
    ///
    /// Readers never see a half-written artifact. On failure the temp file is
    /// removed when it drops.
    async fn write_atomic(&self, path: &Path, bytes: Vec<u8>) -> ScrapeResult<()> {
        let dir = self.dir.clone();
        let path = path.to_path_buf();

        let blocking_task = tokio::task::spawn_blocking(move || -> ScrapeResult<()> {
            let mut temp_file = NamedTempFile::new_in(&dir)?;
            temp_file.write_all(&bytes)?;
            temp_file.persist(&path).map_err(|e| e.error)?;
            Ok(())
        });

        match blocking_task.await {
            Ok(result) => result,
            Err(e) => Err(ScrapeError::Io(std::io::Error::other(format!(
                "Artifact write task panicked: {e}"
            )))),
        }
    }
}
