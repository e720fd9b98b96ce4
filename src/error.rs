//! Error types for scrape runs
//!
//! Only [`ScrapeError::SessionLaunch`] and artifact I/O failures ever reach the
//! caller of a run. Navigation and extraction errors are produced inside the
//! extractor and converted into empty results at the feed boundary.

use thiserror::Error;

use crate::feed::FeedKind;

/// Result type alias for scrape operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Error types for scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser could not be found, launched, or given a page
    #[error("Failed to start browser session: {0}")]
    SessionLaunch(String),

    /// Navigation timed out or the network request failed
    #[error("Navigation failed for {feed} ({url}): {message}")]
    Navigation {
        feed: FeedKind,
        url: String,
        message: String,
    },

    /// Snapshot or DOM evaluation failed after a successful navigation
    #[error("Extraction failed for {feed}: {message}")]
    Extraction { feed: FeedKind, message: String },

    /// Configuration rejected by the builder
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_error_names_feed_and_url() {
        let err = ScrapeError::Navigation {
            feed: FeedKind::Flows,
            url: "https://gbbwa.aemo.com.au/#flows".to_string(),
            message: "Page navigation timeout after 60 seconds".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("flows"));
        assert!(text.contains("https://gbbwa.aemo.com.au/#flows"));
    }

    #[test]
    fn io_errors_convert_with_source_text() {
        let err: ScrapeError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "data/flows_data.csv").into();
        assert!(matches!(err, ScrapeError::Io(_)));
        assert_eq!(err.to_string(), "IO error: data/flows_data.csv");
    }
}
