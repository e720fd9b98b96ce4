pub mod artifact_writer;
pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod error;
pub mod feed;
pub mod scrape_engine;
pub mod session;
pub mod utils;

pub use artifact_writer::{
    ArtifactWriter, LoadedTable, RunMetadata, RunStatus, VerifyReport, format_timestamp,
    load_feed_csv, load_metadata, validate_columns, verify_output_dir,
};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::ScrapeConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use feed::{ExtractionResult, FeedKind, FeedResults, FeedTarget, RowRecord};
pub use scrape_engine::{FeedOrchestrator, RunSummary, extract, run_scrape, scrape_with_page};
pub use session::{BrowserSession, ChromePage, PageSnapshot, ScrapePage, with_session};
