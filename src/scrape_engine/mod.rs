//! Scrape Engine Module
//!
//! Extraction pipeline for JavaScript-rendered pages: structural probing,
//! table parsing, the multi-strategy extractor, feed orchestration, and run
//! execution.

// Sub-modules
pub mod execution;
pub mod extractor;
pub mod orchestrator;
pub mod page_timeout;
pub mod prober;
pub mod table_parser;

// Re-exports for public API
pub use execution::{RunSummary, run_scrape, scrape_with_page};
pub use extractor::extract;
pub use orchestrator::FeedOrchestrator;
pub use prober::{ProbeReport, probe};
pub use table_parser::{TableScan, scan_tables};
