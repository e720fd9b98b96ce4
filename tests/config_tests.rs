//! Tests for the type-safe configuration builder

use gbb_scraper::{FeedKind, FeedTarget, ScrapeConfig, ScrapeError};
use std::time::Duration;
use tempfile::TempDir;

mod common;

#[test]
fn test_builder_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ScrapeConfig::builder()
        .output_dir(temp_dir.path())
        .targets(FeedTarget::defaults())
        .build()
        .unwrap();

    assert_eq!(config.output_dir(), temp_dir.path());
    assert_eq!(config.targets().len(), 3);
    assert!(config.headless());
    assert_eq!(config.navigation_timeout(), Duration::from_secs(60));
    assert_eq!(config.settle_delay(), Duration::from_secs(5));
    assert_eq!(config.extended_settle_delay(), Duration::from_secs(10));
    assert_eq!(config.inter_feed_delay(), Duration::from_secs(3));
    assert_eq!(config.max_rows_per_table(), 10);
    assert!(config.retry_after_extended_wait());
    assert!(!config.fail_on_empty());
    assert!(config.probe_keywords().iter().any(|k| k == "flow"));
}

#[test]
fn test_relative_output_dir_is_made_absolute() {
    let config = ScrapeConfig::builder()
        .output_dir("data")
        .targets(FeedTarget::defaults())
        .build()
        .unwrap();

    assert!(config.output_dir().is_absolute());
    assert!(config.output_dir().ends_with("data"));
}

#[test]
fn test_builder_rejects_bad_values() {
    let cases = [
        ScrapeConfig::builder().output_dir("d").targets(Vec::new()).build(),
        ScrapeConfig::builder()
            .output_dir("d")
            .targets([FeedTarget::new(FeedKind::Flows, "not a url")])
            .build(),
        ScrapeConfig::builder()
            .output_dir("d")
            .targets([FeedTarget::new(FeedKind::Flows, "ftp://gbb.test/flows")])
            .build(),
        ScrapeConfig::builder()
            .output_dir("d")
            .targets(FeedTarget::defaults())
            .max_rows_per_table(0)
            .build(),
        ScrapeConfig::builder()
            .output_dir("d")
            .targets(FeedTarget::defaults())
            .navigation_timeout(Duration::ZERO)
            .build(),
    ];

    for result in cases {
        assert!(matches!(result, Err(ScrapeError::InvalidConfig(_))));
    }
}

#[test]
fn test_without_delays_keeps_navigation_timeout() {
    let config = ScrapeConfig::builder()
        .output_dir("d")
        .targets(FeedTarget::defaults())
        .navigation_timeout(Duration::from_secs(7))
        .without_delays()
        .build()
        .unwrap();

    assert!(config.settle_delay().is_zero());
    assert!(config.extended_settle_delay().is_zero());
    assert!(config.inter_feed_delay().is_zero());
    assert_eq!(config.navigation_timeout(), Duration::from_secs(7));
}

#[test]
fn test_single_feed_subset_is_allowed() {
    let config = ScrapeConfig::builder()
        .output_dir("d")
        .targets([FeedTarget::new(FeedKind::Storage, "file:///tmp/storage.html")])
        .build()
        .unwrap();

    assert_eq!(config.targets()[0].kind, FeedKind::Storage);
}
