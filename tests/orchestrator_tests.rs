//! Tests for sequential feed orchestration

use gbb_scraper::{FeedKind, FeedOrchestrator};
use tempfile::TempDir;

mod common;
use common::{StaticPage, flow_rows, table_page, test_config, test_targets, url_for};

#[tokio::test]
async fn test_feeds_run_in_order_and_each_gets_a_result() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new()
        .with_page(&url_for(FeedKind::Flows), table_page(&["Date", "Flow"], &flow_rows(3)))
        .with_page(
            &url_for(FeedKind::Storage),
            table_page(&["Facility", "Storage"], &[vec!["Mondarra".into(), "55".into()]]),
        );

    let results = FeedOrchestrator::new(&page, &config).run(config.targets()).await;

    assert_eq!(page.visits(), vec![
        url_for(FeedKind::Flows),
        url_for(FeedKind::Capacity),
        url_for(FeedKind::Storage),
    ]);
    assert_eq!(results.len(), 3);
    assert_eq!(results.get(FeedKind::Flows).unwrap().len(), 3);
    assert!(results.get(FeedKind::Capacity).unwrap().is_empty());
    assert_eq!(results.get(FeedKind::Storage).unwrap().len(), 1);
    assert_eq!(results.total_records(), 4);
}

#[tokio::test]
async fn test_failed_feed_does_not_stop_later_feeds() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new()
        .with_failure(&url_for(FeedKind::Flows))
        .with_page(&url_for(FeedKind::Capacity), table_page(&["Facility", "TJ"], &[vec!["A".into(), "1".into()]]))
        .with_page(&url_for(FeedKind::Storage), table_page(&["Facility", "TJ"], &[vec!["B".into(), "2".into()]]));

    let results = FeedOrchestrator::new(&page, &config).run(&test_targets()).await;

    assert!(results.get(FeedKind::Flows).unwrap().is_empty());
    assert_eq!(results.get(FeedKind::Capacity).unwrap().len(), 1);
    assert_eq!(results.get(FeedKind::Storage).unwrap().len(), 1);
}
