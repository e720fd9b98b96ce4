//! End-to-end runs against in-memory pages, checked through the artifacts

use gbb_scraper::artifact_writer::{NO_DATA_STATUS, PLACEHOLDER_COLUMNS};
use gbb_scraper::{FeedKind, RunStatus, load_feed_csv, load_metadata, scrape_with_page, verify_output_dir};
use tempfile::TempDir;

mod common;
use common::{StaticPage, flow_rows, table_page, test_config, test_targets, url_for};

#[tokio::test]
async fn test_all_feeds_empty_writes_placeholders_and_alert_status() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new();

    let summary = scrape_with_page(&page, &config).await.unwrap();

    assert!(!summary.found_data());
    assert_eq!(summary.total_records(), 0);

    for kind in FeedKind::ALL {
        let table = load_feed_csv(&dir.path().join(kind.file_name()));
        assert_eq!(table.headers, PLACEHOLDER_COLUMNS);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], NO_DATA_STATUS);
        assert_eq!(table.rows[0][1], summary.metadata.scrape_timestamp);
        assert_eq!(table.rows[0][2], url_for(kind));
    }

    let metadata = load_metadata(dir.path()).unwrap();
    assert_eq!(metadata.status, RunStatus::NoDataExtracted);
    assert_eq!(metadata.total_records, 0);
    assert!(verify_output_dir(dir.path(), &test_targets()).is_ok());
}

#[tokio::test]
async fn test_flows_only_run() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new().with_page(
        &url_for(FeedKind::Flows),
        table_page(&["Date", "Flow"], &flow_rows(3)),
    );

    let summary = scrape_with_page(&page, &config).await.unwrap();
    assert!(summary.found_data());

    let flows = load_feed_csv(&dir.path().join("flows_data.csv"));
    assert_eq!(flows.headers, ["table_index", "row_index", "Date", "Flow", "scraped_at"]);
    assert_eq!(flows.rows.len(), 3);
    assert!(flows.column("scraped_at").unwrap().all(|ts| ts == summary.metadata.scrape_timestamp));
    assert_eq!(flows.column("row_index").unwrap().collect::<Vec<_>>(), vec!["1", "2", "3"]);

    assert!(load_feed_csv(&dir.path().join("capacity_data.csv")).is_placeholder());
    assert!(load_feed_csv(&dir.path().join("storage_data.csv")).is_placeholder());

    let metadata = load_metadata(dir.path()).unwrap();
    assert_eq!(metadata.status, RunStatus::DataFound);
    assert_eq!(metadata.records_by_type[&FeedKind::Flows], 3);
    assert_eq!(metadata.records_by_type[&FeedKind::Capacity], 0);
    assert_eq!(metadata.records_by_type[&FeedKind::Storage], 0);
    assert_eq!(metadata.total_records, 3);
    assert_eq!(metadata.urls_tested[&FeedKind::Flows], url_for(FeedKind::Flows));
}

#[tokio::test]
async fn test_rerun_replaces_previous_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let full = StaticPage::new().with_page(
        &url_for(FeedKind::Capacity),
        table_page(&["Facility", "Capacity"], &[vec!["Dampier".into(), "40".into()]]),
    );
    scrape_with_page(&full, &config).await.unwrap();
    assert!(!load_feed_csv(&dir.path().join("capacity_data.csv")).is_placeholder());

    scrape_with_page(&StaticPage::new(), &config).await.unwrap();
    assert!(load_feed_csv(&dir.path().join("capacity_data.csv")).is_placeholder());
    assert_eq!(load_metadata(dir.path()).unwrap().total_records, 0);
}

#[tokio::test]
async fn test_verify_flags_tampered_metadata() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new().with_page(
        &url_for(FeedKind::Flows),
        table_page(&["Date", "Flow"], &flow_rows(2)),
    );
    scrape_with_page(&page, &config).await.unwrap();
    assert!(verify_output_dir(dir.path(), &test_targets()).is_ok());

    let path = dir.path().join("metadata.json");
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace("\"total_records\": 2", "\"total_records\": 5")).unwrap();

    let report = verify_output_dir(dir.path(), &test_targets());
    assert!(!report.is_ok());
    assert!(report.problems.iter().any(|p| p.contains("total_records")));
}

#[tokio::test]
async fn test_spacer_rows_alone_count_as_no_data() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let page = StaticPage::new().with_page(
        &url_for(FeedKind::Flows),
        "<html><body><table><tr><th>Date</th><th>Flow</th></tr><tr></tr><tr></tr></table></body></html>",
    );

    let summary = scrape_with_page(&page, &config).await.unwrap();

    assert!(!summary.found_data());
    assert_eq!(summary.metadata.status, RunStatus::NoDataExtracted);
    assert_eq!(summary.metadata.records_by_type[&FeedKind::Flows], 0);
    assert!(load_feed_csv(&dir.path().join("flows_data.csv")).is_placeholder());
}
