//! Property tests for table parsing

use gbb_scraper::scrape_engine::scan_tables;
use proptest::prelude::*;

mod common;
use common::table_page;

fn cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .-]{0,12}"
}

proptest! {
    #[test]
    fn parsing_is_deterministic(
        headers in prop::collection::vec("[A-Za-z]{1,8}", 1..5),
        rows in prop::collection::vec(prop::collection::vec(cell(), 1..5), 0..20),
        cap in 1usize..15,
    ) {
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let html = table_page(&header_refs, &rows);

        prop_assert_eq!(scan_tables(&html, cap), scan_tables(&html, cap));
    }

    #[test]
    fn row_cap_is_respected(
        n in 0usize..60,
        cap in 1usize..15,
    ) {
        let rows: Vec<Vec<String>> = (0..n).map(|i| vec![i.to_string(), "x".into()]).collect();
        let html = table_page(&["Id", "Value"], &rows);

        let scan = scan_tables(&html, cap);
        prop_assert_eq!(scan.table_count, 1);
        prop_assert_eq!(scan.rows.len(), n.min(cap));
        for (i, row) in scan.rows.iter().enumerate() {
            prop_assert_eq!(row.row_index, i + 1);
            prop_assert_eq!(row.cells.len(), 2);
        }
    }

    #[test]
    fn labels_are_unique_within_each_row(
        headers in prop::collection::vec(prop_oneof![
            Just("Flow".to_string()),
            Just(String::new()),
            Just("row_index".to_string()),
            "[A-Z][a-z]{0,3}",
        ], 1..6),
    ) {
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let rows = vec![vec!["1".to_string(); headers.len()]];
        let html = table_page(&header_refs, &rows);

        for row in scan_tables(&html, 10).rows {
            let mut labels: Vec<&str> = row.labels().collect();
            let total = labels.len();
            labels.sort_unstable();
            labels.dedup();
            prop_assert_eq!(labels.len(), total);
            prop_assert!(labels.iter().all(|l| !l.is_empty()));
        }
    }
}
