//! Table-to-row-record parsing
//!
//! Pure functions over an HTML snapshot. The same snapshot and row cap always
//! produce the same row-records.

use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::feed::RowRecord;

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded CSS selector 'table' is invalid")
});

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("BUG: hardcoded CSS selector 'tr' is invalid"));

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("th, td").expect("BUG: hardcoded CSS selector 'th, td' is invalid")
});

/// Column names the artifact writer adds itself; a header using one is renamed
pub const RESERVED_LABELS: &[&str] = &["table_index", "row_index", "scraped_at"];

/// Tables found in one snapshot and the rows lifted from them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableScan {
    pub table_count: usize,
    pub rows: Vec<RowRecord>,
}

/// Parse every table in `html` into row-records
///
/// Row 0 of each table is its header. At most `max_rows_per_table` rows
/// after it are taken; rows without any non-blank cell are skipped and do
/// not count. Tables with no data rows contribute nothing.
#[must_use]
pub fn scan_tables(html: &str, max_rows_per_table: usize) -> TableScan {
    let document = Html::parse_document(html);
    let tables: Vec<ElementRef<'_>> = document.select(&TABLE_SELECTOR).collect();

    let mut rows = Vec::new();
    for (table_index, table) in tables.iter().enumerate() {
        rows.extend(parse_table(*table, table_index, max_rows_per_table));
    }

    TableScan {
        table_count: tables.len(),
        rows,
    }
}

fn parse_table(table: ElementRef<'_>, table_index: usize, max_rows: usize) -> Vec<RowRecord> {
    let rows: Vec<Vec<String>> = table
        .select(&ROW_SELECTOR)
        .filter(|row| nearest_ancestor(*row, "table") == Some(table))
        .map(row_cells)
        .collect();

    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    // Spacer rows (no cells, or only blank ones) are layout, not data
    data.iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()))
        .take(max_rows)
        .map(|(offset, cells)| RowRecord {
            table_index,
            row_index: offset + 1,
            cells: label_cells(header, cells),
        })
        .collect()
}

/// Text of the cells belonging to `row` (not to a table nested in it)
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL_SELECTOR)
        .filter(|cell| nearest_ancestor(*cell, "tr") == Some(row))
        .map(cell_text)
        .collect()
}

/// Text nodes owned by `cell`, whitespace-collapsed and space-separated
///
/// Text inside a nested table's cells belongs to those cells, not this one.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in cell.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let owner = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|a| matches!(a.value().name(), "td" | "th"));
        if owner != Some(cell) {
            continue;
        }
        for word in fragment.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }

    text
}

/// Pair each cell with a label unique within the row
///
/// A missing or blank header becomes `column_<index>`. A header colliding
/// with a reserved column, or repeating an earlier label, gets `_<index>`
/// appended until it is unique.
fn label_cells(header: &[String], cells: &[String]) -> Vec<(String, String)> {
    let mut used: HashSet<String> = HashSet::with_capacity(cells.len());

    cells
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut label = match header.get(index).filter(|h| !h.is_empty()) {
                Some(h) if RESERVED_LABELS.contains(&h.as_str()) => format!("{h}_{index}"),
                Some(h) => h.clone(),
                None => format!("column_{index}"),
            };
            while !used.insert(label.clone()) {
                label = format!("{label}_{index}");
            }
            (label, value.clone())
        })
        .collect()
}

fn nearest_ancestor<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == tag)
}
