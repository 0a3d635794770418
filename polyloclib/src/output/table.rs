//! Table-ready data structures for report output.
//!
//! The data flow is:
//! 1. Raw Data (ScanResult)
//! 2. QuerySet (sorted)
//! 3. LanguageTable (formatted strings for display)
//!
//! LanguageTable is a pure presentation layer - it only formats data, no
//! sorting logic. All ordering happens in the QuerySet layer.

use serde::{Deserialize, Serialize};

use crate::data::stats::{LanguageStats, SkipSummary};
use crate::query::queryset::LanguageQuerySet;

/// Column headers, in display order.
pub const HEADERS: [&str; 4] = ["Language", "Files", "Lines", "Size (KB)"];

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (language name or "Total")
    pub label: String,
    /// Values for each numeric column (as strings, ready for display)
    pub values: Vec<String>,
}

/// Table-ready report data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageTable {
    /// Title printed above the table
    pub title: String,
    /// Column headers: [Language, Files, Lines, Size (KB)]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Summary/footer row
    pub footer: TableRow,
    /// Lines printed below the table (skipped-file counters)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl LanguageTable {
    /// Create a LanguageTable from a LanguageQuerySet.
    pub fn from_queryset(qs: &LanguageQuerySet) -> Self {
        let rows = qs
            .items
            .iter()
            .map(|item| TableRow {
                label: item.label.clone(),
                values: format_stats(&item.stats),
            })
            .collect();
        let footer = TableRow {
            label: "Total".to_string(),
            values: format_stats(&qs.total),
        };

        LanguageTable {
            title: "Code Report".to_string(),
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
            footer,
            notes: build_notes(&qs.skipped),
        }
    }
}

/// Format stats as `[files, lines, size in KB]`.
fn format_stats(stats: &LanguageStats) -> Vec<String> {
    vec![
        stats.file_count.to_string(),
        stats.line_count.to_string(),
        format!("{:.2}", stats.size_kib()),
    ]
}

fn build_notes(skipped: &SkipSummary) -> Vec<String> {
    let mut notes = Vec::new();
    if skipped.unreadable_files > 0 {
        notes.push(format!(
            "{} {} skipped due to read errors",
            skipped.unreadable_files,
            plural(skipped.unreadable_files, "file", "files")
        ));
    }
    if skipped.walk_errors > 0 {
        notes.push(format!(
            "{} directory {} skipped due to traversal errors",
            skipped.walk_errors,
            plural(skipped.walk_errors, "entry", "entries")
        ));
    }
    notes
}

fn plural(n: u64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}
