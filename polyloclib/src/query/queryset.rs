//! Query set: the sorted snapshot handed to the reporter.
//!
//! The data pipeline is:
//! 1. Raw Data (ScanResult, frozen after the pool drains)
//! 2. QuerySet (sorted rows + totals)
//! 3. LanguageTable (formatted strings for display)

use std::cmp;

use serde::Serialize;

use crate::data::scan::ScanResult;
use crate::data::stats::{LanguageStats, SkipSummary};
use crate::source::filter::PatternSummary;

use super::options::{OrderBy, OrderDirection, Ordering};

/// A single item in a query set (one row of data before string formatting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryItem {
    /// Language label
    pub label: String,
    /// Statistics for this language
    pub stats: LanguageStats,
}

/// Query set for scan results.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageQuerySet {
    /// Ordering applied to `items`
    pub ordering: Ordering,
    /// One row per language, sorted
    pub items: Vec<QueryItem>,
    /// Total across all items
    pub total: LanguageStats,
    /// Work skipped because of errors
    pub skipped: SkipSummary,
    /// Exclusion patterns in effect
    pub patterns: PatternSummary,
}

impl LanguageQuerySet {
    /// Create a QuerySet from a ScanResult.
    pub fn from_result(result: &ScanResult, ordering: Ordering) -> Self {
        let mut items: Vec<QueryItem> = result
            .languages
            .iter()
            .map(|(label, stats)| QueryItem {
                label: label.to_string(),
                stats: *stats,
            })
            .collect();

        sort_items(&mut items, ordering);

        LanguageQuerySet {
            ordering,
            items,
            total: result.total,
            skipped: result.skipped,
            patterns: result.patterns.clone(),
        }
    }
}

/// Get sort key for stats based on OrderBy.
fn sort_key(stats: &LanguageStats, order_by: OrderBy) -> u64 {
    match order_by {
        OrderBy::Name => 0, // Name sorting handled separately
        OrderBy::Files => stats.file_count,
        OrderBy::Lines => stats.line_count,
        OrderBy::Size => stats.byte_count,
    }
}

/// Sort by the requested field; equal keys fall back to name ascending so
/// ties come out the same on every run.
fn sort_items(items: &mut [QueryItem], ordering: Ordering) {
    items.sort_by(|a, b| {
        let primary = match ordering.by {
            OrderBy::Name => a.label.cmp(&b.label),
            by => sort_key(&a.stats, by).cmp(&sort_key(&b.stats, by)),
        };
        let primary = match ordering.direction {
            OrderDirection::Ascending => primary,
            OrderDirection::Descending => primary.reverse(),
        };
        match primary {
            cmp::Ordering::Equal => a.label.cmp(&b.label),
            other => other,
        }
    });
}
