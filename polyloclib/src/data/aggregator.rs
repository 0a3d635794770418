//! Concurrent per-language aggregation.
//!
//! Workers share one [`Aggregator`] by reference. The language map lives
//! behind a single lock and is only ever touched through
//! [`Aggregator::record_file`], which creates a missing entry and applies
//! the increment in the same critical section. Reading the totals requires
//! ownership ([`Aggregator::into_snapshot`]), so there is no way to look at
//! them while a worker still holds a reference.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::stats::{LanguageStats, SkipSummary, StatsTable};

/// Thread-safe accumulator of per-language stats.
#[derive(Debug, Default)]
pub struct Aggregator {
    languages: Mutex<HashMap<String, LanguageStats>>,
    unreadable: AtomicU64,
}

impl Aggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one counted file to `language`.
    ///
    /// The first file of a language creates its entry; later files update
    /// it. Both happen under the same lock, so two workers meeting a new
    /// language at once still produce a single entry with both files in it.
    pub fn record_file(&self, language: &str, line_count: u64, byte_count: u64) {
        let mut languages = self.languages.lock();
        match languages.get_mut(language) {
            Some(stats) => stats.record(line_count, byte_count),
            None => {
                let mut stats = LanguageStats::new();
                stats.record(line_count, byte_count);
                languages.insert(language.to_string(), stats);
            }
        }
    }

    /// Note a queued file that could not be counted.
    pub fn record_failure(&self) {
        self.unreadable.fetch_add(1, Ordering::Relaxed);
    }

    /// Freeze the totals once every worker is done.
    pub fn into_snapshot(self) -> (StatsTable, SkipSummary) {
        let skipped = SkipSummary {
            unreadable_files: self.unreadable.into_inner(),
            walk_errors: 0,
        };
        (StatsTable::from(self.languages.into_inner()), skipped)
    }
}
