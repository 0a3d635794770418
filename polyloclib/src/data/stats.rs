//! Core data structures for per-language statistics

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::{Add, AddAssign};

/// Cumulative counts for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Number of files counted
    pub file_count: u64,
    /// Number of lines across those files
    pub line_count: u64,
    /// Total size in bytes, as reported by file metadata
    pub byte_count: u64,
}

impl LanguageStats {
    /// Create zeroed stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one counted file into these stats
    pub fn record(&mut self, line_count: u64, byte_count: u64) {
        self.file_count += 1;
        self.line_count += line_count;
        self.byte_count += byte_count;
    }

    /// Size in KiB (bytes / 1024)
    pub fn size_kib(&self) -> f64 {
        self.byte_count as f64 / 1024.0
    }
}

impl Add for LanguageStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            file_count: self.file_count + other.file_count,
            line_count: self.line_count + other.line_count,
            byte_count: self.byte_count + other.byte_count,
        }
    }
}

impl AddAssign for LanguageStats {
    fn add_assign(&mut self, other: Self) {
        self.file_count += other.file_count;
        self.line_count += other.line_count;
        self.byte_count += other.byte_count;
    }
}

/// Frozen mapping from language label to its stats.
///
/// Produced once the worker pool has drained. Keys are kept sorted so that
/// iteration and serialization are deterministic; report order is decided
/// later by the query stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsTable {
    languages: BTreeMap<String, LanguageStats>,
}

impl StatsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for one language, if any file of it was counted
    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.languages.get(language)
    }

    /// Whether the language has an entry
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Number of distinct languages
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// True when no file was counted
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Iterate `(language, stats)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageStats)> {
        self.languages.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sum across all languages
    pub fn total(&self) -> LanguageStats {
        self.languages
            .values()
            .fold(LanguageStats::new(), |acc, stats| acc + *stats)
    }
}

impl From<HashMap<String, LanguageStats>> for StatsTable {
    fn from(map: HashMap<String, LanguageStats>) -> Self {
        Self {
            languages: map.into_iter().collect(),
        }
    }
}

impl FromIterator<(String, LanguageStats)> for StatsTable {
    fn from_iter<I: IntoIterator<Item = (String, LanguageStats)>>(iter: I) -> Self {
        Self {
            languages: iter.into_iter().collect(),
        }
    }
}

/// Work that was dropped because of errors rather than by choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipSummary {
    /// Queued files that could not be opened, stat'ed or read
    pub unreadable_files: u64,
    /// Directory entries skipped after a traversal error
    pub walk_errors: u64,
}

impl SkipSummary {
    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.unreadable_files == 0 && self.walk_errors == 0
    }
}
