//! File and directory filtering with glob pattern support.
//!
//! Exclusion patterns are shell-style globs matched against a file's base
//! name only, never the full path. Directory skipping is a separate,
//! name-based decision used to prune whole subtrees during traversal.

use glob::Pattern;
use serde::Serialize;
use tracing::warn;

/// Configuration for file exclusion and directory pruning.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Compiled exclusion patterns
    exclude: Vec<Pattern>,
    /// Patterns that failed to compile (never match)
    invalid: Vec<String>,
    /// Directory base names whose subtrees are never visited
    skip_dirs: Vec<String>,
}

/// The exclusion patterns a scan actually ran with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternSummary {
    /// Patterns that compiled and were applied
    pub applied: Vec<String>,
    /// Malformed patterns, treated as non-matching
    pub invalid: Vec<String>,
}

impl FilterConfig {
    /// Create an empty filter (excludes nothing, skips no directory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclusion pattern.
    ///
    /// Surrounding whitespace is trimmed and blank patterns are ignored. A
    /// malformed pattern is kept aside as invalid and will never match, so a
    /// typo in one pattern cannot abort a scan.
    pub fn exclude(mut self, pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return self;
        }
        match Pattern::new(pattern) {
            Ok(pat) => self.exclude.push(pat),
            Err(e) => {
                warn!(pattern, error = %e, "ignoring malformed exclude pattern");
                self.invalid.push(pattern.to_string());
            }
        }
        self
    }

    /// Add multiple exclusion patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref());
        }
        self
    }

    /// Never descend into directories with this base name.
    pub fn skip_dir(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.skip_dirs.push(name.to_string());
        }
        self
    }

    /// Add multiple directory names to skip.
    pub fn skip_dirs<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for name in names {
            self = self.skip_dir(name.as_ref());
        }
        self
    }

    /// Check whether a file with this base name is excluded.
    ///
    /// Patterns are OR-ed: any match excludes the file.
    pub fn is_excluded(&self, base_name: &str) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches(base_name))
    }

    /// Check whether a directory with this base name should be pruned.
    pub fn should_skip_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|skip| skip == name)
    }

    /// Whether any exclusion pattern was supplied, valid or not.
    pub fn has_patterns(&self) -> bool {
        !self.exclude.is_empty() || !self.invalid.is_empty()
    }

    /// Patterns in effect, for reporting.
    pub fn summary(&self) -> PatternSummary {
        PatternSummary {
            applied: self.exclude.iter().map(|p| p.as_str().to_string()).collect(),
            invalid: self.invalid.clone(),
        }
    }
}
