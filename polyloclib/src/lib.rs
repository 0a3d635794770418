//! # polyloclib
//!
//! A concurrent lines-of-code counter that groups files by language.
//!
//! ## Overview
//!
//! The library walks a directory tree, classifies each file by its
//! extension, counts its lines and bytes, and aggregates totals per
//! language. Counting runs on a fixed pool of worker threads fed through a
//! bounded queue, so memory use and the number of open files stay bounded
//! however large the tree is.
//!
//! The pipeline has four stages, one module each:
//!
//! - **source**: classify extensions, filter names, walk the tree
//! - **data**: count files, aggregate, run the scan
//! - **query**: sort the frozen result
//! - **output**: format rows for display
//!
//! ## Features
//!
//! - **Bounded concurrency**: N workers, one producer, backpressure on a full queue
//! - **Glob exclusion**: `*.json`, `*_test.go`, matched against the base name
//! - **Directory pruning**: skip `node_modules` or `vendor` without descending
//! - **Error accounting**: unreadable files are counted and reported, never fatal
//! - **Pure Rust data types**: Returns structured data, no I/O side effects
//!
//! ## Example
//!
//! ```rust
//! use polyloclib::{scan, FilterConfig, LanguageQuerySet, Ordering, ScanOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.go"), "package main\n\nfunc main() {}").unwrap();
//! fs::write(dir.path().join("b.py"), "print(1)\n".repeat(10)).unwrap();
//! fs::write(dir.path().join("c.txt"), "ignored\n").unwrap();
//!
//! // Scan the tree
//! let result = scan(dir.path(), &ScanOptions::new()).unwrap();
//! assert_eq!(result.languages.get("Go").unwrap().line_count, 3);
//! assert_eq!(result.languages.get("Python").unwrap().line_count, 10);
//! assert_eq!(result.languages.len(), 2);
//!
//! // Scan with an exclusion pattern
//! let filter = FilterConfig::new().exclude("*.py");
//! let result = scan(dir.path(), &ScanOptions::new().filter(filter)).unwrap();
//! assert!(!result.languages.contains("Python"));
//!
//! // Sort for reporting
//! let qs = LanguageQuerySet::from_result(&result, Ordering::by_lines());
//! assert_eq!(qs.items[0].label, "Go");
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    count_file, default_workers, scan, Aggregator, FileCount, LanguageStats, LineCounter,
    ScanOptions, ScanResult, SkipSummary, StatsTable, DEFAULT_QUEUE_CAPACITY,
};
pub use error::PolylocError;
pub use output::{LanguageTable, TableRow};
pub use query::{LanguageQuerySet, OrderBy, OrderDirection, Ordering, QueryItem};
pub use source::{
    classify, FileTask, FilterConfig, PatternSummary, WalkErrorPolicy, WalkSummary, LANGUAGES,
};

/// Result type for polyloclib operations
pub type Result<T> = std::result::Result<T, PolylocError>;
