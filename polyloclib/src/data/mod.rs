//! Data collection: count files and aggregate statistics.
//!
//! This module handles the second stage of the pipeline - reading the
//! files the walker queued and folding their counts into per-language
//! totals. It provides:
//!
//! - **Counting**: line and byte counts for one file (`count_file`)
//! - **Aggregation**: a lock-guarded language table shared by workers
//! - **Statistics**: core data structures (`LanguageStats`, `StatsTable`)
//! - **Scanning**: the walker + worker pool pipeline (`scan`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyloclib::data::{scan, ScanOptions};
//!
//! let result = scan(".", &ScanOptions::new().workers(4))?;
//! println!("Total lines: {}", result.total.line_count);
//! ```

pub mod aggregator;
pub mod counter;
pub mod scan;
pub mod stats;

pub use aggregator::Aggregator;
pub use counter::{count_file, FileCount, LineCounter};
pub use scan::{default_workers, scan, ScanOptions, ScanResult, DEFAULT_QUEUE_CAPACITY};
pub use stats::{LanguageStats, SkipSummary, StatsTable};
