//! Source discovery: find files to count.
//!
//! This module handles the first stage of the pipeline - deciding which
//! files enter the task queue. It provides:
//!
//! - **Classification**: map a file extension to a language label
//! - **Filtering**: exclude files by glob, prune directories by name
//! - **Walking**: traverse a tree and feed a bounded channel
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyloclib::source::{classify, FilterConfig};
//!
//! assert_eq!(classify(Path::new("main.go")), Some("Go"));
//!
//! let filter = FilterConfig::new()
//!     .exclude("*_test.go")
//!     .skip_dir("vendor");
//! ```

pub mod filter;
pub mod language;
pub mod walker;

pub use filter::{FilterConfig, PatternSummary};
pub use language::{classify, language_for_extension, LANGUAGES};
pub use walker::{walk, FileTask, WalkErrorPolicy, WalkSummary};
