//! Query processing: sort the frozen snapshot for presentation.
//!
//! This module handles the third stage of the pipeline - turning the
//! aggregated scan result into ordered rows. It provides:
//!
//! - **Options**: sort field and direction (`OrderBy`, `OrderDirection`)
//! - **QuerySet**: sorted rows plus totals and skip counters
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyloclib::query::{LanguageQuerySet, Ordering};
//!
//! let queryset = LanguageQuerySet::from_result(&result, Ordering::by_lines());
//! ```

pub mod options;
pub mod queryset;

pub use options::{OrderBy, OrderDirection, Ordering};
pub use queryset::{LanguageQuerySet, QueryItem};
