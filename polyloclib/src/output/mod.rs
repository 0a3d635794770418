//! Output formatting: present data as tables.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting query results for display. It provides:
//!
//! - **LanguageTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//!
//! LanguageTable is a pure presentation layer - it only formats data into strings.
//! All sorting happens in the query stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyloclib::output::LanguageTable;
//!
//! let table = LanguageTable::from_queryset(&queryset);
//! // table.headers: ["Language", "Files", "Lines", "Size (KB)"]
//! // table.rows: [TableRow { label: "Go", values: ["1", "3", "0.04"] }]
//! // table.footer: TableRow { label: "Total", ... }
//! ```

pub mod table;

pub use table::{LanguageTable, TableRow, HEADERS};
