//! Sort directives for reporting.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by language name (lexicographical)
    #[default]
    Name,
    /// Order by number of files
    Files,
    /// Order by number of lines
    Lines,
    /// Order by total size in bytes
    Size,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "language" | "lang" => Ok(OrderBy::Name),
            "files" | "file" => Ok(OrderBy::Files),
            "lines" | "line" => Ok(OrderBy::Lines),
            "size" | "bytes" => Ok(OrderBy::Size),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(OrderDirection::Ascending),
            "desc" | "descending" => Ok(OrderDirection::Descending),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Ordering configuration for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Create ordering by name ascending (default)
    pub fn by_name() -> Self {
        Self::default()
    }

    /// Create ordering by file count, largest first
    pub fn by_files() -> Self {
        Self {
            by: OrderBy::Files,
            direction: OrderDirection::Descending,
        }
    }

    /// Create ordering by line count, largest first
    pub fn by_lines() -> Self {
        Self {
            by: OrderBy::Lines,
            direction: OrderDirection::Descending,
        }
    }

    /// Create ordering by size, largest first
    pub fn by_size() -> Self {
        Self {
            by: OrderBy::Size,
            direction: OrderDirection::Descending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}
