//! Error types for polyloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a tree
#[derive(Error, Debug)]
pub enum PolylocError {
    /// Failed to open, stat or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Worker count must be positive
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkers(usize),

    /// Queue capacity must be positive
    #[error("invalid queue capacity: the task queue needs room for at least one file")]
    InvalidQueueCapacity,

    /// A worker thread panicked before the pool drained
    #[error("worker thread '{0}' panicked")]
    WorkerPanicked(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
