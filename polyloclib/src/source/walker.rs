//! Directory traversal that feeds the task queue.
//!
//! The walker is the single producer of the scan pipeline. It prunes
//! skipped directories, drops excluded and unrecognized files, and pushes
//! one [`FileTask`] per surviving file into a bounded channel. Sending
//! blocks while the channel is full, so memory stays bounded no matter how
//! large the tree is.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::PolylocError;
use crate::Result;

use super::filter::FilterConfig;
use super::language::classify;

/// A file to be counted, with the language it was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
    pub language: &'static str,
}

/// What to do when an entry cannot be read during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WalkErrorPolicy {
    /// Stop the walk and fail the whole scan
    #[default]
    Abort,
    /// Log the error, count it, and keep walking
    Skip,
}

/// Counters describing what the walker saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Files pushed onto the task queue
    pub files_queued: u64,
    /// Files dropped by an exclusion pattern
    pub files_excluded: u64,
    /// Files whose extension maps to no known language
    pub files_unrecognized: u64,
    /// Directories pruned by name, subtree not visited
    pub dirs_pruned: u64,
    /// Traversal errors tolerated under [`WalkErrorPolicy::Skip`]
    pub walk_errors: u64,
}

/// Walk `root` and send every countable file to `tasks`.
///
/// The sender is consumed and dropped when the walk ends, successfully or
/// not, which closes the queue for the workers. If every receiver has
/// already gone away the walk stops early without error.
pub fn walk(
    root: &Path,
    filter: &FilterConfig,
    policy: WalkErrorPolicy,
    tasks: Sender<FileTask>,
) -> Result<WalkSummary> {
    let mut summary = WalkSummary::default();
    let pruned = Cell::new(0u64);

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // The root is always visited, even if its own name is skipped
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        // Links are resolved so a dangling one surfaces as a walk error, but a
        // linked directory is not entered: its files would be counted twice.
        if e.path_is_symlink() {
            trace!(path = %e.path().display(), "not descending into linked directory");
            return false;
        }
        let name = e.file_name().to_string_lossy();
        if filter.should_skip_dir(&name) {
            debug!(path = %e.path().display(), "pruning skipped directory");
            pruned.set(pruned.get() + 1);
            return false;
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                match policy {
                    WalkErrorPolicy::Abort => {
                        return Err(PolylocError::Walk { path, source: err });
                    }
                    WalkErrorPolicy::Skip => {
                        warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                        summary.walk_errors += 1;
                        continue;
                    }
                }
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if filter.is_excluded(&entry.file_name().to_string_lossy()) {
            summary.files_excluded += 1;
            continue;
        }

        let Some(language) = classify(entry.path()) else {
            summary.files_unrecognized += 1;
            continue;
        };

        let task = FileTask {
            path: entry.into_path(),
            language,
        };
        trace!(path = %task.path.display(), language, "queueing file");

        if tasks.send(task).is_err() {
            debug!("task queue has no receivers, stopping walk");
            break;
        }
        summary.files_queued += 1;
    }

    summary.dirs_pruned = pruned.get();
    Ok(summary)
}
