//! The concurrent scan pipeline.
//!
//! ```text
//! walker (calling thread)
//!   |  FileTask via bounded channel, blocks when full
//!   v
//! worker 0: recv -> count -> record_file -> recv ...
//! worker 1: recv -> count -> record_file -> recv ...
//!   ...
//! worker N-1: channel closed and empty -> exit
//!   |
//!   v  join every worker, then freeze the aggregator
//! ScanResult
//! ```
//!
//! Workers are spawned before the walker produces anything. Dropping the
//! walker's sender is the only shutdown signal; the result is read only
//! after every worker has been joined.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use serde::Serialize;
use tracing::debug;

use crate::error::PolylocError;
use crate::source::filter::{FilterConfig, PatternSummary};
use crate::source::walker::{walk, FileTask, WalkErrorPolicy, WalkSummary};
use crate::Result;

use super::aggregator::Aggregator;
use super::counter::LineCounter;
use super::stats::{LanguageStats, SkipSummary, StatsTable};

/// Default capacity of the task queue between walker and workers.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// One worker per available processing unit, or one if that is unknown.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Options for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Exclusion patterns and skipped directories
    pub filter: FilterConfig,
    /// Number of worker threads
    pub workers: usize,
    /// Capacity of the bounded task queue
    pub queue_capacity: usize,
    /// How traversal errors are handled
    pub on_walk_error: WalkErrorPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            filter: FilterConfig::new(),
            workers: default_workers(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            on_walk_error: WalkErrorPolicy::Abort,
        }
    }
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the number of worker threads.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the task queue capacity.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the traversal error policy.
    pub fn on_walk_error(mut self, policy: WalkErrorPolicy) -> Self {
        self.on_walk_error = policy;
        self
    }
}

/// Result of scanning a tree.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Root that was scanned
    pub root: PathBuf,
    /// Frozen per-language totals
    pub languages: StatsTable,
    /// Sum across all languages
    pub total: LanguageStats,
    /// Files and entries dropped because of errors
    pub skipped: SkipSummary,
    /// What the walker saw
    pub walk: WalkSummary,
    /// Exclusion patterns in effect
    pub patterns: PatternSummary,
    /// Number of workers used
    pub workers: usize,
    /// Wall time of the whole scan
    #[serde(skip)]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, Default)]
struct WorkerStats {
    files_counted: u64,
    files_failed: u64,
}

/// Scan `root` and aggregate line and byte counts per language.
///
/// A traversal error fails the whole scan under the default
/// [`WalkErrorPolicy::Abort`]; no partial result is returned. A file that
/// cannot be read never fails the scan, it is counted in
/// [`SkipSummary::unreadable_files`] instead.
///
/// # Example
///
/// ```rust
/// use polyloclib::{scan, FilterConfig, ScanOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.go"), "package a\n").unwrap();
/// fs::write(dir.path().join("b.py"), "x = 1\ny = 2\n").unwrap();
///
/// let options = ScanOptions::new()
///     .workers(2)
///     .filter(FilterConfig::new().exclude("*.py"));
/// let result = scan(dir.path(), &options).unwrap();
///
/// assert_eq!(result.languages.get("Go").unwrap().line_count, 1);
/// assert!(!result.languages.contains("Python"));
/// ```
pub fn scan(root: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanResult> {
    let root = root.as_ref();

    if options.workers == 0 {
        return Err(PolylocError::InvalidWorkers(options.workers));
    }
    if options.queue_capacity == 0 {
        return Err(PolylocError::InvalidQueueCapacity);
    }
    if !root.exists() {
        return Err(PolylocError::PathNotFound(root.to_path_buf()));
    }

    let started = Instant::now();
    let aggregator = Aggregator::new();
    let (tx, rx) = bounded::<FileTask>(options.queue_capacity);

    debug!(
        root = %root.display(),
        workers = options.workers,
        queue_capacity = options.queue_capacity,
        "starting scan"
    );

    let walked = thread::scope(|s| -> Result<WalkSummary> {
        let mut handles = Vec::with_capacity(options.workers);
        let mut spawn_error = None;

        for idx in 0..options.workers {
            let tasks = rx.clone();
            let aggregator = &aggregator;
            let spawned = thread::Builder::new()
                .name(format!("polyloc-worker-{idx}"))
                .spawn_scoped(s, move || run_worker(tasks, aggregator));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some(e);
                    break;
                }
            }
        }
        drop(rx);

        // The sender is moved into the walker (or dropped here), so the
        // queue is closed before we wait on the workers.
        let walked = match spawn_error {
            None => walk(root, &options.filter, options.on_walk_error, tx),
            Some(e) => {
                drop(tx);
                Err(PolylocError::Io(e))
            }
        };

        let mut panicked = None;
        for handle in handles {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            match handle.join() {
                Ok(stats) => debug!(
                    worker = %name,
                    counted = stats.files_counted,
                    failed = stats.files_failed,
                    "worker finished"
                ),
                Err(_) => {
                    panicked.get_or_insert(name);
                }
            }
        }
        if let Some(name) = panicked {
            return Err(PolylocError::WorkerPanicked(name));
        }

        walked
    });

    let walk_summary = walked?;
    let (languages, mut skipped) = aggregator.into_snapshot();
    skipped.walk_errors = walk_summary.walk_errors;
    let total = languages.total();
    let elapsed = started.elapsed();

    debug!(
        languages = languages.len(),
        files = total.file_count,
        unreadable = skipped.unreadable_files,
        elapsed_ms = elapsed.as_millis() as u64,
        "scan complete"
    );

    Ok(ScanResult {
        root: root.to_path_buf(),
        languages,
        total,
        skipped,
        walk: walk_summary,
        patterns: options.filter.summary(),
        workers: options.workers,
        elapsed,
    })
}

/// Consume tasks until the queue is closed and empty.
fn run_worker(tasks: Receiver<FileTask>, aggregator: &Aggregator) -> WorkerStats {
    let mut counter = LineCounter::new();
    let mut stats = WorkerStats::default();

    for task in tasks.iter() {
        match counter.count_path(&task.path) {
            Ok(count) => {
                aggregator.record_file(task.language, count.lines, count.bytes);
                stats.files_counted += 1;
            }
            Err(e) => {
                debug!(path = %task.path.display(), error = %e, "skipping unreadable file");
                aggregator.record_failure();
                stats.files_failed += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// `a.go` has 3 lines without a trailing newline, `b.py` has 10.
    fn create_basic_tree(root: &Path) {
        write_file(root, "a.go", "package main\n\nfunc main() {}");
        write_file(root, "b.py", &"print(1)\n".repeat(10));
        write_file(root, "c.txt", "not code\n");
    }

    fn create_mixed_tree(root: &Path) {
        create_basic_tree(root);
        write_file(root, "web/app.js", "let a = 1;\nlet b = 2;\n");
        write_file(root, "web/lib/util.ts", "export const x = 1;\n");
        write_file(root, "svc/main.rs", "fn main() {\n}\n");
        write_file(root, "svc/src/lib.rs", "pub fn f() {}\n");
        write_file(root, "svc/native/ffi.c", "int x;\n");
        write_file(root, "svc/native/ffi.h", "extern int x;\n");
        for i in 0..40 {
            write_file(root, &format!("gen/mod_{i}.go"), &"// line\n".repeat(i + 1));
        }
    }

    fn run(root: &Path, options: ScanOptions) -> ScanResult {
        scan(root, &options).unwrap()
    }

    #[test]
    fn test_basic_scenario() {
        let temp = tempdir().unwrap();
        create_basic_tree(temp.path());

        let result = run(temp.path(), ScanOptions::new());

        let go = result.languages.get("Go").unwrap();
        assert_eq!(go.file_count, 1);
        assert_eq!(go.line_count, 3);
        let py = result.languages.get("Python").unwrap();
        assert_eq!(py.file_count, 1);
        assert_eq!(py.line_count, 10);
        assert_eq!(py.byte_count, 90);
        assert_eq!(result.languages.len(), 2);

        assert_eq!(result.walk.files_unrecognized, 1);
        assert_eq!(result.total.file_count, 2);
        assert!(result.skipped.is_clean());
    }

    #[test]
    fn test_exclusion_removes_language_entirely() {
        let temp = tempdir().unwrap();
        create_basic_tree(temp.path());

        let options = ScanOptions::new().filter(FilterConfig::new().exclude("*.py"));
        let result = run(temp.path(), options);

        assert!(!result.languages.contains("Python"));
        let go = result.languages.get("Go").unwrap();
        assert_eq!(go.file_count, 1);
        assert_eq!(go.line_count, 3);
        assert_eq!(result.walk.files_excluded, 1);
        assert_eq!(result.patterns.applied, vec!["*.py".to_string()]);
    }

    #[test]
    fn test_empty_file_counts_as_file() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "empty.js", "");

        let result = run(temp.path(), ScanOptions::new());

        assert_eq!(
            *result.languages.get("JavaScript").unwrap(),
            LanguageStats {
                file_count: 1,
                line_count: 0,
                byte_count: 0,
            }
        );
    }

    #[test]
    fn test_skipped_directory_contributes_nothing() {
        let temp = tempdir().unwrap();
        create_basic_tree(temp.path());
        let baseline = run(
            temp.path(),
            ScanOptions::new().filter(FilterConfig::new().skip_dir("vendor")),
        );

        write_file(temp.path(), "vendor/deep/inside/zz_planted_marker.kt", "val x = 1\n");
        write_file(temp.path(), "vendor/extra.go", "package vendor\n");
        let result = run(
            temp.path(),
            ScanOptions::new().filter(FilterConfig::new().skip_dir("vendor")),
        );

        assert_eq!(result.languages, baseline.languages);
        assert!(!result.languages.contains("Kotlin"));
        assert_eq!(result.walk.dirs_pruned, 1);
    }

    #[test]
    fn test_file_count_matches_recognized_files() {
        let temp = tempdir().unwrap();
        create_mixed_tree(temp.path());

        let result = run(temp.path(), ScanOptions::new());

        // a.go, b.py, app.js, util.ts, main.rs, lib.rs, ffi.c, ffi.h, 40 generated
        assert_eq!(result.total.file_count, 48);
        assert_eq!(result.walk.files_queued, 48);
        assert_eq!(
            result.walk.files_queued,
            result.total.file_count + result.skipped.unreadable_files
        );
        assert_eq!(result.languages.get("Go").unwrap().file_count, 41);
        assert_eq!(result.languages.get("C").unwrap().file_count, 2);
        assert_eq!(result.languages.get("Rust").unwrap().file_count, 2);
    }

    #[test]
    fn test_worker_skips_unreadable_file_and_keeps_going() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "ok.py", "print(1)\nprint(2)\n");

        let (tx, rx) = bounded(4);
        tx.send(FileTask {
            path: temp.path().join("vanished.go"),
            language: "Go",
        })
        .unwrap();
        tx.send(FileTask {
            path: temp.path().join("ok.py"),
            language: "Python",
        })
        .unwrap();
        drop(tx);

        let aggregator = Aggregator::new();
        let stats = run_worker(rx, &aggregator);
        let (languages, skipped) = aggregator.into_snapshot();

        assert_eq!(stats.files_counted, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(skipped.unreadable_files, 1);
        assert!(!languages.contains("Go"));
        assert_eq!(languages.get("Python").unwrap().line_count, 2);
        assert_eq!(languages.total().file_count + skipped.unreadable_files, 2);
    }

    #[test]
    fn test_unreadable_files_split_across_pool() {
        let temp = tempdir().unwrap();
        write_file(temp.path(), "a.go", "package a\n");

        let (tx, rx) = bounded(2);
        let aggregator = Aggregator::new();
        thread::scope(|s| {
            for _ in 0..3 {
                let tasks = rx.clone();
                let aggregator = &aggregator;
                s.spawn(move || run_worker(tasks, aggregator));
            }
            drop(rx);
            for i in 0..10 {
                let path = if i % 2 == 0 {
                    temp.path().join("a.go")
                } else {
                    temp.path().join(format!("missing_{i}.go"))
                };
                tx.send(FileTask {
                    path,
                    language: "Go",
                })
                .unwrap();
            }
            drop(tx);
        });

        let (languages, skipped) = aggregator.into_snapshot();
        assert_eq!(languages.get("Go").unwrap().file_count, 5);
        assert_eq!(skipped.unreadable_files, 5);
    }

    #[test]
    fn test_single_worker_matches_many_workers() {
        let temp = tempdir().unwrap();
        create_mixed_tree(temp.path());

        let single = run(temp.path(), ScanOptions::new().workers(1));
        let many = run(temp.path(), ScanOptions::new().workers(8));
        let tiny_queue = run(temp.path(), ScanOptions::new().workers(4).queue_capacity(1));

        assert_eq!(single.languages, many.languages);
        assert_eq!(single.languages, tiny_queue.languages);
        assert_eq!(single.total, many.total);
        assert_eq!(many.workers, 8);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let temp = tempdir().unwrap();
        create_mixed_tree(temp.path());

        let first = run(temp.path(), ScanOptions::new());
        for _ in 0..3 {
            let again = run(temp.path(), ScanOptions::new());
            assert_eq!(again.languages, first.languages);
            assert_eq!(again.walk, first.walk);
        }
    }

    #[test]
    fn test_missing_root() {
        let temp = tempdir().unwrap();
        let result = scan(temp.path().join("nope"), &ScanOptions::new());

        assert!(matches!(result, Err(PolylocError::PathNotFound(_))));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let temp = tempdir().unwrap();
        let result = scan(temp.path(), &ScanOptions::new().workers(0));

        assert!(matches!(result, Err(PolylocError::InvalidWorkers(0))));
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let temp = tempdir().unwrap();
        let result = scan(temp.path(), &ScanOptions::new().queue_capacity(0));

        assert!(matches!(result, Err(PolylocError::InvalidQueueCapacity)));
    }

    #[test]
    fn test_empty_tree() {
        let temp = tempdir().unwrap();

        let result = run(temp.path(), ScanOptions::new());

        assert!(result.languages.is_empty());
        assert_eq!(result.total, LanguageStats::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_traversal_error_aborts_without_partial_result() {
        let temp = tempdir().unwrap();
        create_mixed_tree(temp.path());
        std::os::unix::fs::symlink(temp.path().join("missing"), temp.path().join("broken.go"))
            .unwrap();

        let result = scan(temp.path(), &ScanOptions::new().workers(3));

        assert!(matches!(result, Err(PolylocError::Walk { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_traversal_error_tolerated_with_skip_policy() {
        let temp = tempdir().unwrap();
        create_basic_tree(temp.path());
        std::os::unix::fs::symlink(temp.path().join("missing"), temp.path().join("broken.go"))
            .unwrap();

        let options = ScanOptions::new().on_walk_error(WalkErrorPolicy::Skip);
        let result = run(temp.path(), options);

        assert_eq!(result.skipped.walk_errors, 1);
        assert_eq!(result.languages.get("Go").unwrap().file_count, 1);
        assert_eq!(result.languages.get("Python").unwrap().file_count, 1);
    }

    #[test]
    fn test_invalid_pattern_is_reported_not_fatal() {
        let temp = tempdir().unwrap();
        create_basic_tree(temp.path());

        let options = ScanOptions::new().filter(FilterConfig::new().exclude("[oops"));
        let result = run(temp.path(), options);

        assert_eq!(result.languages.len(), 2);
        assert_eq!(result.patterns.invalid, vec!["[oops".to_string()]);
    }
}
