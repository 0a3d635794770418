//! # polyloc
//!
//! A CLI tool for counting lines of code per language across a directory tree.
//!
//! ## Overview
//!
//! polyloc is built on top of polyloclib and provides a command-line interface
//! for its concurrent scan pipeline: one walker feeding a bounded queue, a
//! fixed pool of worker threads counting files, and a per-language report
//! once every worker has finished.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! polyloc
//!
//! # Exclude patterns (comma-separated, matched against file names)
//! polyloc ~/src --exclude "*.json, *_test.go"
//!
//! # Prune directories by name
//! polyloc . --skip-dir node_modules --skip-dir target
//!
//! # Sort by line count, largest first
//! polyloc . --sort lines --order desc
//!
//! # Output as JSON
//! polyloc . --output json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::anyhow;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use polyloclib::{
    scan, FilterConfig, LanguageQuerySet, OrderBy, OrderDirection, Ordering, ScanOptions,
    WalkErrorPolicy, DEFAULT_QUEUE_CAPACITY,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod render;

use render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("polyloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent lines of code counter, grouped by language")
        .arg(
            Arg::new("path")
                .help("Directory to scan (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Comma-separated file name patterns to exclude (e.g. '*.json, *.yml')"),
        )
        .arg(
            Arg::new("skip-dir")
                .short('s')
                .long("skip-dir")
                .action(ArgAction::Append)
                .help("Do not descend into directories with this name (can be repeated)"),
        )
        .arg(
            Arg::new("workers")
                .short('j')
                .long("workers")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads (defaults to available CPUs)"),
        )
        .arg(
            Arg::new("queue-size")
                .long("queue-size")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_QUEUE_CAPACITY.to_string())
                .help("Capacity of the file queue between walker and workers"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_parser(["name", "files", "lines", "size"])
                .default_value("name")
                .help("Sort field"),
        )
        .arg(
            Arg::new("order")
                .long("order")
                .value_parser(["asc", "desc"])
                .default_value("asc")
                .help("Sort direction"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .action(ArgAction::SetTrue)
                .help("Skip unreadable directory entries instead of aborting"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr"),
        )
}

/// Split comma-separated exclude lists, trimming each piece and dropping blanks
fn split_patterns(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("exclude")
        .map(|lists| {
            lists
                .flat_map(|list| list.split(','))
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> FilterConfig {
    let skip_dirs: Vec<String> = matches
        .get_many::<String>("skip-dir")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    FilterConfig::new()
        .exclude_many(&split_patterns(matches))
        .skip_dirs(&skip_dirs)
}

/// Build scan options from matches
fn build_options(matches: &ArgMatches) -> ScanOptions {
    let mut options = ScanOptions::new().filter(build_filter(matches));

    if let Some(workers) = matches.get_one::<usize>("workers") {
        options = options.workers(*workers);
    }
    if let Some(capacity) = matches.get_one::<usize>("queue-size") {
        options = options.queue_capacity(*capacity);
    }
    if matches.get_flag("keep-going") {
        options = options.on_walk_error(WalkErrorPolicy::Skip);
    }

    options
}

/// Extract ordering from matches
fn extract_ordering(matches: &ArgMatches) -> Result<Ordering, anyhow::Error> {
    let by = matches
        .get_one::<String>("sort")
        .map(|s| OrderBy::from_str(s))
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    let direction = matches
        .get_one::<String>("order")
        .map(|s| OrderDirection::from_str(s))
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    Ok(Ordering { by, direction })
}

/// Map `--output` onto an outstanding output mode
fn extract_output_mode(matches: &ArgMatches) -> OutputMode {
    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Auto,
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run the scan and render its report
fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let root = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
    let options = build_options(matches);
    let ordering = extract_ordering(matches)?;

    let result = scan(&root, &options)?;
    let queryset = LanguageQuerySet::from_result(&result, ordering);

    let output_mode = extract_output_mode(matches);
    render::render_report(&queryset, result.elapsed, output_mode)
        .map_err(|e| anyhow!("failed to render report: {e}"))
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    setup_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
