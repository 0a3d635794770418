//! Template rendering for the report using outstanding

use std::time::Duration;

use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use polyloclib::{LanguageQuerySet, LanguageTable, PatternSummary, TableRow};
use serde::Serialize;

/// Include template at compile time
const REPORT_TEMPLATE: &str = include_str!("../templates/report.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Spaces between columns
const COLUMN_GAP: &str = "   ";

/// Row data for template rendering (pre-padded)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Label padded to the first column width
    label: String,
    /// Cells right-aligned to their column widths
    cells: Vec<String>,
}

/// Data context for the report template
#[derive(Debug, Serialize)]
struct ReportContext {
    title: String,
    gap: &'static str,
    header: TemplateRow,
    separator: String,
    rows: Vec<TemplateRow>,
    total: TemplateRow,
    notes: Vec<String>,
    /// Seconds, two decimals
    elapsed: String,
    /// Exclusion patterns, invalid ones flagged
    excluded: Vec<String>,
}

/// Compute the width of each column from headers, rows and footer
fn column_widths(table: &LanguageTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();

    for row in table.rows.iter().chain(std::iter::once(&table.footer)) {
        if let Some(w) = widths.first_mut() {
            *w = (*w).max(row.label.chars().count());
        }
        for (i, value) in row.values.iter().enumerate() {
            if let Some(w) = widths.get_mut(i + 1) {
                *w = (*w).max(value.chars().count());
            }
        }
    }

    widths
}

/// Pad a label and its cells: label left-aligned, cells right-aligned
fn to_template_row(label: &str, values: &[String], widths: &[usize]) -> TemplateRow {
    let label_width = widths.first().copied().unwrap_or(0);
    let cells = values
        .iter()
        .zip(widths.iter().skip(1))
        .map(|(value, width)| format!("{:>width$}", value, width = *width))
        .collect();

    TemplateRow {
        label: format!("{:<width$}", label, width = label_width),
        cells,
    }
}

fn excluded_patterns(patterns: &PatternSummary) -> Vec<String> {
    patterns
        .applied
        .iter()
        .cloned()
        .chain(
            patterns
                .invalid
                .iter()
                .map(|p| format!("{} (invalid, ignored)", p)),
        )
        .collect()
}

fn build_context(
    table: &LanguageTable,
    elapsed: Duration,
    patterns: &PatternSummary,
) -> ReportContext {
    let widths = column_widths(table);
    let separator_len =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

    let (label_header, value_headers) = match table.headers.split_first() {
        Some((first, rest)) => (first.as_str(), rest),
        None => ("", &[][..]),
    };

    ReportContext {
        title: table.title.clone(),
        gap: COLUMN_GAP,
        header: to_template_row(label_header, value_headers, &widths),
        separator: "-".repeat(separator_len),
        rows: table
            .rows
            .iter()
            .map(|row: &TableRow| to_template_row(&row.label, &row.values, &widths))
            .collect(),
        total: to_template_row(&table.footer.label, &table.footer.values, &widths),
        notes: table.notes.clone(),
        elapsed: format!("{:.2}", elapsed.as_secs_f64()),
        excluded: excluded_patterns(patterns),
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("category", Style::new().bold())
}

/// Render the report using outstanding's output mode dispatch.
///
/// JSON mode serializes the query set itself; every other mode renders the
/// table template.
pub fn render_report(
    queryset: &LanguageQuerySet,
    elapsed: Duration,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();

    let mut rendered = if matches!(output_mode, OutputMode::Json) {
        render_auto(REPORT_TEMPLATE, queryset, &theme, output_mode)?
    } else {
        let table = LanguageTable::from_queryset(queryset);
        let context = build_context(&table, elapsed, &queryset.patterns);
        render_with_output(REPORT_TEMPLATE, &context, &theme, output_mode)?
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
