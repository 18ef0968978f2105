//! Report formatting and printing utilities.
//!
//! Route tables go to stdout. Issues are printed to stderr in cargo-style
//! format, so `routes --json` output stays machine-readable.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::RouteView,
    commands::{CommandResult, CommandSummary, InitSummary, RoutesSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{RouteObject, RouteTable};
use crate::issues::{Issue, Report, Rule, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a writer, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success line after the route table.
pub fn print_success_to<W: Write>(route_count: usize, source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Collected {} {} from {} source {}",
            route_count,
            if route_count == 1 { "route" } else { "routes" },
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

/// Nested route objects with box-drawing connectors.
pub fn render_tree_to<W: Write>(routes: &[RouteObject], writer: &mut W) {
    for route in routes {
        let _ = writeln!(writer, "{}", route_label(route));
        render_children(&route.children, "", writer);
    }
}

fn render_children<W: Write>(routes: &[RouteObject], prefix: &str, writer: &mut W) {
    for (i, route) in routes.iter().enumerate() {
        let last = i + 1 == routes.len();
        let connector = if last { "└── " } else { "├── " };
        let _ = writeln!(
            writer,
            "{}{}{}",
            prefix,
            connector.dimmed(),
            route_label(route)
        );
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(&route.children, &child_prefix, writer);
    }
}

fn route_label(route: &RouteObject) -> String {
    let mut label = format!("{}  {}", route.path.bold(), route.route_ref.id().cyan());
    if let Some(title) = route.route_ref.title() {
        label.push_str(&format!(" {}", format!("({})", title).dimmed()));
    }
    if route.case_sensitive {
        label.push_str(&format!(" {}", "[case-sensitive]".dimmed()));
    }
    label
}

/// Route ref ids and full paths, aligned.
pub fn render_paths_to<W: Write>(table: &RouteTable, writer: &mut W) {
    let rows: Vec<(&str, String)> = table
        .paths
        .keys()
        .map(|route_ref| {
            let full = table.full_path(route_ref).unwrap_or_default();
            (route_ref.id(), full)
        })
        .collect();
    render_columns(&rows, writer);
}

/// Route ref ids and their parent ids, aligned. Top-level routes show `-`.
pub fn render_parents_to<W: Write>(table: &RouteTable, writer: &mut W) {
    let rows: Vec<(&str, String)> = table
        .parents
        .iter()
        .map(|(route_ref, parent)| {
            let parent = parent
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.id().to_string());
            (route_ref.id(), parent)
        })
        .collect();
    render_columns(&rows, writer);
}

fn render_columns<W: Write>(rows: &[(&str, String)], writer: &mut W) {
    let width = rows
        .iter()
        .map(|(left, _)| UnicodeWidthStr::width(*left))
        .max()
        .unwrap_or(0);
    for (left, right) in rows {
        let padding = width - UnicodeWidthStr::width(*left);
        let _ = writeln!(
            writer,
            "{}{}  {}",
            left.cyan(),
            " ".repeat(padding),
            right
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let location = issue.location();
    let (file_path, line, col) = location.parts();
    if !file_path.is_empty() {
        if line > 0 {
            let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
        } else {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    a_loc
        .parts()
        .cmp(&b_loc.parts())
        .then_with(|| a.report_rule().cmp(&b.report_rule()))
}

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    let stderr = &mut io::stderr().lock();

    match &result.summary {
        CommandSummary::Routes(summary) => print_routes(result, summary, verbose, stdout, stderr),
        CommandSummary::Init(summary) => print_init(summary, stdout),
    }
}

fn print_routes<O: Write, E: Write>(
    result: &CommandResult,
    summary: &RoutesSummary,
    verbose: bool,
    stdout: &mut O,
    stderr: &mut E,
) {
    // Without -v, parse failures are folded into a single line.
    let shown: Vec<Issue> = result
        .issues
        .iter()
        .filter(|issue| verbose || issue.rule() != Rule::ParseError)
        .cloned()
        .collect();
    report_to(&shown, stderr);
    print_parse_warning_to(result.parse_error_count, verbose, stderr);

    let Some(table) = &summary.table else {
        return;
    };

    if summary.json {
        match serde_json::to_string_pretty(table) {
            Ok(json) => {
                let _ = writeln!(stdout, "{}", json);
            }
            Err(e) => {
                let _ = writeln!(stderr, "{} {}", "error:".bold().red(), e);
            }
        }
        return;
    }

    match summary.view {
        RouteView::Tree => render_tree_to(&table.routes, stdout),
        RouteView::Paths => render_paths_to(table, stdout),
        RouteView::Parents => render_parents_to(table, stdout),
    }
    if summary.filter.is_none() {
        print_success_to(table.len(), result.source_files_checked, stdout);
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
