//! Report formatting and printing.
//!
//! Summaries go to stdout; failures and warnings go to stderr. In stdin mode
//! stdout carries only the filtered CSS.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, FileOutcome, InitSummary, StreamSummary, StripSummary,
};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

pub fn print_to<O: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Strip(summary) => print_strip(summary, verbose, out, err),
        CommandSummary::Stream(summary) => print_stream(summary, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn print_strip<O: Write, E: Write>(
    summary: &StripSummary,
    verbose: bool,
    out: &mut O,
    err: &mut E,
) {
    for outcome in &summary.files {
        print_failure(outcome, err);
    }

    for (path, stats) in summary.changed_files() {
        let _ = writeln!(
            out,
            "  {} {}",
            path.display(),
            format!("({})", plural(stats.removed, "comment")).dimmed()
        );
    }

    let changed = summary.changed_files().count();
    let removed = summary.removed_count();
    if changed == 0 {
        let checked = summary.files.iter().filter(|f| !f.is_failed()).count();
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} - no comments to remove",
                plural(checked, "stylesheet")
            )
            .green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Removed {} from {}",
                plural(removed, "comment"),
                plural(changed, "file")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            out,
            "{} {} from {} (run with {} to rewrite)",
            "Would remove".bold(),
            plural(removed, "comment"),
            plural(changed, "file"),
            "--apply".cyan()
        );
    }

    if summary.skipped_count > 0 && !verbose {
        let _ = writeln!(
            err,
            "{} {} could not be accessed (use {} for details)",
            "warning:".bold().yellow(),
            plural(summary.skipped_count, "path"),
            "-v".cyan()
        );
    }
}

fn print_stream<O: Write, E: Write>(summary: &StreamSummary, out: &mut O, err: &mut E) {
    match &summary.output {
        Some(css) => {
            let _ = out.write_all(css.as_bytes());
        }
        None => print_failure(&summary.outcome, err),
    }
}

fn print_init<O: Write, E: Write>(summary: &InitSummary, out: &mut O, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            "Error:".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

fn print_failure<E: Write>(outcome: &FileOutcome, err: &mut E) {
    if let FileOutcome::Failed { path, error } = outcome {
        let _ = writeln!(
            err,
            "{} {}: {}",
            FAILURE_MARK.red(),
            path.display().to_string().bold(),
            error
        );
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

// ============================================================
// Tests
// ============================================================
