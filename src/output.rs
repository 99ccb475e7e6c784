//! CLI output formatting for a rewrite run.
//!
//! # Output Format
//!
//! ```text
//! Site root: /home/colin/site
//! Found 42 HTML files to process
//! Read 42 files
//!
//!   OK  index.html
//!   OK  headaches/index.html
//!
//! Done: 2 modified out of 42 files
//! ```
//!
//! In check mode each line reads `WOULD` instead of `OK` and the summary says
//! how many files would change.
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and, where it is printed, a `print_*` wrapper that writes to
//! stdout. Format functions are pure: no I/O, no side effects. Diagnostics
//! (skipped pages, unreadable files) go through `tracing` instead.

use crate::modernize::{RunMode, RunSummary};
use std::path::Path;

/// Header lines printed once discovery has finished.
pub fn format_discovery(root: &Path, found: usize) -> Vec<String> {
    vec![
        format!("Site root: {}", root.display()),
        format!("Found {} HTML files to process", found),
    ]
}

/// Line printed after the snapshot pass.
pub fn format_snapshot(read: usize) -> Vec<String> {
    vec![format!("Read {} files", read), String::new()]
}

/// One line per rewritten (or, in check mode, rewritable) page.
pub fn format_modified(rel_path: &str, mode: RunMode) -> String {
    let marker = match mode {
        RunMode::Run => "OK",
        RunMode::Check => "WOULD",
    };
    format!("  {}  {}", marker, rel_path)
}

/// Lines printed when the sample page is already modernized.
pub fn format_restore_notice(mode: RunMode) -> Vec<String> {
    match mode {
        RunMode::Run => vec![
            String::new(),
            "Files already modernized. Restoring originals from git first...".to_string(),
        ],
        RunMode::Check => vec![
            String::new(),
            "Files already modernized. A run would restore originals from git first."
                .to_string(),
        ],
    }
}

/// Final summary.
pub fn format_summary(summary: &RunSummary, mode: RunMode) -> Vec<String> {
    let skipped = summary.not_legacy + summary.missing_content + summary.unreadable;
    let mut lines = vec![String::new()];
    match mode {
        RunMode::Run => lines.push(format!(
            "Done: {} modified out of {} files",
            summary.modified, summary.found
        )),
        RunMode::Check => lines.push(format!(
            "Check: {} of {} files would be modified",
            summary.modified, summary.found
        )),
    }
    if skipped > 0 {
        lines.push(format!(
            "Skipped: {} not Sandvox, {} without content, {} unreadable",
            summary.not_legacy, summary.missing_content, summary.unreadable
        ));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
