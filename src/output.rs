//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects. `--quiet` is honoured by the
//! caller simply not printing.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Auto-discovered directories: guides, manuals
//! Discovered 3 documentation entries under /srv/docs
//! Wrote dl-index/docs-manifest.json
//! ```
//!
//! ## Check
//!
//! ```text
//! Auto-discovered directories: guides, manuals
//! 001 Setup
//!     Source: guides/EN-2.1/setup
//!     Formats: PDF, HTML
//!     Updated: 2024-03-01T09:30:00Z
//! 002 Release Notes
//!     Source: manuals/release_notes
//!     Formats: HTML
//! Discovered 2 documentation entries under /srv/docs
//! ```

use std::path::Path;

use crate::entry::DocEntry;
use crate::manifest::format_timestamp;
use crate::scan::Scan;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn discovery_line(scan: &Scan) -> Option<String> {
    scan.auto_discovered
        .then(|| format!("Auto-discovered directories: {}", scan.include.join(", ")))
}

fn summary_line(scan: &Scan) -> String {
    format!(
        "Discovered {} documentation entries under {}",
        scan.entries.len(),
        scan.root.display()
    )
}

/// One entry: header line plus indented context lines.
fn entry_lines(index: usize, entry: &DocEntry) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(index), entry.title)];

    lines.push(format!("{}Source: {}", indent(1), entry.key));

    let formats: Vec<&str> = entry.formats().iter().map(|f| f.label()).collect();
    if !formats.is_empty() {
        lines.push(format!("{}Formats: {}", indent(1), formats.join(", ")));
    }
    if let Some(updated) = entry.updated.and_then(format_timestamp) {
        lines.push(format!("{}Updated: {}", indent(1), updated));
    }
    lines
}

/// Lines printed by `generate`.
pub fn format_generate_output(scan: &Scan, output_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(discovery_line(scan));
    lines.push(summary_line(scan));
    lines.push(format!("Wrote {}", output_path.display()));
    lines
}

/// Lines printed by `check`: the full entry inventory.
pub fn format_check_output(scan: &Scan) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(discovery_line(scan));
    for (i, entry) in scan.entries.iter().enumerate() {
        lines.extend(entry_lines(i + 1, entry));
    }
    lines.push(summary_line(scan));
    lines
}

pub fn print_generate_output(scan: &Scan, output_path: &Path) {
    for line in format_generate_output(scan, output_path) {
        println!("{line}");
    }
}

pub fn print_check_output(scan: &Scan) {
    for line in format_check_output(scan) {
        println!("{line}");
    }
}
