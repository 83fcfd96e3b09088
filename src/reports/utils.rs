//! Common utilities for report generation

use std::cmp::Ordering;
use std::io::{self, Write};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Maximum number of characters of the first non-blank line shown in a summary
pub const SNIPPET_LENGTH: usize = 60;
/// Subdirectories with at least this many entries are not expanded in the tree overview
pub const TREE_COLLAPSE_THRESHOLD: usize = 50;
/// Deepest level listed by the tree overview, the root being level 0
pub const TREE_MAX_DEPTH: usize = 1;

/// Split `content` into lines ending at `\n`, `\r\n` or a lone `\r`
///
/// Terminators are not kept and a trailing terminator does not start an empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(end) => {
                lines.push(&rest[..end]);
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Prefix every line with its right-aligned 1-based number and two spaces
///
/// Numbers are padded to the width of the line count. Lines are rejoined with
/// `\n`, and a trailing newline is not preserved.
pub fn add_line_numbers(content: &str) -> String {
    let lines = split_lines(content);
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}  {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line dataset-mode summary of a document
pub fn file_summary(path: &str, content: &str) -> String {
    let lines = split_lines(content);
    let mut summary = format!("[SUMMARY] {} | {} bytes | {} lines", path, content.len(), lines.len());
    if let Some(line) = lines.into_iter().map(str::trim).find(|line| !line.is_empty()) {
        let snippet: String = line.chars().take(SNIPPET_LENGTH).collect();
        summary.push_str(" | snippet: ");
        summary.push_str(&snippet);
    }
    summary
}

/// Write the dataset-mode tree overview of a directory root
///
/// Lists directories before files at every level, both sorted by name, down to
/// [`TREE_MAX_DEPTH`]. Hidden and ignored entries are listed too.
pub fn write_repo_tree(writer: &mut dyn Write, base: &Path) -> io::Result<()> {
    writer.write_all(b"\n[DATASET-MODE] Repository Tree Overview\n")?;
    writer.write_all(b"----------------------------------------\n")?;

    let mut entries = WalkDir::new(base)
        .min_depth(1)
        .max_depth(TREE_MAX_DEPTH + 1)
        .sort_by(directories_first)
        .into_iter();
    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping entry in the tree overview of {}: {}", base.display(), e);
                continue;
            }
        };

        let indent = "  ".repeat(entry.depth() - 1);
        let relative = entry.path().strip_prefix(base).unwrap_or(entry.path()).to_string_lossy();
        if !entry.path().is_dir() {
            writeln!(writer, "{indent}📄 {relative}")?;
            continue;
        }

        writeln!(writer, "{indent}📂 {relative}/")?;
        let entry_count = WalkDir::new(entry.path()).min_depth(1).max_depth(1).into_iter().count();
        if entry_count >= TREE_COLLAPSE_THRESHOLD {
            writeln!(writer, "{indent}  (... {entry_count} items omitted ...)")?;
            entries.skip_current_dir();
        }
    }
    writer.write_all(b"\n")
}

fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.path()
        .is_dir()
        .cmp(&a.path().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
