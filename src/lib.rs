//! # ContextForge - Collect source files into LLM-ready context
//!
//! ContextForge walks local paths or shallow clones of GitHub repositories,
//! applies `.gitignore` rules, name globs, extension, regex, size and date
//! filters, skips binary files, and streams the remaining text files as plain
//! text, XML documents, JSON or JSON lines.
//!
//! ## Quick Start
//!
//! ```bash
//! # Every Python and Markdown file under src/, as XML for a prompt
//! contextforge src -e py -e md --cxml
//!
//! # A remote repository as JSON lines, written to a file
//! contextforge https://github.com/owner/repo --jsonl -o repo.jsonl
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use contextforge::reports::{Report, ReportOptions};
//! use contextforge::scan::{CollectedDiagnostics, ScanOptions, Scanner};
//!
//! let mut report = Report::new(std::io::stdout(), ReportOptions::default());
//! let mut diagnostics = CollectedDiagnostics::default();
//! let summary = Scanner::new(ScanOptions::default())
//!     .scan(&["."], &mut report, &mut diagnostics)?;
//! assert!(summary.is_success());
//! # Ok::<(), contextforge::error::ForgeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod reports;
pub mod scan;

pub use cli::{Cli, Output};
pub use config::ForgeConfig;
pub use error::ForgeError;

/// Result type alias for ContextForge operations
pub type Result<T> = anyhow::Result<T>;
