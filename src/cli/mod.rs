//! Command-line interface for ContextForge
//!
//! Parses arguments with clap, layers them over the loaded configuration, and
//! runs a scan that streams documents to stdout or a file.

use crate::config::ForgeConfig;
use crate::error::ForgeError;
use crate::reports::{Format, Report, ReportOptions};
use crate::scan::{IgnorePatterns, InclusionCriteria, ScanOptions, ScanSummary, Scanner, TraversalOptions};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::SystemTime;

mod output;

pub use output::Output;

/// Process and filter code from files and GitHub repositories
///
/// With --dataset-mode enabled, outputs a simplified repo tree (if the path is a
/// directory), short file summaries, and special delimiters, which helps when
/// preparing fine-tuning datasets.
#[derive(Parser, Debug)]
#[command(name = "contextforge", author, version)]
pub struct Cli {
    /// Local files, directories or GitHub repository URLs
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,

    /// Filter by file extension (e.g., -e py -e md)
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Include files and folders starting with .
    #[arg(long)]
    pub include_hidden: bool,

    /// Only ignore files matching patterns, still descend into matching directories
    #[arg(long)]
    pub ignore_files_only: bool,

    /// Ignore .gitignore files
    #[arg(long)]
    pub ignore_gitignore: bool,

    /// Glob patterns to ignore, matched against file and directory names
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Regex pattern that file paths must match
    #[arg(long, value_name = "PATTERN")]
    pub regex: Option<String>,

    /// Minimum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Maximum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Only include files modified on or after this date (YYYY-MM-DD[THH:MM:SS])
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub modified_after: Option<SystemTime>,

    /// Output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output in XML format suitable for Claude
    #[arg(short = 'c', long = "cxml")]
    pub xml: bool,

    /// Output as a JSON array
    #[arg(short, long)]
    pub json: bool,

    /// Output in JSON lines format
    #[arg(short = 'l', long)]
    pub jsonl: bool,

    /// Add line numbers to the output
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Enable tree overview, file summaries and delimiters for dataset preparation
    #[arg(long)]
    pub dataset_mode: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE", env = "CONTEXTFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Run the scan, returning its summary
    ///
    /// Validation and configuration problems are returned before any output is written.
    pub fn run(self) -> crate::Result<ScanSummary> {
        setup_logging(self.verbose, self.quiet);
        let mut output = Output::new(self.verbose > 0, self.quiet);

        let config = ForgeConfig::load_with_custom_config(self.config.as_deref())?;
        let report_options = self.report_options(&config)?;
        let scan_options = self.scan_options(&config)?;

        output.info("🔍 ContextForge - Processing files...");

        let mut report = Report::new(self.open_output()?, report_options);
        let summary = Scanner::new(scan_options).scan(&self.paths, &mut report, &mut output)?;

        output.verbose(&format!(
            "{} files written, {} skipped",
            report.documents_written(),
            summary.stats.files_skipped
        ));
        if summary.is_success() {
            output.success("✨ Processing complete!");
        } else {
            output.error(&format!(
                "{} of {} paths could not be processed",
                summary.roots_failed,
                self.paths.len()
            ));
        }
        Ok(summary)
    }

    /// Format chosen by flags, if any
    fn selected_format(&self) -> Result<Option<Format>, ForgeError> {
        let selected: Vec<Format> = [
            (self.xml, Format::Xml),
            (self.json, Format::Json),
            (self.jsonl, Format::Jsonl),
        ]
        .into_iter()
        .filter_map(|(enabled, format)| enabled.then_some(format))
        .collect();

        match selected.as_slice() {
            [] => Ok(None),
            [format] => Ok(Some(*format)),
            _ => Err(ForgeError::InvalidCriteria(
                "Cannot use multiple output formats simultaneously".to_string(),
            )),
        }
    }

    fn report_options(&self, config: &ForgeConfig) -> Result<ReportOptions, ForgeError> {
        let format = self.selected_format()?.unwrap_or(config.output.format);
        let mut dataset_mode = self.dataset_mode || config.output.dataset_mode;
        if dataset_mode && !format.supports_dataset_mode() {
            tracing::warn!("Dataset mode only applies to text output, ignoring it for {} output", format);
            dataset_mode = false;
        }

        Ok(ReportOptions {
            format,
            line_numbers: self.line_numbers || config.output.line_numbers,
            dataset_mode,
        })
    }

    fn scan_options(&self, config: &ForgeConfig) -> Result<ScanOptions, ForgeError> {
        let scan = &config.scan;

        let mut criteria = InclusionCriteria::new()
            .with_extensions(scan.extensions.iter().chain(&self.extensions))
            .with_min_size(self.min_size.or(scan.min_size))
            .with_max_size(self.max_size.or(scan.max_size))
            .with_modified_after(self.modified_after);
        if let Some(pattern) = self.regex.as_deref().or(scan.regex.as_deref()) {
            criteria = criteria.with_regex(pattern)?;
        }

        let ignore: Vec<String> = scan.ignore.iter().chain(&self.ignore_patterns).cloned().collect();

        Ok(ScanOptions {
            criteria,
            traversal: TraversalOptions {
                include_hidden: self.include_hidden || scan.include_hidden,
                ignore_files_only: self.ignore_files_only || scan.ignore_files_only,
                ignore_patterns: IgnorePatterns::new(&ignore)?,
            },
            use_gitignore: !(self.ignore_gitignore || scan.ignore_gitignore),
        })
    }

    fn open_output(&self) -> Result<Box<dyn Write>, ForgeError> {
        match &self.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    ForgeError::InvalidCriteria(format!("Cannot write to output file {}: {}", path.display(), e))
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }
}

/// Parse a local date or date-time into a point in time
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS`.
fn parse_date(value: &str) -> Result<SystemTime, String> {
    const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            format!("'{value}' does not match the formats YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS, YYYY-MM-DD HH:MM:SS")
        })?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("'{value}' does not exist in the local time zone"))?;
    Ok(local.into())
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
