use crate::error::ForgeError;
use std::cell::OnceCell;
use std::fs::{self, Metadata};
use std::io;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

/// A file under consideration during traversal
///
/// Metadata is fetched at most once and only when a filter asks for it, so the
/// cheap name-based checks never touch the filesystem.
#[derive(Debug)]
pub struct CandidateFile {
    path: PathBuf,
    metadata: OnceCell<Metadata>,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metadata: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment, lossily converted
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Stat the file (following symlinks), caching a successful result
    pub fn metadata(&self) -> io::Result<&Metadata> {
        if let Some(metadata) = self.metadata.get() {
            return Ok(metadata);
        }
        let metadata = fs::metadata(&self.path)?;
        Ok(self.metadata.get_or_init(|| metadata))
    }

    /// Read the whole file as UTF-8 text
    ///
    /// Returns `Ok(None)` when the bytes are not valid UTF-8.
    pub fn read_text(&self) -> io::Result<Option<String>> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8(bytes).ok())
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// A text file admitted by every filter, ready for the output sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub content: String,
}

/// Outcome of binary classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Text,
    Binary,
}

impl Verdict {
    pub fn is_binary(self) -> bool {
        matches!(self, Verdict::Binary)
    }
}

/// Why a file was skipped with a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    /// The classifier could not read the file; it was treated as binary
    ReadFailed,
    /// The content is not valid UTF-8 text
    NotUtf8,
    /// The file could not be stat'ed
    MetadataUnavailable,
}

/// Out-of-band warning produced during traversal
#[derive(Debug, Clone)]
pub struct Warning {
    pub path: PathBuf,
    pub category: WarningCategory,
    pub message: String,
}

/// Receiver for diagnostics, kept separate from the document stream
pub trait Diagnostics {
    /// A single file was skipped because of an error
    fn warning(&mut self, warning: Warning);

    /// A whole root could not be processed
    fn root_failed(&mut self, root: &str, error: &ForgeError);
}

/// In-memory diagnostics collector
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub warnings: Vec<Warning>,
    pub failures: Vec<String>,
}

impl Diagnostics for CollectedDiagnostics {
    fn warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    fn root_failed(&mut self, _root: &str, error: &ForgeError) {
        self.failures.push(error.to_string());
    }
}

/// Statistics for a single root
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files_emitted: usize,
    pub files_skipped: usize,
}

impl AddAssign for ScanStats {
    fn add_assign(&mut self, other: Self) {
        self.files_emitted += other.files_emitted;
        self.files_skipped += other.files_skipped;
    }
}

/// Result of processing every root in one invocation
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub roots_processed: usize,
    pub roots_failed: usize,
    pub stats: ScanStats,
}

impl ScanSummary {
    pub fn is_success(&self) -> bool {
        self.roots_failed == 0
    }
}
