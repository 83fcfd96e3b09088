use crate::error::ForgeError;
use crate::scan::filters::directory::{BinaryFilter, IgnorePatterns, IgnoreRules, InclusionCriteria};
use crate::scan::filters::{Filter, FilterDecision};
use crate::scan::types::{CandidateFile, Diagnostics, Document, ScanStats, Warning, WarningCategory};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name-level traversal switches
#[derive(Debug, Clone, Default)]
pub struct TraversalOptions {
    /// Keep entries whose name starts with `.`
    pub include_hidden: bool,
    /// Apply ignore rules and patterns to files only, still descending into matching directories
    pub ignore_files_only: bool,
    /// Ad-hoc globs matched against bare entry names
    pub ignore_patterns: IgnorePatterns,
}

/// Lazy, single-pass sequence of the text documents under one root
///
/// Each item is produced only when requested, so nothing beyond the current file
/// is held in memory. File-level problems are reported to the diagnostics sink and
/// skipped. A walk error is yielded once as `Err` and ends the sequence.
pub struct Traversal<'a> {
    root: PathBuf,
    state: State<'a>,
    criteria: &'a InclusionCriteria,
    binary: BinaryFilter,
    diagnostics: &'a mut dyn Diagnostics,
    stats: ScanStats,
}

enum State<'a> {
    Single(Option<PathBuf>),
    Walk(Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>),
    Done,
}

/// Start traversing `root`
///
/// A file root is tested on its own. A directory root is walked depth-first: in
/// every directory, entries are pruned by name (hidden marker first, then ignore
/// rules, then ad-hoc patterns), files are visited in name order, and
/// subdirectories are descended afterwards, also in name order.
pub fn traverse<'a>(
    root: &Path,
    rules: &'a IgnoreRules,
    criteria: &'a InclusionCriteria,
    options: &'a TraversalOptions,
    diagnostics: &'a mut dyn Diagnostics,
) -> Result<Traversal<'a>, ForgeError> {
    if !root.exists() {
        return Err(ForgeError::PathNotFound(root.to_path_buf()));
    }

    let state = if root.is_file() {
        State::Single(Some(root.to_path_buf()))
    } else {
        let walker = WalkDir::new(root)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(move |entry| keep_entry(entry, rules, options));
        State::Walk(Box::new(walker))
    };

    tracing::debug!("Traversing {}", root.display());
    Ok(Traversal {
        root: root.to_path_buf(),
        state,
        criteria,
        binary: BinaryFilter::new(),
        diagnostics,
        stats: ScanStats::default(),
    })
}

/// Decide whether a walk entry survives name-based pruning
///
/// The root itself is never pruned. Rejected directories are not descended.
fn keep_entry(entry: &DirEntry, rules: &IgnoreRules, options: &TraversalOptions) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if !options.include_hidden && name.starts_with('.') {
        tracing::trace!("Skipping hidden entry {}", entry.path().display());
        return false;
    }

    let is_dir = entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir());
    if is_dir && options.ignore_files_only {
        return true;
    }

    if rules.matches_name(&name, is_dir) {
        tracing::trace!("Ignore rule matched {}", entry.path().display());
        return false;
    }
    if options.ignore_patterns.matches_name(&name) {
        tracing::trace!("Ignore pattern matched {}", entry.path().display());
        return false;
    }

    true
}

impl Traversal<'_> {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Counters for the files seen so far
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn skip(&mut self, candidate: &CandidateFile, category: WarningCategory, message: String) {
        tracing::debug!("{}", message);
        self.stats.files_skipped += 1;
        self.diagnostics.warning(Warning {
            path: candidate.path().to_path_buf(),
            category,
            message,
        });
    }

    /// Run one file through inclusion, classification and decoding
    fn process(&mut self, candidate: CandidateFile) -> Option<Document> {
        match self.criteria.filter(&candidate) {
            Ok(FilterDecision::Process) => {}
            Ok(FilterDecision::Skip(reason)) => {
                tracing::trace!("{} rejected {}: {}", self.criteria.name(), candidate.path().display(), reason);
                self.stats.files_skipped += 1;
                return None;
            }
            Err(e) => {
                let message = format!("Cannot stat {}: {}", candidate.path().display(), e);
                self.skip(&candidate, WarningCategory::MetadataUnavailable, message);
                return None;
            }
        }

        if self.binary.classify(&candidate, &mut *self.diagnostics).is_binary() {
            tracing::debug!("Skipping binary file {}", candidate.path().display());
            self.stats.files_skipped += 1;
            return None;
        }

        match candidate.read_text() {
            Ok(Some(content)) => {
                self.stats.files_emitted += 1;
                Some(Document {
                    path: candidate.into_path().to_string_lossy().into_owned(),
                    content,
                })
            }
            Ok(None) => {
                let message = format!("Skipping {}: content is not valid UTF-8", candidate.path().display());
                self.skip(&candidate, WarningCategory::NotUtf8, message);
                None
            }
            Err(e) => {
                let message = format!("Error reading {}: {}", candidate.path().display(), e);
                self.skip(&candidate, WarningCategory::ReadFailed, message);
                None
            }
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = Result<Document, ForgeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = match &mut self.state {
                State::Done => return None,
                State::Single(path) => match path.take() {
                    Some(path) => path,
                    None => {
                        self.state = State::Done;
                        return None;
                    }
                },
                State::Walk(walker) => match walker.next() {
                    None => {
                        self.state = State::Done;
                        return None;
                    }
                    Some(Err(source)) => {
                        self.state = State::Done;
                        return Some(Err(ForgeError::Walk {
                            path: self.root.clone(),
                            source,
                        }));
                    }
                    Some(Ok(entry)) => {
                        // Directories are only walked; symlinks to directories are neither walked nor read
                        if entry.file_type().is_dir() || !entry.path().is_file() {
                            continue;
                        }
                        entry.into_path()
                    }
                },
            };

            if let Some(document) = self.process(CandidateFile::new(path)) {
                return Some(Ok(document));
            }
        }
    }
}
