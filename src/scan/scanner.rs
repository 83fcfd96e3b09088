//! Multi-root orchestration
//!
//! Each root is resolved (cloned when it is a GitHub URL), traversed and fed to
//! the document sink in order. A failing root is reported and skipped so its
//! siblings still run. Only a sink failure stops the whole scan.

use crate::error::ForgeError;
use crate::git::{RemoteOperations, is_github_url};
use crate::reports::DocumentSink;
use crate::scan::directory::{TraversalOptions, traverse};
use crate::scan::filters::directory::path::GITIGNORE_FILE;
use crate::scan::filters::directory::{IgnoreRules, InclusionCriteria};
use crate::scan::types::{Diagnostics, ScanStats, ScanSummary};
use std::path::Path;

/// Everything that decides which files of a root become documents
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub criteria: InclusionCriteria,
    pub traversal: TraversalOptions,
    /// Read `.gitignore` at the top of every root
    pub use_gitignore: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            criteria: InclusionCriteria::default(),
            traversal: TraversalOptions::default(),
            use_gitignore: true,
        }
    }
}

pub struct Scanner {
    options: ScanOptions,
    remote: RemoteOperations,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            remote: RemoteOperations::new(),
        }
    }

    /// Use a custom remote handler, e.g. one bound to a specific `git` executable
    pub fn with_remote(mut self, remote: RemoteOperations) -> Self {
        self.remote = remote;
        self
    }

    /// Process every root in order, framing the output with the sink's start and finish
    ///
    /// Root failures go to `diagnostics` and are counted in the summary. A write
    /// failure on the sink aborts immediately with [`ForgeError::Output`].
    pub fn scan<S: AsRef<str>>(
        &self,
        roots: &[S],
        sink: &mut dyn DocumentSink,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<ScanSummary, ForgeError> {
        sink.start()?;

        let mut summary = ScanSummary::default();
        for root in roots {
            let root = root.as_ref();
            match self.scan_root(root, sink, diagnostics) {
                Ok(stats) => {
                    tracing::info!(
                        "Processed {}: {} files emitted, {} skipped",
                        root,
                        stats.files_emitted,
                        stats.files_skipped
                    );
                    summary.roots_processed += 1;
                    summary.stats += stats;
                }
                Err(ForgeError::Output(e)) => return Err(ForgeError::Output(e)),
                Err(e) => {
                    tracing::debug!("Root {} failed: {}", root, e);
                    diagnostics.root_failed(root, &e);
                    summary.roots_failed += 1;
                }
            }
        }

        sink.finish()?;
        Ok(summary)
    }

    /// Process a single root, local or remote
    ///
    /// Documents emitted before a mid-walk failure stay written.
    pub fn scan_root(
        &self,
        root: &str,
        sink: &mut dyn DocumentSink,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<ScanStats, ForgeError> {
        if !is_github_url(root) {
            return self.scan_local(Path::new(root), sink, diagnostics);
        }

        let checkout = self.remote.clone_repository(root)?;
        let result = self.scan_local(checkout.path(), sink, diagnostics);
        let checkout_path = checkout.path().to_path_buf();
        if let Err(e) = checkout.close() {
            tracing::warn!("Failed to remove {}: {}", checkout_path.display(), e);
        }
        result
    }

    fn scan_local(
        &self,
        root: &Path,
        sink: &mut dyn DocumentSink,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<ScanStats, ForgeError> {
        if !root.exists() {
            return Err(ForgeError::PathNotFound(root.to_path_buf()));
        }

        let rules = if self.options.use_gitignore {
            IgnoreRules::from_root(root).map_err(|source| ForgeError::IgnoreFile {
                path: root.join(GITIGNORE_FILE),
                source,
            })?
        } else {
            IgnoreRules::empty()
        };

        sink.begin_root(root)?;

        let mut traversal = traverse(
            root,
            &rules,
            &self.options.criteria,
            &self.options.traversal,
            diagnostics,
        )?;
        for document in traversal.by_ref() {
            sink.write_document(&document?)?;
        }
        Ok(traversal.stats())
    }
}
