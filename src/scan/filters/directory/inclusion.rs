//! Admission test combining extension, regex, size and modification-time criteria

use crate::error::ForgeError;
use crate::scan::filters::{Filter, FilterDecision};
use crate::scan::types::CandidateFile;
use anyhow::Result;
use regex::Regex;
use std::time::SystemTime;

/// Immutable bundle of inclusion criteria
///
/// Every criterion is optional and absent criteria always pass. Present criteria
/// are ANDed and checked cheapest first, so files rejected by name are never stat'ed.
#[derive(Debug, Clone, Default)]
pub struct InclusionCriteria {
    extensions: Vec<String>,
    regex: Option<Regex>,
    min_size: Option<u64>,
    max_size: Option<u64>,
    modified_after: Option<SystemTime>,
}

impl InclusionCriteria {
    /// Criteria that admit every readable file
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only files whose name ends with `.ext` for one of `extensions`
    ///
    /// A leading dot on an extension is tolerated. An empty list accepts everything.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{ext}"))
            .collect();
        self
    }

    /// Require a match of `pattern` anywhere in the full path string
    pub fn with_regex(mut self, pattern: &str) -> Result<Self, ForgeError> {
        let regex = Regex::new(pattern)
            .map_err(|_| ForgeError::InvalidCriteria(format!("Invalid regex pattern: {pattern}")))?;
        self.regex = Some(regex);
        Ok(self)
    }

    /// Inclusive lower size bound in bytes
    pub fn with_min_size(mut self, min_size: Option<u64>) -> Self {
        self.min_size = min_size;
        self
    }

    /// Inclusive upper size bound in bytes
    pub fn with_max_size(mut self, max_size: Option<u64>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Reject files last modified strictly before `threshold`
    pub fn with_modified_after(mut self, threshold: Option<SystemTime>) -> Self {
        self.modified_after = threshold;
        self
    }

    /// Convenience wrapper: true only when the file passes every configured check
    ///
    /// A file that cannot be stat'ed is not admitted.
    pub fn admits(&self, candidate: &CandidateFile) -> bool {
        matches!(self.filter(candidate), Ok(FilterDecision::Process))
    }

    fn matches_extension(&self, candidate: &CandidateFile) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let name = candidate.file_name();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn matches_regex(&self, candidate: &CandidateFile) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(&candidate.path().to_string_lossy()),
            None => true,
        }
    }

    fn needs_metadata(&self) -> bool {
        self.min_size.is_some() || self.max_size.is_some() || self.modified_after.is_some()
    }
}

impl Filter for InclusionCriteria {
    type Input = CandidateFile;
    type Output = FilterDecision;

    /// Returns an error only when the file could not be stat'ed
    fn filter(&self, candidate: &CandidateFile) -> Result<FilterDecision> {
        if !self.matches_extension(candidate) {
            return Ok(FilterDecision::Skip("extension not selected"));
        }
        if !self.matches_regex(candidate) {
            return Ok(FilterDecision::Skip("path does not match regex"));
        }

        // Always stat, even without size/time criteria, so vanished files are dropped here
        let metadata = candidate.metadata()?;
        if !self.needs_metadata() {
            return Ok(FilterDecision::Process);
        }

        let size = metadata.len();
        if self.min_size.is_some_and(|min| size < min) {
            return Ok(FilterDecision::Skip("smaller than minimum size"));
        }
        if self.max_size.is_some_and(|max| size > max) {
            return Ok(FilterDecision::Skip("larger than maximum size"));
        }

        if let Some(threshold) = self.modified_after {
            let modified = metadata.modified()?;
            if modified < threshold {
                return Ok(FilterDecision::Skip("modified before threshold"));
            }
        }

        Ok(FilterDecision::Process)
    }

    fn name(&self) -> &'static str {
        "InclusionFilter"
    }
}
