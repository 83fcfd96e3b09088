//! Binary file filtering

use crate::scan::filters::Filter;
use crate::scan::static_data::{is_binary_extension, matches_signature};
use crate::scan::types::{CandidateFile, Diagnostics, Verdict, Warning, WarningCategory};
use anyhow::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Maximum number of bytes read for classification
pub const READ_LIMIT: u64 = 8192;
/// Number of leading bytes inspected by the statistical heuristic
pub const SAMPLE_SIZE: usize = 1024;
/// Fraction of non-text bytes above which a sample counts as binary
pub const NON_TEXT_THRESHOLD: f64 = 0.30;

/// Classify files as text or binary
///
/// Checks run cheapest first: known binary extension, then magic-number
/// signatures on the first 8 KiB, then a NUL / non-text byte ratio over the
/// first 1 KiB. Empty files are always text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFilter;

impl BinaryFilter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a file, treating unreadable files as binary
    ///
    /// Never fails: a read error is reported to `diagnostics` and yields [`Verdict::Binary`].
    pub fn classify(&self, candidate: &CandidateFile, diagnostics: &mut dyn Diagnostics) -> Verdict {
        match self.filter(candidate) {
            Ok(verdict) => verdict,
            Err(e) => {
                let path = candidate.path();
                tracing::debug!("Error reading {}: {}", path.display(), e);
                diagnostics.warning(Warning {
                    path: path.to_path_buf(),
                    category: WarningCategory::ReadFailed,
                    message: format!("Error reading {}: {}", path.display(), e),
                });
                Verdict::Binary
            }
        }
    }

    /// Read up to [`READ_LIMIT`] bytes from the start of `path`
    fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut header = Vec::with_capacity(READ_LIMIT as usize);
        file.take(READ_LIMIT).read_to_end(&mut header)?;
        Ok(header)
    }
}

impl Filter for BinaryFilter {
    type Input = CandidateFile;
    type Output = Verdict;

    fn filter(&self, candidate: &CandidateFile) -> Result<Verdict> {
        let path = candidate.path();
        if is_binary_extension(path) {
            return Ok(Verdict::Binary);
        }

        let header = Self::read_header(path)?;
        if header.is_empty() {
            return Ok(Verdict::Text);
        }
        if let Some(format) = matches_signature(&header) {
            tracing::trace!("{} has a {} signature", path.display(), format);
            return Ok(Verdict::Binary);
        }

        Ok(classify_content(&header))
    }

    fn name(&self) -> &'static str {
        "BinaryFilter"
    }
}

/// Statistical classification of a content sample
///
/// Any NUL byte in the first [`SAMPLE_SIZE`] bytes means binary. Otherwise the
/// sample is binary when more than 30% of its bytes are control characters other
/// than newline, carriage return, tab, form feed and backspace. Bytes `0x80..=0xFF`
/// count as text so UTF-8 and legacy 8-bit encodings pass.
pub fn classify_content(content: &[u8]) -> Verdict {
    let sample = &content[..content.len().min(SAMPLE_SIZE)];
    if sample.is_empty() {
        return Verdict::Text;
    }
    if sample.contains(&0) {
        return Verdict::Binary;
    }

    let non_text = sample.iter().filter(|&&byte| !is_text_byte(byte)).count();
    if non_text as f64 / sample.len() as f64 > NON_TEXT_THRESHOLD {
        Verdict::Binary
    } else {
        Verdict::Text
    }
}

fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | 0x80..=0xFF | b'\n' | b'\r' | b'\t' | 0x0C | 0x08)
}
