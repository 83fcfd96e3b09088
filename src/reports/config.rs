//! Report format and rendering options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Xml,
    Json,
    Jsonl,
}

impl Format {
    /// Only plain text carries tree overviews and per-file summaries
    pub fn supports_dataset_mode(self) -> bool {
        matches!(self, Format::Text)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Text => "text",
            Format::Xml => "xml",
            Format::Json => "json",
            Format::Jsonl => "jsonl",
        };
        f.write_str(name)
    }
}

/// Rendering options for one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: Format,
    /// Prefix every content line with its 1-based number
    pub line_numbers: bool,
    /// Add tree overviews, summaries and file delimiters (text format only)
    pub dataset_mode: bool,
}

impl ReportOptions {
    /// Whether dataset annotations are actually rendered
    pub fn dataset_active(&self) -> bool {
        self.dataset_mode && self.format.supports_dataset_mode()
    }
}
