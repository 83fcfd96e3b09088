//! File discovery engine
//!
//! Walks local directories (or shallow clones of GitHub repositories), prunes
//! entries by name, applies inclusion criteria, drops binary files and yields
//! the remaining text files as [`Document`]s.

// Sub-modules
pub mod directory;
pub mod filters;
pub mod scanner;
pub mod static_data;
pub mod types;

// Public API exports
pub use directory::{Traversal, TraversalOptions, traverse};
pub use filters::directory::{BinaryFilter, IgnorePatterns, IgnoreRules, InclusionCriteria};
pub use scanner::{ScanOptions, Scanner};
pub use types::{
    CandidateFile, CollectedDiagnostics, Diagnostics, Document, ScanStats, ScanSummary, Verdict, Warning,
    WarningCategory,
};
