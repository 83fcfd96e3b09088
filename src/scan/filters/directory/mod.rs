//! File-level filters, applied before any content is emitted
//!
//! ## Filter Hierarchy
//!
//! 1. **Path Filter** - hidden entries, `.gitignore` rules and ad-hoc ignore globs.
//!    Works on names only and prunes whole directories.
//! 2. **Inclusion Filter** - extension, regex, size bounds and modification time.
//!    Stats the file at most once.
//! 3. **Binary Filter** - extension fast path, magic numbers, then a byte-ratio
//!    heuristic over at most 8 KiB of content.

pub mod binary;
pub mod inclusion;
pub mod path;

pub use binary::BinaryFilter;
pub use inclusion::InclusionCriteria;
pub use path::{IgnorePatterns, IgnoreRules};
