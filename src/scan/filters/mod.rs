//! Filters for candidate files
//!
//! Every filter implements [`Filter`] so the traversal can chain them and log
//! which one rejected a file.

pub mod directory;

use anyhow::Result;

/// Common trait for all filters
pub trait Filter {
    /// Input type for the filter
    type Input: ?Sized;
    /// Output type for the filter
    type Output;

    /// Apply the filter to the input
    fn filter(&self, input: &Self::Input) -> Result<Self::Output>;

    /// Get the name of this filter for debugging/logging
    fn name(&self) -> &'static str;
}

/// Decision for whether to process or skip a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Continue processing this file
    Process,
    /// Skip this file with a reason
    Skip(&'static str),
}
