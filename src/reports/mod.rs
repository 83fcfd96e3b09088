//! Output sinks for discovered documents
//!
//! A [`Report`] renders documents as plain text, an XML `<documents>` envelope,
//! a JSON array or JSON lines, optionally with line numbers or the dataset-mode
//! annotations used for LLM fine-tuning corpora.

use crate::scan::types::Document;
use std::io;
use std::path::Path;

/// Consumer of the document stream produced by a scan
pub trait DocumentSink {
    /// Called once before any root is processed
    fn start(&mut self) -> io::Result<()>;

    /// Called before traversing a directory root
    fn begin_root(&mut self, _root: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write_document(&mut self, document: &Document) -> io::Result<()>;

    /// Called once after the last root, even when some roots failed
    fn finish(&mut self) -> io::Result<()>;
}

pub use config::{Format, ReportOptions};
pub use writer::Report;

mod config;
pub mod utils;
mod writer;
