//! Streaming report writer

use super::utils::{add_line_numbers, file_summary, write_repo_tree};
use super::{DocumentSink, Format, ReportOptions};
use crate::scan::types::Document;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

#[derive(Serialize)]
struct JsonDocument<'a> {
    path: &'a str,
    content: &'a str,
}

/// Document sink that renders every document as soon as it arrives
///
/// The XML index and the JSON separator state belong to this value, so two
/// reports in the same process never share numbering.
pub struct Report<W: Write> {
    writer: W,
    options: ReportOptions,
    document_index: usize,
    first_entry: bool,
}

impl<W: Write> Report<W> {
    pub fn new(writer: W, options: ReportOptions) -> Self {
        Self {
            writer,
            options,
            document_index: 1,
            first_entry: true,
        }
    }

    /// Number of documents written so far
    pub fn documents_written(&self) -> usize {
        self.document_index - 1
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_text(&mut self, path: &str, content: &str) -> io::Result<()> {
        if self.options.dataset_active() {
            write!(self.writer, "\n===== FILE BEGIN: {path} =====\n")?;
            self.writer.write_all(content.as_bytes())?;
            write!(self.writer, "\n===== FILE END: {path} =====\n\n")
        } else {
            write!(self.writer, "{path}\n---\n")?;
            self.writer.write_all(content.as_bytes())?;
            self.writer.write_all(b"\n\n---\n\n")
        }
    }

    fn write_xml(&mut self, path: &str, content: &str) -> io::Result<()> {
        writeln!(self.writer, "<document index=\"{}\">", self.document_index)?;
        writeln!(self.writer, "<source>{path}</source>")?;
        self.writer.write_all(b"<document_content>\n")?;
        self.writer.write_all(content.as_bytes())?;
        self.writer.write_all(b"\n</document_content>\n</document>\n")
    }

    fn write_json(&mut self, path: &str, content: &str) -> io::Result<()> {
        if !self.first_entry {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut self.writer, &JsonDocument { path, content })?;
        Ok(())
    }

    fn write_jsonl(&mut self, path: &str, content: &str) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &JsonDocument { path, content })?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> DocumentSink for Report<W> {
    fn start(&mut self) -> io::Result<()> {
        match self.options.format {
            Format::Xml => self.writer.write_all(b"<documents>\n"),
            Format::Json => self.writer.write_all(b"[\n"),
            Format::Text | Format::Jsonl => Ok(()),
        }
    }

    fn begin_root(&mut self, root: &Path) -> io::Result<()> {
        if self.options.dataset_active() && root.is_dir() {
            write_repo_tree(&mut self.writer, root)?;
        }
        Ok(())
    }

    fn write_document(&mut self, document: &Document) -> io::Result<()> {
        let path = document.path.as_str();
        let content: Cow<'_, str> = if self.options.line_numbers {
            Cow::Owned(add_line_numbers(&document.content))
        } else {
            Cow::Borrowed(document.content.as_str())
        };

        if self.options.dataset_active() {
            writeln!(self.writer, "{}", file_summary(path, &document.content))?;
        }

        match self.options.format {
            Format::Text => self.write_text(path, &content)?,
            Format::Xml => self.write_xml(path, &content)?,
            Format::Json => self.write_json(path, &content)?,
            Format::Jsonl => self.write_jsonl(path, &content)?,
        }

        self.document_index += 1;
        self.first_entry = false;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        match self.options.format {
            Format::Xml => self.writer.write_all(b"</documents>\n")?,
            Format::Json => self.writer.write_all(b"\n]\n")?,
            Format::Text | Format::Jsonl => {}
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(path: &str, content: &str) -> Document {
        Document {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn render(options: ReportOptions, documents: &[Document]) -> String {
        let mut report = Report::new(Vec::new(), options);
        report.start().unwrap();
        for document in documents {
            report.write_document(document).unwrap();
        }
        report.finish().unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    fn with_format(format: Format) -> ReportOptions {
        ReportOptions {
            format,
            ..ReportOptions::default()
        }
    }

    #[test]
    fn test_text_format() {
        let out = render(ReportOptions::default(), &[doc("a.py", "print(1)"), doc("b.md", "# B\n")]);
        assert_eq!(out, "a.py\n---\nprint(1)\n\n---\n\nb.md\n---\n# B\n\n\n---\n\n");
    }

    #[test]
    fn test_xml_format_numbers_documents_from_one() {
        let out = render(with_format(Format::Xml), &[doc("a.py", "x = 1"), doc("b.py", "<tag>")]);
        assert_eq!(
            out,
            "<documents>\n\
             <document index=\"1\">\n<source>a.py</source>\n<document_content>\nx = 1\n</document_content>\n</document>\n\
             <document index=\"2\">\n<source>b.py</source>\n<document_content>\n<tag>\n</document_content>\n</document>\n\
             </documents>\n"
        );
    }

    #[test]
    fn test_document_index_is_per_report() {
        let first = render(with_format(Format::Xml), &[doc("a", "1"), doc("b", "2")]);
        let second = render(with_format(Format::Xml), &[doc("c", "3")]);
        assert!(first.contains("index=\"2\""));
        assert!(second.contains("index=\"1\""));
        assert!(!second.contains("index=\"3\""));
    }

    #[test]
    fn test_json_array_is_valid() {
        let out = render(with_format(Format::Json), &[doc("a.py", "say \"hi\"\n"), doc("b.py", "")]);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["path"], "a.py");
        assert_eq!(entries[0]["content"], "say \"hi\"\n");
        assert!(out.starts_with("[\n{"));
        assert!(out.ends_with("}\n]\n"));
    }

    #[test]
    fn test_empty_json_array() {
        let out = render(with_format(Format::Json), &[]);
        assert_eq!(out, "[\n\n]\n");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let out = render(with_format(Format::Jsonl), &[doc("a.py", "one\ntwo"), doc("b.py", "three")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["content"], "one\ntwo");
    }

    #[test]
    fn test_line_numbers_apply_to_every_format() {
        let options = ReportOptions {
            format: Format::Jsonl,
            line_numbers: true,
            ..ReportOptions::default()
        };
        let out = render(options, &[doc("a.py", "x\ny")]);
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["content"], "1  x\n2  y");

        let options = ReportOptions {
            line_numbers: true,
            ..ReportOptions::default()
        };
        assert_eq!(render(options, &[doc("a.py", "x\ny")]), "a.py\n---\n1  x\n2  y\n\n---\n\n");
    }

    #[test]
    fn test_dataset_mode_text() {
        let options = ReportOptions {
            dataset_mode: true,
            ..ReportOptions::default()
        };
        let out = render(options, &[doc("src/a.py", "import os\n")]);
        assert_eq!(
            out,
            "[SUMMARY] src/a.py | 10 bytes | 1 lines | snippet: import os\n\
             \n===== FILE BEGIN: src/a.py =====\nimport os\n\
             \n===== FILE END: src/a.py =====\n\n"
        );
    }

    #[test]
    fn test_dataset_mode_is_inert_for_structured_formats() {
        let options = ReportOptions {
            format: Format::Json,
            dataset_mode: true,
            ..ReportOptions::default()
        };
        let out = render(options, &[doc("a.py", "x")]);
        assert!(!out.contains("[SUMMARY]"));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn test_begin_root_writes_tree_only_for_directories_in_dataset_mode() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("file.txt"), "x").unwrap();

        let options = ReportOptions {
            dataset_mode: true,
            ..ReportOptions::default()
        };
        let mut report = Report::new(Vec::new(), options);
        report.begin_root(temp_dir.path()).unwrap();
        report.begin_root(&temp_dir.path().join("file.txt")).unwrap();
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(out.matches("[DATASET-MODE] Repository Tree Overview").count(), 1);
        assert!(out.contains("📄 file.txt\n"));

        let mut plain = Report::new(Vec::new(), ReportOptions::default());
        plain.begin_root(temp_dir.path()).unwrap();
        assert!(plain.into_inner().is_empty());
    }
}
