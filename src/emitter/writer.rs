//! Indentation-aware line writer.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Spaces per indentation level.
pub const INDENT: usize = 2;

/// Writes lines prefixed with the current indentation.
///
/// Indentation changes in matched [`push_indent`](Self::push_indent) /
/// [`pop_indent`](Self::pop_indent) pairs and never goes below zero. Lines
/// are final once written.
pub struct SourceWriter<W: Write> {
    out: W,
    indent: usize,
    /// Destination name used in write errors
    label: PathBuf,
}

impl<W: Write> SourceWriter<W> {
    /// Create a writer at indentation zero.
    pub fn new(out: W) -> Self {
        SourceWriter {
            out,
            indent: 0,
            label: PathBuf::from("<output>"),
        }
    }

    /// Name the destination for error reporting.
    pub fn with_label(mut self, label: impl AsRef<Path>) -> Self {
        self.label = label.as_ref().to_path_buf();
        self
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn push_indent(&mut self) {
        self.indent += INDENT;
    }

    pub fn pop_indent(&mut self) {
        self.indent = self.indent.saturating_sub(INDENT);
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) -> Result<()> {
        let indent = self.indent;
        self.write_raw(format_args!("{:indent$}{}\n", "", text))
    }

    /// Write an empty line (no trailing whitespace).
    pub fn newline(&mut self) -> Result<()> {
        self.write_raw(format_args!("\n"))
    }

    /// Write a multi-line block, indenting every non-empty line.
    pub fn block(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            if line.is_empty() {
                self.newline()?;
            } else {
                self.line(line)?;
            }
        }
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(|source| Error::OutputWrite {
            path: self.label.clone(),
            source,
        })?;
        Ok(self.out)
    }

    fn write_raw(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.out
            .write_fmt(args)
            .map_err(|source| Error::OutputWrite {
                path: self.label.clone(),
                source,
            })
    }
}
