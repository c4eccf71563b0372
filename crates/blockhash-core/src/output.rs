//! Output formatting for hash records.
//!
//! Text output mirrors the classic `hash  filename` listing; JSON and JSON
//! Lines carry the full [`HashRecord`].

use std::io::{self, Write};

use crate::types::HashRecord;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{hash}  {path}` per line
    Text,
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// A streaming writer of hash records.
///
/// JSON arrays are opened on the first record and closed by [`finish`],
/// so records never need to be collected in memory.
///
/// [`finish`]: OutputWriter::finish
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects the JSON array format.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            items_written: 0,
        }
    }

    /// Write a single record.
    pub fn write(&mut self, record: &HashRecord) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.writer, "{}  {}", record.hash, record.file_path.display())?;
            }
            OutputFormat::Json => {
                let sep = if self.items_written == 0 { "[" } else { "," };
                if self.pretty {
                    write!(self.writer, "{sep}\n  ")?;
                    serde_json::to_writer_pretty(&mut self.writer, record)
                        .map_err(io::Error::other)?;
                } else {
                    self.writer.write_all(sep.as_bytes())?;
                    serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
                }
            }
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        self.items_written += 1;
        Ok(())
    }

    /// Get the number of records written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Close any open JSON array and flush.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            match (self.items_written, self.pretty) {
                (0, _) => writeln!(self.writer, "[]")?,
                (_, true) => writeln!(self.writer, "\n]")?,
                (_, false) => writeln!(self.writer, "]")?,
            }
        }
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
