//! Document sources: turn raw document bytes into the ordered lines the scanner reads.

mod pdf;

pub use pdf::PdfLineSource;

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use tracing::debug;

use crate::error::{BillscanError, Result};

/// Converts raw document bytes to an ordered sequence of text lines.
pub trait LineSource {
    /// Extract the document's lines in reading order.
    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>>;

    /// MIME type of the documents this source reads.
    fn media_type(&self) -> &'static str;
}

/// Line source for documents already rendered to UTF-8 text (e.g. `pdftotext -layout`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLineSource;

impl LineSource for TextLineSource {
    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        let text = std::str::from_utf8(data).map_err(|e| {
            BillscanError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        Ok(split_lines(text))
    }

    fn media_type(&self) -> &'static str {
        "text/plain"
    }
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// A supplier document: the original bytes plus the lines extracted from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    bytes: Vec<u8>,
    lines: Vec<String>,
    media_type: &'static str,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, lines: Vec<String>, media_type: &'static str) -> Self {
        Self {
            bytes,
            lines,
            media_type,
        }
    }

    /// Extract lines from `bytes` with `source`.
    pub fn from_bytes(source: &dyn LineSource, bytes: Vec<u8>) -> Result<Self> {
        let lines = source.extract_lines(&bytes)?;
        debug!("Extracted {} lines from {} bytes", lines.len(), bytes.len());
        Ok(Self::new(bytes, lines, source.media_type()))
    }

    /// Read a document from disk; `.txt` files are taken as rendered text, anything else as PDF.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let is_text = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

        if is_text {
            Self::from_bytes(&TextLineSource, bytes)
        } else {
            Self::from_bytes(&PdfLineSource::new(), bytes)
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// The document as a base64 data URI.
    pub fn attachment(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
