//! PDF line extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{LineSource, split_lines};
use crate::error::{PdfError, Result};

/// Line source for text-based PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLineSource;

impl PdfLineSource {
    pub fn new() -> Self {
        Self
    }

    /// Load the document and return bytes pdf-extract can read, decrypting if needed.
    fn prepare(&self, data: &[u8]) -> std::result::Result<Vec<u8>, PdfError> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);

        Ok(raw)
    }
}

impl LineSource for PdfLineSource {
    fn extract_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        let raw = self.prepare(data)?;
        let text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(split_lines(&text))
    }

    fn media_type(&self) -> &'static str {
        "application/pdf"
    }
}
