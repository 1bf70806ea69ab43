//! Error types for the billscan-core library.

use thiserror::Error;

/// Main error type for the billscan library.
#[derive(Error, Debug)]
pub enum BillscanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document layout did not match the supplier's patterns.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A captured field could not be normalized.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while scanning document lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Lines ran out before a header pattern matched.
    #[error("lines exhausted, pattern not matched: {pattern}")]
    HeaderNotMatched { pattern: String },

    /// Lines ran out before the stop pattern matched.
    #[error("lines exhausted, stop pattern not matched: {stop}")]
    StopNotFound { stop: String },

    /// Strict item block met a line that is neither an item nor the terminator.
    #[error("line not matched: {line}")]
    UnexpectedLine { line: String },

    /// A completed match set lacks a field the variant needs.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Errors raised while normalizing captured values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Text is not a number after locale normalization.
    #[error("cannot convert \"{0}\" to a number")]
    Number(String),

    /// Day, month and year captures do not form a calendar date.
    #[error("invalid date for {field}: {value}")]
    Date { field: String, value: String },
}

/// Errors related to supplier configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No variant is registered under the code.
    #[error("unknown supplier: {0}")]
    UnknownSupplier(String),

    /// A supplier section has a key of the wrong type.
    #[error("invalid configuration for {supplier}: {reason}")]
    Invalid { supplier: String, reason: String },

    /// Configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Read(#[from] std::io::Error),

    /// Configuration file is not valid JSON.
    #[error("malformed configuration: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for the billscan library.
pub type Result<T> = std::result::Result<T, BillscanError>;
