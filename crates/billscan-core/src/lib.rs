//! Core library for supplier bill scanning.
//!
//! This crate provides:
//! - Line sources turning PDF or pre-rendered text documents into ordered lines
//! - A forward-only line scanner with sequential, cyclic-grouped and strict single-line passes
//! - Supplier variants (Packeta invoices, Czech Post receipts) and an explicit registry
//! - The expense record handed to the accounting service, and its configuration model

pub mod error;
pub mod models;
pub mod scan;
pub mod source;
pub mod suppliers;

pub use error::{BillscanError, ConfigError, ConversionError, ParseError, PdfError, Result};
pub use models::config::{AppConfig, SupplierConfig, TaxSettings};
pub use models::expense::{DocumentType, ExpenseLine, ExpenseRecord, PaymentMethod, Quantity};
pub use scan::{Fields, ItemLayout, LineScanner, Pattern};
pub use source::{LineSource, PdfLineSource, SourceDocument, TextLineSource};
pub use suppliers::{DocumentHeader, ExpenseParser, SupplierRegistry, SupplierVariant};
