//! Supplier variants: per-supplier pattern tables, defaults and post-processing.

mod cpost;
mod packeta;
mod parser;
mod registry;

pub use cpost::{CZECH_POST, CzechPost};
pub use packeta::{PACKETA, Packeta};
pub use parser::ExpenseParser;
pub use registry::SupplierRegistry;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::config::SupplierConfig;
use crate::models::expense::{DocumentType, ExpenseLine, PaymentMethod};
use crate::scan::{Fields, ItemLayout, Pattern};

/// Header data a variant derives from the captured header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub document_type: Option<DocumentType>,
    pub invoice_number: Option<String>,
    pub original_number: Option<String>,
    pub variable_symbol: Option<String>,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub taxable_fulfillment_due: NaiveDate,
}

impl DocumentHeader {
    /// Header for a document whose due and taxable dates equal the issue date.
    pub fn issued(issued_on: NaiveDate) -> Self {
        Self {
            document_type: None,
            invoice_number: None,
            original_number: None,
            variable_symbol: None,
            issued_on,
            due_on: issued_on,
            taxable_fulfillment_due: issued_on,
        }
    }
}

/// Layout and conversion rules for one supplier's documents.
///
/// Variants are stateless; everything captured during a parse lives in the parse call.
pub trait SupplierVariant: Send + Sync {
    /// Code the variant is registered under.
    fn code(&self) -> &'static str;

    /// Contact e-mail of the supplier in the accounting service.
    fn default_email(&self) -> &'static str;

    fn default_payment_method(&self) -> PaymentMethod {
        PaymentMethod::Bank
    }

    /// Whether expenses are marked as paid right after creation.
    fn mark_paid(&self) -> bool {
        false
    }

    /// Foreign suppliers invoice zero-rated lines that the buyer self-assesses.
    fn is_foreign(&self) -> bool {
        false
    }

    /// Patterns matched once, in order, before the item block.
    fn header_patterns(&self) -> &[Pattern];

    fn item_layout(&self) -> ItemLayout<'_>;

    /// Pattern marking the end of the item block.
    fn stop_pattern(&self) -> &Pattern;

    /// Convert the captured header fields.
    fn header(&self, fields: &Fields) -> Result<DocumentHeader>;

    /// Convert one completed line item.
    fn line(&self, item: &Fields, config: &SupplierConfig) -> Result<ExpenseLine>;

    /// Private note built from the header and the first completed item.
    fn private_note(&self, _header: &Fields, _first_item: &Fields) -> Result<Option<String>> {
        Ok(None)
    }
}
