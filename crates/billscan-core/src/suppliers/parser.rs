//! Expense parser: runs a supplier variant over one source document.

use std::time::Instant;

use tracing::{debug, info};

use super::SupplierVariant;
use crate::error::Result;
use crate::models::config::{SupplierConfig, TaxSettings};
use crate::models::expense::{ExpenseLine, ExpenseRecord, PaymentMethod};
use crate::scan::LineScanner;
use crate::source::SourceDocument;

/// Parses one supplier document into an expense record.
pub struct ExpenseParser {
    variant: &'static dyn SupplierVariant,
    config: SupplierConfig,
    tax: TaxSettings,
    document: SourceDocument,
}

impl ExpenseParser {
    pub fn new(
        variant: &'static dyn SupplierVariant,
        config: SupplierConfig,
        tax: TaxSettings,
        document: SourceDocument,
    ) -> Self {
        Self {
            variant,
            config,
            tax,
            document,
        }
    }

    pub fn variant(&self) -> &'static dyn SupplierVariant {
        self.variant
    }

    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// E-mail of the supplier contact in the accounting service.
    pub fn supplier_email(&self) -> &str {
        self.config
            .email
            .as_deref()
            .unwrap_or_else(|| self.variant.default_email())
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.config
            .payment_method
            .unwrap_or_else(|| self.variant.default_payment_method())
    }

    /// Whether the created expense should be marked as paid.
    pub fn pay(&self) -> bool {
        self.config.paid().unwrap_or_else(|| self.variant.mark_paid())
    }

    pub fn bank_account_id(&self) -> Option<u64> {
        self.config.bank_account_id
    }

    /// The source document as a base64 data URI.
    pub fn attachment(&self) -> String {
        self.document.attachment()
    }

    /// Parse the document.
    ///
    /// Nothing is returned unless every header pattern matched, the item block ended with the
    /// stop pattern, and every captured value converted.
    pub fn parse(&self) -> Result<ExpenseRecord> {
        let start = Instant::now();
        let lines = self.document.lines();
        info!(
            "Parsing {} document from {} lines",
            self.variant.code(),
            lines.len()
        );

        let mut scanner = LineScanner::new(lines);
        let fields = scanner.sequential(self.variant.header_patterns())?;
        let header = self.variant.header(&fields)?;
        debug!("Header complete after {} lines", scanner.position());

        let items = scanner.items(self.variant.item_layout(), self.variant.stop_pattern())?;

        let mut expense_lines = items
            .iter()
            .map(|item| self.variant.line(item, &self.config))
            .collect::<Result<Vec<_>>>()?;

        if self.variant.is_foreign() && self.tax.vat_registered {
            for line in &mut expense_lines {
                apply_reverse_charge(line, &self.tax);
            }
        }

        let private_note = match items.first() {
            Some(first_item) => self.variant.private_note(&fields, first_item)?,
            None => None,
        };

        let record = ExpenseRecord {
            document_type: header.document_type,
            invoice_number: header.invoice_number,
            original_number: header.original_number,
            variable_symbol: header.variable_symbol,
            issued_on: header.issued_on,
            due_on: header.due_on,
            taxable_fulfillment_due: header.taxable_fulfillment_due,
            payment_method: self.payment_method(),
            attachment: self.attachment(),
            private_note,
            lines: expense_lines,
        };

        info!(
            "Parsed {} line items in {}ms",
            record.lines.len(),
            start.elapsed().as_millis()
        );

        Ok(record)
    }
}

/// Self-assess VAT on a zero-rated line bought from a foreign supplier.
fn apply_reverse_charge(line: &mut ExpenseLine, tax: &TaxSettings) {
    if line.vat_rate.is_zero() {
        line.vat_rate = tax.vat_rate;
        line.transferred_tax_liability = Some(true);
    }
}
