//! Expense record models handed to the accounting service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A complete expense parsed from a supplier document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    /// Document type; absent means a regular invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,

    /// Document number assigned on import (synthesized for receipts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Supplier's own document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_number: Option<String>,

    /// Payment reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_symbol: Option<String>,

    /// Date the document was issued.
    pub issued_on: NaiveDate,

    /// Payment due date.
    pub due_on: NaiveDate,

    /// Date of taxable supply.
    pub taxable_fulfillment_due: NaiveDate,

    /// How the expense is paid.
    pub payment_method: PaymentMethod,

    /// Source document as a base64 data URI.
    pub attachment: String,

    /// Free-text note visible only to the account owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_note: Option<String>,

    /// Line items in document order.
    pub lines: Vec<ExpenseLine>,
}

impl ExpenseRecord {
    /// Sum of quantity times unit price over all lines, before VAT.
    pub fn total_net(&self) -> Decimal {
        self.lines.iter().map(ExpenseLine::total_net).sum()
    }
}

/// A single line item on the expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseLine {
    /// Product/service description.
    pub name: String,

    /// Quantity.
    pub quantity: Quantity,

    /// Unit of measure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,

    /// Unit price (net).
    pub unit_price: Decimal,

    /// VAT rate in percent.
    pub vat_rate: Decimal,

    /// Set when VAT is self-assessed by the buyer (reverse charge).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_tax_liability: Option<bool>,
}

impl ExpenseLine {
    pub fn total_net(&self) -> Decimal {
        self.quantity.as_decimal() * self.unit_price
    }
}

/// Item quantity, integral whenever the source value has no fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Integral(i64),
    Fractional(Decimal),
}

impl Quantity {
    pub fn as_decimal(&self) -> Decimal {
        match self {
            Quantity::Integral(n) => Decimal::from(*n),
            Quantity::Fractional(d) => *d,
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Quantity::Integral(_))
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Integral(n) => write!(f, "{}", n),
            Quantity::Fractional(d) => write!(f, "{}", d),
        }
    }
}

/// Expense document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    /// Simplified tax document (receipt).
    Bill,
}

/// Payment method as understood by the accounting service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer.
    #[default]
    Bank,
    Cash,
    /// Cash on delivery.
    Cod,
    Card,
    Paypal,
    Custom,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Bank => "bank",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Custom => "custom",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(quantity: Quantity, unit_price: Decimal) -> ExpenseLine {
        ExpenseLine {
            name: "Doručení".to_string(),
            quantity,
            unit_name: None,
            unit_price,
            vat_rate: Decimal::new(21, 0),
            transferred_tax_liability: None,
        }
    }

    #[test]
    fn test_quantity_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Quantity::Integral(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Quantity::Fractional(Decimal::new(35, 1))).unwrap(),
            "3.5"
        );
    }

    #[test]
    fn test_line_omits_absent_optionals() {
        let json = serde_json::to_value(line(Quantity::Integral(1), Decimal::new(9950, 2))).unwrap();
        assert!(json.get("unit_name").is_none());
        assert!(json.get("transferred_tax_liability").is_none());
        assert_eq!(json["unit_price"], serde_json::json!(99.5));
    }

    #[test]
    fn test_total_net() {
        let a = line(Quantity::Integral(2), Decimal::new(1050, 2));
        let b = line(Quantity::Fractional(Decimal::new(15, 1)), Decimal::new(200, 2));
        assert_eq!(a.total_net(), Decimal::new(2100, 2));
        assert_eq!(b.total_net(), Decimal::new(300, 2));
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"card\"");
        let parsed: PaymentMethod = serde_json::from_str("\"cod\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Cod);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Bank);
    }
}
