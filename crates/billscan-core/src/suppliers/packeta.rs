//! Packeta (Zásilkovna) parcel-delivery invoices.
//!
//! Each invoiced service sits on a single line of the service table:
//!
//! ```text
//! Fakturujeme Vám služby        Množství   Cena za MJ    DPH       Celkem
//! Přeprava zásilek                 12.00     1 089,00   21,00 %   13 068,00
//! Celkem bez DPH                                                  13 068,00
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::{DocumentHeader, SupplierVariant};
use crate::error::Result;
use crate::models::config::SupplierConfig;
use crate::models::expense::ExpenseLine;
use crate::scan::{Fields, ItemLayout, Pattern, decimal, quantity};

lazy_static! {
    static ref HEADER: Vec<Pattern> = vec![
        Pattern::new("invoice number", Regex::new(
            r"(?:FAKTURA - DAŇOVÝ DOKLAD č\.|Faktura - daňový doklad č\.)\s+(?P<invoice_number>\d+)"
        ).unwrap()),
        Pattern::new("variable symbol", Regex::new(
            r"Variabilní symbol:?\s+(?P<variable_symbol>\S+)"
        ).unwrap()),
        Pattern::new("issue date", Regex::new(
            r"Datum vystavení:\s+(?P<issue_day>\d+)\. (?P<issue_month>\d{1,2})\. (?P<issue_year>\d{4})"
        ).unwrap()),
        Pattern::new("due date", Regex::new(
            r"Datum splatnosti:\s+(?P<due_day>\d{1,2})\. (?P<due_month>\d{1,2})\. (?P<due_year>\d{4})"
        ).unwrap()),
        Pattern::new("taxable supply date", Regex::new(
            r"Datum uskutečnění plnění:\s+(?P<tax_day>\d{1,2})\. (?P<tax_month>\d{1,2})\. (?P<tax_year>\d{4})"
        ).unwrap()),
        Pattern::new("service table", Regex::new(
            r"Fakturujeme Vám služby\s+Množství"
        ).unwrap()),
    ];

    static ref ITEM: Pattern = Pattern::new("service line", Regex::new(concat!(
        r"^\s*(?P<name>.+?)\s+",
        r"(?P<quantity>\d+\.\d+)\s+",
        r"(?P<unit_price>(?:\d+ )*\d+,\d+)\s+",
        r"(?P<vat_rate>\d+,\d+)\s*%\s+",
    )).unwrap());

    static ref STOP: Pattern = Pattern::new("net total", Regex::new(
        r"^\s*Celkem bez DPH\s+"
    ).unwrap());
}

/// Parcel-delivery service invoices, one service per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Packeta;

pub static PACKETA: Packeta = Packeta;

impl SupplierVariant for Packeta {
    fn code(&self) -> &'static str {
        "packeta"
    }

    fn default_email(&self) -> &'static str {
        "info@zasilkovna.cz"
    }

    fn header_patterns(&self) -> &[Pattern] {
        &HEADER
    }

    fn item_layout(&self) -> ItemLayout<'_> {
        ItemLayout::SingleLine(&ITEM)
    }

    fn stop_pattern(&self) -> &Pattern {
        &STOP
    }

    fn header(&self, fields: &Fields) -> Result<DocumentHeader> {
        Ok(DocumentHeader {
            document_type: None,
            invoice_number: None,
            original_number: Some(fields.require("invoice_number")?.to_string()),
            variable_symbol: Some(fields.require("variable_symbol")?.to_string()),
            issued_on: fields.date("issue")?,
            due_on: fields.date("due")?,
            taxable_fulfillment_due: fields.date("tax")?,
        })
    }

    fn line(&self, item: &Fields, _config: &SupplierConfig) -> Result<ExpenseLine> {
        Ok(ExpenseLine {
            name: item.require("name")?.trim().to_string(),
            quantity: quantity(item.require("quantity")?)?,
            unit_name: None,
            unit_price: decimal(item.require("unit_price")?)?,
            vat_rate: decimal(item.require("vat_rate")?)?,
            transferred_tax_liability: None,
        })
    }
}
