//! Czech Post (Česká pošta) posting receipts.
//!
//! Every shipment spans three physical lines: the shipment row, the service code and the
//! recipient's e-mail. Page breaks and other noise may appear between them.

use lazy_static::lazy_static;
use regex::Regex;

use super::{DocumentHeader, SupplierVariant};
use crate::error::Result;
use crate::models::config::SupplierConfig;
use crate::models::expense::{DocumentType, ExpenseLine, PaymentMethod, Quantity};
use crate::scan::{Fields, ItemLayout, Pattern, decimal};
use rust_decimal::Decimal;

/// Line name used when neither the code table nor the configuration knows the service.
pub const DEFAULT_SERVICE: &str = "Doporučená zásilka";

lazy_static! {
    static ref HEADER: Vec<Pattern> = vec![
        Pattern::new("post office and posting date", Regex::new(concat!(
            r"POŠTA:\s+(?P<post_office>.+?)\s+",
            r"DATUM PODÁNÍ:\s+(?P<issue_day>\d+)\.(?P<issue_month>\d{1,2})\.(?P<issue_year>\d{4})",
        )).unwrap()),
        Pattern::new("shipment table", Regex::new(r"Kontakty\s+Hmotnost").unwrap()),
    ];

    static ref SHIPMENT: Vec<Pattern> = vec![
        Pattern::new("shipment row", Regex::new(concat!(
            r"\d+\s+(?P<tracking>[A-Z]{2}\d{9}[A-Z]{2})\s+(?P<type>\S+)\s+(?P<customer_name>.+?)\s+",
            r"\d+\.\d+\s+(?P<unit_price>\d+\.\d+)",
        )).unwrap()),
        Pattern::new("service code", Regex::new(r"^\s+(?P<service_code>\d+)\s*$").unwrap()),
        Pattern::new("recipient e-mail", Regex::new(r"^\s+(?P<customer_email>\S+@\S+)\s*$").unwrap()),
    ];

    static ref STOP: Pattern = Pattern::new("shipment count", Regex::new(
        r"^\s*Celkem zásilek"
    ).unwrap());
}

/// Human-readable name of an international service code.
pub fn service_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "250" => "Obyčejná zásilka do zahraničí (max. 2kg)",
        "251" => "Doporučená zásilka do zahraničí (max. 2kg)",
        "253" => "Obyčejná slepecká zásilka do zahraničí (max. 7kg)",
        "254" => "Doporučená slepecká zásilka do zahraničí (max. 7kg)",
        "255" => "Tiskovinový pytel do zahraničí - Obyčejný (max. 30kg)",
        "256" => "Tiskovinový pytel do zahraničí - Doporučený (max. 30kg)",
        "258" => "EMS do zahraničí (max. 30kg)",
        // 280 and 282 also cover the priority tier; the receipt does not tell them apart.
        "280" => "Standardní balík do zahraničí - ekonomický (max. 30kg)",
        "282" => "Cenný balík do zahraničí - ekonomický (max. 30kg)",
        "285" => "Obchodní balík do zahraničí (max. 30kg)",
        _ => return None,
    };
    Some(name)
}

/// Posting receipts paid by card at the counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CzechPost;

pub static CZECH_POST: CzechPost = CzechPost;

impl CzechPost {
    fn service(&self, code: &str, config: &SupplierConfig) -> String {
        service_name(code)
            .map(str::to_string)
            .or_else(|| config.default_service.clone())
            .unwrap_or_else(|| DEFAULT_SERVICE.to_string())
    }
}

impl SupplierVariant for CzechPost {
    fn code(&self) -> &'static str {
        "cpost"
    }

    fn default_email(&self) -> &'static str {
        "info@cpost.cz"
    }

    fn default_payment_method(&self) -> PaymentMethod {
        PaymentMethod::Card
    }

    fn mark_paid(&self) -> bool {
        true
    }

    fn header_patterns(&self) -> &[Pattern] {
        &HEADER
    }

    fn item_layout(&self) -> ItemLayout<'_> {
        ItemLayout::Grouped(&SHIPMENT)
    }

    fn stop_pattern(&self) -> &Pattern {
        &STOP
    }

    /// The receipt has no number of its own; it is numbered by the posting date as printed.
    fn header(&self, fields: &Fields) -> Result<DocumentHeader> {
        let issued_on = fields.date("issue")?;
        let number = format!(
            "{}{}{}",
            fields.require("issue_year")?,
            fields.require("issue_month")?,
            fields.require("issue_day")?
        );

        Ok(DocumentHeader {
            document_type: Some(DocumentType::Bill),
            invoice_number: Some(number),
            ..DocumentHeader::issued(issued_on)
        })
    }

    fn line(&self, item: &Fields, config: &SupplierConfig) -> Result<ExpenseLine> {
        Ok(ExpenseLine {
            name: self.service(item.require("service_code")?, config),
            quantity: Quantity::Integral(1),
            unit_name: Some("ks".to_string()),
            unit_price: decimal(item.require("unit_price")?)?,
            vat_rate: Decimal::ZERO,
            transferred_tax_liability: None,
        })
    }

    fn private_note(&self, header: &Fields, first_item: &Fields) -> Result<Option<String>> {
        Ok(Some(format!(
            "Pošta: {}\n{} {} ({})",
            header.require("post_office")?,
            first_item.require("tracking")?,
            first_item.require("customer_name")?,
            first_item.require("customer_email")?,
        )))
    }
}
