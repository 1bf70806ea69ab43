//! Configuration structures for supplier imports.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::models::expense::PaymentMethod;

/// Main configuration file: caller-wide tax settings plus one section per supplier code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Organization-wide VAT rate applied to reverse-charged lines.
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,

    /// Whether the organization is registered for VAT.
    #[serde(default)]
    pub vat_registered: bool,

    /// Supplier sections keyed by supplier code. Other top-level keys land here too and are
    /// never looked at unless they collide with a supplier code.
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

fn default_vat_rate() -> Decimal {
    Decimal::new(21, 0)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
            vat_registered: false,
            sections: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Tax settings shared by every supplier.
    pub fn tax(&self) -> TaxSettings {
        TaxSettings {
            vat_rate: self.vat_rate,
            vat_registered: self.vat_registered,
        }
    }

    /// Validated section for a supplier; an absent section yields the defaults.
    pub fn supplier(&self, code: &str) -> Result<SupplierConfig, ConfigError> {
        match self.sections.get(code) {
            Some(value) => SupplierConfig::from_value(code, value),
            None => Ok(SupplierConfig::default()),
        }
    }
}

/// Caller-wide VAT settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSettings {
    pub vat_rate: Decimal,
    pub vat_registered: bool,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
            vat_registered: false,
        }
    }
}

/// Per-supplier overrides of the variant defaults. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// Contact e-mail of the supplier in the accounting service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Mark the expense as paid after creating it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay: Option<bool>,

    /// Older spelling of `pay`, consulted only when `pay` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark_paid: Option<bool>,

    /// Bank account used for the payment entry.
    #[serde(
        default,
        deserialize_with = "deserialize_account_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub bank_account_id: Option<u64>,

    /// Line name used when a service code is not recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_service: Option<String>,
}

impl SupplierConfig {
    /// Validate a raw supplier section.
    pub fn from_value(supplier: &str, value: &Value) -> Result<Self, ConfigError> {
        SupplierConfig::deserialize(value).map_err(|e| ConfigError::Invalid {
            supplier: supplier.to_string(),
            reason: e.to_string(),
        })
    }

    /// Configured mark-paid decision, if any.
    pub fn paid(&self) -> Option<bool> {
        self.pay.or(self.mark_paid)
    }
}

fn deserialize_account_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let id = match &raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    match id {
        Some(id) => Ok(Some(id)),
        None => Err(D::Error::custom(format!(
            "invalid `bank_account_id`: {}",
            raw.unwrap_or(Value::Null)
        ))),
    }
}
