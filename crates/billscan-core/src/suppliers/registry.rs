//! Explicit registry of supplier variants.

use std::collections::BTreeMap;

use tracing::debug;

use super::{CZECH_POST, PACKETA, SupplierVariant};
use crate::error::ConfigError;

/// Maps supplier codes to their variants.
#[derive(Clone, Default)]
pub struct SupplierRegistry {
    variants: BTreeMap<&'static str, &'static dyn SupplierVariant>,
}

impl SupplierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in supplier.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(&PACKETA);
        registry.register(&CZECH_POST);
        registry
    }

    /// Register a variant under its code, replacing any variant with the same code.
    pub fn register(&mut self, variant: &'static dyn SupplierVariant) {
        if self.variants.insert(variant.code(), variant).is_some() {
            debug!("Replaced supplier variant '{}'", variant.code());
        }
    }

    pub fn lookup(&self, code: &str) -> Result<&'static dyn SupplierVariant, ConfigError> {
        self.variants
            .get(code)
            .copied()
            .ok_or_else(|| ConfigError::UnknownSupplier(code.to_string()))
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.variants.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static dyn SupplierVariant> + '_ {
        self.variants.values().copied()
    }
}

impl std::fmt::Debug for SupplierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplierRegistry")
            .field("codes", &self.codes())
            .finish()
    }
}
