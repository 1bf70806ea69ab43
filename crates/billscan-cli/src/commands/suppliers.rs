//! Suppliers command - list the registered supplier variants.

use console::style;

use billscan_core::SupplierRegistry;

pub fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let registry = SupplierRegistry::builtin();

    for variant in registry.iter() {
        let supplier_config = config.supplier(variant.code())?;
        let email = supplier_config
            .email
            .as_deref()
            .unwrap_or_else(|| variant.default_email());
        let payment_method = supplier_config
            .payment_method
            .unwrap_or_else(|| variant.default_payment_method());
        let pay = supplier_config.paid().unwrap_or_else(|| variant.mark_paid());

        println!(
            "{:<10} {:<28} {:<6} {}",
            style(variant.code()).bold(),
            email,
            payment_method,
            if pay { "paid" } else { "unpaid" }
        );
    }

    Ok(())
}
