//! Locale-aware number normalization for captured fields.
//!
//! Supplier documents print numbers with spaces as thousands separators and a comma as the
//! decimal separator (`1 234,56`). Dot-decimal values (`12.00`) pass through unchanged.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ConversionError;
use crate::models::expense::Quantity;

/// Convert a locale-formatted numeric string to a decimal.
pub fn decimal(text: &str) -> Result<Decimal, ConversionError> {
    let normalized: String = text
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{00a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&normalized).map_err(|_| ConversionError::Number(text.to_string()))
}

/// Convert a numeric string to a quantity, integral when there is no fractional part.
pub fn quantity(text: &str) -> Result<Quantity, ConversionError> {
    let value = decimal(text)?;
    if value.fract().is_zero() {
        if let Some(n) = value.to_i64() {
            return Ok(Quantity::Integral(n));
        }
    }
    Ok(Quantity::Fractional(value.normalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decimal_locale_format() {
        assert_eq!(decimal("1 234,56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(decimal("12 345 678,90").unwrap(), Decimal::new(1234567890, 2));
        assert_eq!(decimal("1\u{00a0}089,00").unwrap(), Decimal::new(1089, 0));
        assert_eq!(decimal("21,00").unwrap(), Decimal::new(21, 0));
    }

    #[test]
    fn test_decimal_dot_format() {
        assert_eq!(decimal("210.00").unwrap(), Decimal::new(210, 0));
        assert_eq!(decimal("0.250").unwrap(), Decimal::new(25, 2));
    }

    #[test]
    fn test_decimal_rejects_text() {
        assert_eq!(decimal("abc"), Err(ConversionError::Number("abc".to_string())));
        assert!(decimal("").is_err());
        assert!(decimal("1,2,3").is_err());
    }

    #[test]
    fn test_quantity_integral() {
        assert_eq!(quantity("3,0").unwrap(), Quantity::Integral(3));
        assert_eq!(quantity("12.00").unwrap(), Quantity::Integral(12));
        assert_eq!(quantity("1 000").unwrap(), Quantity::Integral(1000));
    }

    #[test]
    fn test_quantity_fractional() {
        let q = quantity("3,5").unwrap();
        assert!(!q.is_integral());
        assert_eq!(q.as_decimal(), Decimal::new(35, 1));
    }
}
