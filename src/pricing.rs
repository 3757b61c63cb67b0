//! Pricing

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::lines::CartLine;

/// Pricing errors.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Currency code not supported by the storefront.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Delivery fee rule: free above a subtotal threshold, flat fee otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeliveryPolicy {
    /// Subtotals strictly above this amount ship for free.
    pub free_over: Decimal,

    /// Fee charged at or below the threshold.
    pub fee: Decimal,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            free_over: Decimal::new(35_00, 2),
            fee: Decimal::new(2_99, 2),
        }
    }
}

impl DeliveryPolicy {
    /// Delivery fee owed for the given subtotal.
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_over {
            Decimal::ZERO
        } else {
            self.fee
        }
    }
}

/// Derived cart totals. Never stored, always recomputed from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of all quantities
    pub item_count: u64,

    /// Sum of line totals
    pub subtotal: Decimal,

    /// Fee from the delivery policy
    pub delivery_fee: Decimal,

    /// Subtotal plus delivery fee
    pub total: Decimal,
}

impl CartTotals {
    /// Computes totals for the given lines under `policy`.
    pub fn from_lines(lines: &[CartLine], policy: &DeliveryPolicy) -> Self {
        let item_count = item_count(lines);
        let subtotal = subtotal(lines);
        let delivery_fee = policy.fee_for(subtotal);

        Self {
            item_count,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// Sum of quantities across lines.
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity.get())).sum()
}

/// Sum of `unit_price × quantity` across lines.
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Renders an amount in the given currency, e.g. `$12.99`.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

/// Looks up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than USD, GBP and EUR.
pub fn currency_for(code: &str) -> Result<&'static Currency, PriceError> {
    match code {
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use testresult::TestResult;

    use super::*;

    fn line(id: &str, cents: i64, quantity: u32) -> TestResult<CartLine> {
        Ok(CartLine::new(
            id,
            format!("Item {id}"),
            Decimal::new(cents, 2),
            NonZeroU32::new(quantity).ok_or("quantity must be non-zero")?,
            "",
            "1",
        ))
    }

    #[test]
    fn fee_charged_at_threshold() {
        let policy = DeliveryPolicy::default();

        assert_eq!(policy.fee_for(Decimal::new(35_00, 2)), Decimal::new(2_99, 2));
        assert_eq!(policy.fee_for(Decimal::new(35_01, 2)), Decimal::ZERO);
        assert_eq!(policy.fee_for(Decimal::ZERO), Decimal::new(2_99, 2));
    }

    #[test]
    fn totals_for_single_burger() -> TestResult {
        let lines = [line("1", 12_99, 1)?];

        let totals = CartTotals::from_lines(&lines, &DeliveryPolicy::default());

        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.subtotal, Decimal::new(12_99, 2));
        assert_eq!(totals.delivery_fee, Decimal::new(2_99, 2));
        assert_eq!(totals.total, Decimal::new(15_98, 2));

        Ok(())
    }

    #[test]
    fn totals_over_threshold_ship_free() -> TestResult {
        let lines = [line("1", 12_99, 3)?];

        let totals = CartTotals::from_lines(&lines, &DeliveryPolicy::default());

        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.delivery_fee, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(38_97, 2));

        Ok(())
    }

    #[test]
    fn empty_cart_still_owes_fee() {
        let totals = CartTotals::from_lines(&[], &DeliveryPolicy::default());

        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(2_99, 2));
    }

    #[test]
    fn custom_policy() -> TestResult {
        let policy = DeliveryPolicy {
            free_over: Decimal::new(10, 0),
            fee: Decimal::new(5, 0),
        };
        let lines = [line("1", 10_00, 1)?, line("2", 1, 1)?];

        assert_eq!(
            CartTotals::from_lines(&lines, &policy).delivery_fee,
            Decimal::ZERO
        );

        Ok(())
    }

    #[test]
    fn format_amount_includes_value() {
        let formatted = format_amount(Decimal::new(15_98, 2), iso::USD);

        assert!(formatted.contains("15.98"), "got {formatted}");
    }

    #[test]
    fn currency_lookup() -> TestResult {
        assert_eq!(currency_for("GBP")?, iso::GBP);
        assert_eq!(
            currency_for("JPY"),
            Err(PriceError::UnknownCurrency("JPY".to_string()))
        );

        Ok(())
    }
}
