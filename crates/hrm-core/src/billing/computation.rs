// ============================================================================
// HRM Core - Invoice Computation
// File: crates/hrm-core/src/billing/computation.rs
// ============================================================================
//! Pure derivation of line amounts and invoice totals.
//!
//! Amounts use exact decimal arithmetic. Each derived figure is rounded to
//! two places (midpoint away from zero) and the grand total is assembled from
//! the rounded parts, so stored values always satisfy
//! `grand_total = total_amount + tax_amount - discount_amount`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::LineItem;
use crate::error::DomainError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn overflow() -> DomainError {
    DomainError::ValidationError("Invoice amounts are too large".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub total_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    pub fn from_total(
        total_amount: Decimal,
        tax_percent: Decimal,
        discount_percent: Decimal,
    ) -> Result<Self, DomainError> {
        let total_amount = round_money(total_amount);
        let tax_amount = percent_of(total_amount, tax_percent)?;
        let discount_amount = percent_of(total_amount, discount_percent)?;
        let grand_total = total_amount
            .checked_add(tax_amount)
            .and_then(|v| v.checked_sub(discount_amount))
            .ok_or_else(overflow)?;
        Ok(Self {
            total_amount,
            tax_amount,
            discount_amount,
            grand_total,
        })
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Result<Decimal, DomainError> {
    amount
        .checked_mul(percent)
        .and_then(|v| v.checked_div(HUNDRED))
        .map(round_money)
        .ok_or_else(overflow)
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `None` when the product does not fit in a `Decimal`.
pub fn line_amount(quantity: i32, rate: Decimal) -> Option<Decimal> {
    Decimal::from(quantity).checked_mul(rate).map(round_money)
}

/// Writes `amount` on every item and returns the aggregate totals. On
/// overflow the items may be partially updated.
pub fn compute_totals(
    items: &mut [LineItem],
    tax_percent: Decimal,
    discount_percent: Decimal,
) -> Result<InvoiceTotals, DomainError> {
    let mut total = Decimal::ZERO;
    for item in items.iter_mut() {
        item.amount = line_amount(item.quantity, item.rate).ok_or_else(overflow)?;
        total = total.checked_add(item.amount).ok_or_else(overflow)?;
    }
    InvoiceTotals::from_total(total, tax_percent, discount_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: i32, rate: &str) -> LineItem {
        LineItem {
            description: "Work".to_string(),
            quantity,
            rate: d(rate),
            amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_reference_example() {
        let mut items = vec![item(2, "50"), item(1, "100")];
        let totals = compute_totals(&mut items, d("10"), d("5")).unwrap();

        assert_eq!(items[0].amount, d("100"));
        assert_eq!(items[1].amount, d("100"));
        assert_eq!(totals.total_amount, d("200"));
        assert_eq!(totals.tax_amount, d("20"));
        assert_eq!(totals.discount_amount, d("10"));
        assert_eq!(totals.grand_total, d("210"));
    }

    #[test]
    fn test_zero_percentages() {
        let mut items = vec![item(3, "19.99")];
        let totals = compute_totals(&mut items, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(totals.total_amount, d("59.97"));
        assert_eq!(totals.grand_total, d("59.97"));
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 + 0.2 style sums stay exact.
        let mut items = vec![item(1, "0.10"), item(1, "0.20")];
        let totals = compute_totals(&mut items, Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(totals.total_amount, d("0.30"));
    }

    #[test]
    fn test_fractional_percent_rounds_half_away_from_zero() {
        let mut items = vec![item(1, "10.05")];
        let totals = compute_totals(&mut items, d("5"), Decimal::ZERO).unwrap();
        // 10.05 * 5% = 0.5025
        assert_eq!(totals.tax_amount, d("0.50"));
        assert_eq!(totals.grand_total, d("10.55"));

        let totals = InvoiceTotals::from_total(d("0.10"), d("25"), Decimal::ZERO).unwrap();
        // 0.025 -> 0.03
        assert_eq!(totals.tax_amount, d("0.03"));
    }

    #[test]
    fn test_grand_total_identity_holds_for_many_inputs() {
        for quantity in 1..20 {
            for rate in ["0.01", "1.99", "250.5", "1234.567"] {
                for (tax, discount) in [("0", "0"), ("7.5", "2.25"), ("18", "100")] {
                    let mut items = vec![item(quantity, rate), item(quantity + 1, "3.33")];
                    let totals = compute_totals(&mut items, d(tax), d(discount)).unwrap();
                    let sum: Decimal = items.iter().map(|i| i.amount).sum();
                    assert_eq!(totals.total_amount, sum);
                    assert_eq!(
                        totals.grand_total,
                        totals.total_amount + totals.tax_amount - totals.discount_amount
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_items() {
        let totals = compute_totals(&mut [], d("10"), d("5")).unwrap();
        assert_eq!(totals.total_amount, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_a_validation_error() {
        let mut items = vec![item(100, "10000000000000000000000000000")];
        let result = compute_totals(&mut items, Decimal::ZERO, Decimal::ZERO);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));

        let mut items = vec![item(1, "50000000000000000000000000000"), item(1, "50000000000000000000000000000")];
        assert!(compute_totals(&mut items, Decimal::ZERO, Decimal::ZERO).is_err());

        let result = InvoiceTotals::from_total(d("1000"), d("50000000000000000000000000000"), Decimal::ZERO);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));

        assert_eq!(line_amount(i32::MAX, Decimal::MAX), None);
    }
}
