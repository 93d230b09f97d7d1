//! Progressive bracket tax.
//!
//! Income fills brackets from the bottom up: each bracket taxes only the
//! slice of income inside it, never income below its lower bound. The last
//! bracket of a schedule is unbounded.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::TaxBracket;

/// Computes tax on `taxable_income` by walking the bracket schedule in
/// ascending order.
///
/// Each bracket contributes `min(remaining, width) * rate`; the walk stops
/// when the income is consumed. Non-positive income returns zero without
/// touching the schedule. The result is rounded to cents, half-up.
pub fn tax_from_brackets(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        let width = match bracket.max_income {
            Some(max) => max - bracket.min_income,
            None => remaining,
        };
        let portion = remaining.min(width);
        tax += portion * bracket.tax_rate;
        remaining -= portion;
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    round_half_up(tax)
}
