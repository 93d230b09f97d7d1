use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credit amounts computed for one calculation, written once and never
/// mutated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSummary {
    /// Child Tax Credit after phase-out.
    pub ctc_total: Decimal,

    /// Ceiling on the refundable portion of the CTC, evaluated against the
    /// post-phase-out credit.
    pub ctc_refundable_cap: Decimal,

    /// CTC consumed against tax before credits (nonrefundable use).
    pub ctc_nonrefundable_used: Decimal,

    /// CTC actually paid out as refundable (unused credit up to the cap).
    pub ctc_refundable: Decimal,

    /// Earned Income Tax Credit. Fully refundable.
    pub eitc: Decimal,
}

/// The complete computed result for a federal return.
///
/// Immutable once produced; recalculating a changed [`TaxReturn`] yields a
/// fresh value.
///
/// [`TaxReturn`]: crate::models::TaxReturn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    // Income
    pub total_wages: Decimal,
    pub total_self_employment_income: Decimal,
    pub gross_income: Decimal,

    // Self-employment tax and above-the-line adjustments
    pub se_tax: Decimal,
    pub se_tax_deduction: Decimal,
    pub student_loan_interest_deduction: Decimal,

    pub adjusted_gross_income: Decimal,

    // Deductions: both amounts are exposed so a caller can recommend the
    // larger one; `deduction_applied` is the one actually used.
    pub standard_deduction: Decimal,
    pub itemized_deductions: Decimal,
    pub deduction_applied: Decimal,
    pub used_itemized_deduction: bool,

    pub taxable_income: Decimal,

    // Tax
    pub tax_before_credits: Decimal,
    pub total_tax_before_credits: Decimal,

    pub credits: CreditSummary,

    /// Tax remaining after nonrefundable CTC consumption.
    pub tax_after_nonrefundable_credits: Decimal,

    /// Tax remaining after the EITC as well. Never negative.
    pub final_tax: Decimal,

    pub total_withholding: Decimal,

    /// Unsigned refund or balance-due magnitude; see `is_refund` for the
    /// direction.
    pub refund_or_owed: Decimal,
    pub is_refund: bool,
}
