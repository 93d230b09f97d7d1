//! Federal return reconciliation.
//!
//! Orchestrates the sub-calculators into a complete [`TaxCalculation`]:
//! gross income, self-employment tax, above-the-line adjustments, AGI,
//! deductions, bracket tax, credits, and the final refund-or-owed position.

use rust_decimal::Decimal;

use crate::calculations::brackets::tax_from_brackets;
use crate::calculations::common::{max, round_half_up};
use crate::calculations::credits::CreditCalculator;
use crate::calculations::deductions::DeductionCalculator;
use crate::calculations::self_employment::SeTaxCalculator;
use crate::models::{
    CreditSummary, FilingStatus, TableError, TaxCalculation, TaxReturn, TaxYearTables,
};

/// The federal pipeline, bound to one year's validated tables.
#[derive(Debug, Clone)]
pub struct FederalReturnCalculator<'a> {
    tables: &'a TaxYearTables,
}

impl<'a> FederalReturnCalculator<'a> {
    /// Binds the calculator to a table set, validating it once.
    ///
    /// Every computation after construction is infallible: bad numeric
    /// inputs are normalized, never rejected.
    pub fn new(tables: &'a TaxYearTables) -> Result<Self, TableError> {
        tables.validate()?;
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &'a TaxYearTables {
        self.tables
    }

    /// Bracket tax for a taxable income under this year's schedule.
    pub fn tax_for(
        &self,
        status: FilingStatus,
        taxable_income: Decimal,
    ) -> Decimal {
        tax_from_brackets(taxable_income, self.tables.schedule(status))
    }

    /// Computes the complete federal result for a return.
    ///
    /// The credit ordering is load-bearing: the Child Tax Credit is consumed
    /// against tax first (nonrefundable), its unused remainder becomes
    /// refundable up to the cap, and the fully refundable EITC applies after
    /// that. The net position adds refundable credits back against the
    /// pre-EITC tax figure.
    pub fn calculate(
        &self,
        tax_return: &TaxReturn,
    ) -> TaxCalculation {
        let status = tax_return.filing_status;
        let deduction_calculator = DeductionCalculator::new(self.tables);
        let credit_calculator = CreditCalculator::new(self.tables);

        // Income totals
        let total_wages = tax_return.total_wages();
        let total_self_employment_income = tax_return.total_self_employment_income();
        let gross_income = total_wages + total_self_employment_income;
        let earned_income = tax_return.earned_income();

        // Self-employment tax and above-the-line adjustments
        let se = SeTaxCalculator::new(&self.tables.se_tax)
            .calculate(total_self_employment_income);
        let student_loan_interest_deduction =
            deduction_calculator.student_loan_adjustment(&tax_return.deductions);

        let adjusted_gross_income =
            round_half_up(gross_income - se.deductible_half - student_loan_interest_deduction);

        // Deductions and taxable income
        let deductions = deduction_calculator.resolve(
            &tax_return.deductions,
            status,
            adjusted_gross_income,
            earned_income,
            tax_return.claimed_as_dependent,
        );
        let taxable_income = max(
            round_half_up(adjusted_gross_income - deductions.applied),
            Decimal::ZERO,
        );

        // Tax before credits
        let tax_before_credits = tax_from_brackets(taxable_income, self.tables.schedule(status));
        let total_tax_before_credits = round_half_up(tax_before_credits + se.tax);

        // Credits
        let ctc = credit_calculator.child_tax_credit(
            &tax_return.dependents,
            adjusted_gross_income,
            status,
        );
        let eitc = credit_calculator.earned_income_credit(
            earned_income,
            status,
            tax_return.qualifying_children(),
            tax_return.claimed_as_dependent,
        );

        // Nonrefundable CTC consumption, then the refundable remainder
        let ctc_nonrefundable_used = ctc.total.min(total_tax_before_credits);
        let tax_after_nonrefundable_credits = total_tax_before_credits - ctc_nonrefundable_used;
        let ctc_refundable = (ctc.total - ctc_nonrefundable_used).min(ctc.refundable_cap);

        let final_tax = max(
            round_half_up(tax_after_nonrefundable_credits - eitc),
            Decimal::ZERO,
        );

        // Net position: refundable credits are added back against the
        // pre-EITC tax figure.
        let total_withholding = tax_return.total_withholding();
        let net_position =
            total_withholding + ctc_refundable + eitc - tax_after_nonrefundable_credits;
        let is_refund = net_position >= Decimal::ZERO;
        let refund_or_owed = round_half_up(net_position.abs());

        TaxCalculation {
            total_wages,
            total_self_employment_income,
            gross_income,
            se_tax: se.tax,
            se_tax_deduction: se.deductible_half,
            student_loan_interest_deduction,
            adjusted_gross_income,
            standard_deduction: deductions.standard,
            itemized_deductions: deductions.itemized,
            deduction_applied: deductions.applied,
            used_itemized_deduction: deductions.used_itemized,
            taxable_income,
            tax_before_credits,
            total_tax_before_credits,
            credits: CreditSummary {
                ctc_total: ctc.total,
                ctc_refundable_cap: ctc.refundable_cap,
                ctc_nonrefundable_used,
                ctc_refundable,
                eitc,
            },
            tax_after_nonrefundable_credits,
            final_tax,
            total_withholding,
            refund_or_owed,
            is_refund,
        }
    }
}
