//! Standard and itemized deductions, and the above-the-line student loan
//! interest adjustment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::models::{Deductions, FilingStatus, TaxYearTables};

/// Both deduction amounts plus the one actually applied.
///
/// The resolver honors the filer's explicit standard-vs-itemized choice;
/// recommending the larger amount is a presentation concern, which is why
/// both figures are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    pub standard: Decimal,
    pub itemized: Decimal,
    pub applied: Decimal,
    pub used_itemized: bool,
}

/// Calculator for deductions, bound to a year's tables.
#[derive(Debug, Clone)]
pub struct DeductionCalculator<'a> {
    tables: &'a TaxYearTables,
}

impl<'a> DeductionCalculator<'a> {
    pub fn new(tables: &'a TaxYearTables) -> Self {
        Self { tables }
    }

    /// The standard deduction for the filer.
    ///
    /// Filers claimed as someone else's dependent get the greater of the
    /// fixed minimum or earned income plus the add-on, capped at the full
    /// amount for their status.
    pub fn standard_deduction(
        &self,
        status: FilingStatus,
        earned_income: Decimal,
        claimed_as_dependent: bool,
    ) -> Decimal {
        let full = self.tables.full_standard_deduction(status);
        if !claimed_as_dependent {
            return full;
        }

        let rule = &self.tables.dependent_standard_deduction;
        let earned = max(earned_income, Decimal::ZERO);
        let amount = max(rule.minimum, earned + rule.earned_income_add_on);
        round_half_up(amount.min(full))
    }

    /// Total itemized deductions at a given AGI.
    ///
    /// Mortgage interest and charitable contributions are uncapped,
    /// state/local taxes are capped, and medical expenses count only above
    /// the AGI floor. Student loan interest is not an itemized category.
    pub fn itemized_deductions(
        &self,
        deductions: &Deductions,
        agi: Decimal,
    ) -> Decimal {
        let limits = &self.tables.itemized;

        let mortgage = max(deductions.mortgage_interest, Decimal::ZERO);
        let salt = max(deductions.state_local_taxes, Decimal::ZERO).min(limits.salt_cap);
        let charitable = max(deductions.charitable_contributions, Decimal::ZERO);

        let medical_floor = max(agi, Decimal::ZERO) * limits.medical_agi_floor_rate;
        let medical = max(deductions.medical_expenses - medical_floor, Decimal::ZERO);

        round_half_up(mortgage + salt + charitable + medical)
    }

    /// The capped above-the-line student loan interest adjustment.
    pub fn student_loan_adjustment(
        &self,
        deductions: &Deductions,
    ) -> Decimal {
        let interest = max(deductions.student_loan_interest, Decimal::ZERO);
        round_half_up(interest.min(self.tables.student_loan_interest_cap))
    }

    /// Computes both deduction amounts and applies the filer's choice.
    pub fn resolve(
        &self,
        deductions: &Deductions,
        status: FilingStatus,
        agi: Decimal,
        earned_income: Decimal,
        claimed_as_dependent: bool,
    ) -> DeductionResult {
        let standard = self.standard_deduction(status, earned_income, claimed_as_dependent);
        let itemized = self.itemized_deductions(deductions, agi);
        let used_itemized = !deductions.use_standard_deduction;
        let applied = if used_itemized { itemized } else { standard };

        DeductionResult {
            standard,
            itemized,
            applied,
            used_itemized,
        }
    }
}
