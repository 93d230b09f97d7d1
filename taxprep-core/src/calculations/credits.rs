//! Child Tax Credit and Earned Income Tax Credit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::models::{Dependent, FilingStatus, TaxYearTables};

/// Child Tax Credit amounts, with intermediates kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCredit {
    pub qualifying_children: u32,

    /// Credit before phase-out.
    pub base_credit: Decimal,

    /// Reduction from AGI above the threshold.
    pub phase_out_reduction: Decimal,

    /// Credit after phase-out. Never negative.
    pub total: Decimal,

    /// Ceiling on the refundable portion: the per-child refundable cap,
    /// evaluated against the post-phase-out credit.
    pub refundable_cap: Decimal,
}

/// Calculator for credits, bound to a year's tables.
#[derive(Debug, Clone)]
pub struct CreditCalculator<'a> {
    tables: &'a TaxYearTables,
}

impl<'a> CreditCalculator<'a> {
    pub fn new(tables: &'a TaxYearTables) -> Self {
        Self { tables }
    }

    /// Computes the Child Tax Credit.
    ///
    /// Qualifying children are dependents under 17 who lived with the filer.
    /// AGI above the filing-status threshold reduces the credit per step of
    /// excess, with any partial step counting as a full one.
    pub fn child_tax_credit(
        &self,
        dependents: &[Dependent],
        agi: Decimal,
        status: FilingStatus,
    ) -> ChildTaxCredit {
        let params = &self.tables.child_tax_credit;
        let children = dependents.iter().filter(|d| d.is_qualifying_child()).count();
        let children_amount = Decimal::from(children as u64);

        let base_credit = children_amount * params.per_child;

        let excess = agi - *params.agi_threshold.get(status);
        let phase_out_reduction = if excess > Decimal::ZERO {
            (excess / params.phase_out_step).ceil() * params.reduction_per_step
        } else {
            Decimal::ZERO
        };

        let total = round_half_up(max(base_credit - phase_out_reduction, Decimal::ZERO));
        let refundable_cap = total.min(children_amount * params.refundable_cap_per_child);

        ChildTaxCredit {
            qualifying_children: children as u32,
            base_credit,
            phase_out_reduction,
            total,
            refundable_cap,
        }
    }

    /// Computes the Earned Income Tax Credit.
    ///
    /// Filers claimed as a dependent are ineligible. The parameter row is
    /// looked up by filing status and qualifying-child count (counts above
    /// three use the three-child row). The credit phases in at
    /// `phase_in_rate` up to the earned income threshold, plateaus at the
    /// maximum, and phases out past `phase_out_start`; income beyond
    /// `phase_out_end` gets nothing.
    pub fn earned_income_credit(
        &self,
        earned_income: Decimal,
        status: FilingStatus,
        qualifying_children: usize,
        claimed_as_dependent: bool,
    ) -> Decimal {
        if claimed_as_dependent {
            return Decimal::ZERO;
        }

        let params = self.tables.eitc_params(status, qualifying_children);
        let earned = max(earned_income, Decimal::ZERO);

        if earned > params.phase_out_end {
            return Decimal::ZERO;
        }

        let mut credit = if earned <= params.earned_income_threshold {
            earned * params.phase_in_rate
        } else {
            params.max_credit
        };

        if earned > params.phase_out_start {
            credit -= (earned - params.phase_out_start) * params.phase_out_rate;
        }

        round_half_up(max(credit, Decimal::ZERO))
    }
}
