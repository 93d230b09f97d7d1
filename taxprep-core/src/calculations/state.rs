//! State income tax estimation.
//!
//! Each state is configured as one of three regimes (no income tax, flat
//! rate, progressive schedule); dispatch happens once at the top of the
//! entry point. Unknown state codes degrade to the no-tax result — a known
//! simplification for states outside the configured set, not a statement
//! that the state levies no income tax.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{max, round_half_up};
use crate::models::{
    FilingStatus, StateBracketDetail, StateTaxBracket, StateTaxInfo, StateTaxRegime,
    StateTaxResult,
};

/// Calculator over a configured set of states.
#[derive(Debug, Clone)]
pub struct StateTaxCalculator<'a> {
    states: &'a [StateTaxInfo],
}

impl<'a> StateTaxCalculator<'a> {
    pub fn new(states: &'a [StateTaxInfo]) -> Self {
        Self { states }
    }

    /// Looks up a state by code, case-insensitively.
    pub fn find(
        &self,
        code: &str,
    ) -> Option<&'a StateTaxInfo> {
        self.states.iter().find(|s| s.code.eq_ignore_ascii_case(code))
    }

    /// Computes the state-level result from the federal AGI and the state
    /// amounts reported on the filer's W-2s.
    ///
    /// The returned `refund_or_owed` is signed: positive means the filer
    /// owes, negative means a refund. The effective rate divides the tax by
    /// the state wages when they are positive.
    pub fn calculate(
        &self,
        state_code: &str,
        status: FilingStatus,
        federal_agi: Decimal,
        state_wages: Decimal,
        state_withholding: Decimal,
        num_dependents: usize,
    ) -> StateTaxResult {
        let withholding = max(state_withholding, Decimal::ZERO);

        let Some(info) = self.find(state_code) else {
            warn!(
                state = %state_code,
                "unknown state code treated as no income tax"
            );
            return no_tax_result(state_code.to_ascii_uppercase(), withholding);
        };

        match &info.regime {
            StateTaxRegime::NoIncomeTax => no_tax_result(info.code.clone(), withholding),
            StateTaxRegime::Flat { rate } => {
                let taxable = taxable_income(info, status, federal_agi, num_dependents);
                let tax = round_half_up(taxable * rate);
                result(info, taxable, tax, Vec::new(), state_wages, withholding)
            }
            StateTaxRegime::Progressive { brackets } => {
                let taxable = taxable_income(info, status, federal_agi, num_dependents);
                let (tax, details) = progressive_tax(taxable, brackets.get(status));
                result(info, taxable, tax, details, state_wages, withholding)
            }
        }
    }
}

/// Taxable income under a state's deduction and exemption rules.
fn taxable_income(
    info: &StateTaxInfo,
    status: FilingStatus,
    federal_agi: Decimal,
    num_dependents: usize,
) -> Decimal {
    let reductions = *info.standard_deduction.get(status)
        + *info.personal_exemption.get(status)
        + Decimal::from(num_dependents as u64) * info.dependent_exemption;
    max(round_half_up(federal_agi - reductions), Decimal::ZERO)
}

/// Walks a state's progressive schedule, keeping per-bracket detail for
/// display. Same bottom-up fill as the federal bracket walk.
fn progressive_tax(
    taxable_income: Decimal,
    brackets: &[StateTaxBracket],
) -> (Decimal, Vec<StateBracketDetail>) {
    if taxable_income <= Decimal::ZERO {
        return (Decimal::ZERO, Vec::new());
    }

    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;
    let mut details = Vec::new();

    for bracket in brackets {
        let width = match bracket.max_income {
            Some(max_income) => max_income - bracket.min_income,
            None => remaining,
        };
        let portion = remaining.min(width);
        let bracket_tax = portion * bracket.tax_rate;
        tax += bracket_tax;
        details.push(StateBracketDetail {
            rate: bracket.tax_rate,
            taxable_in_bracket: portion,
            tax: round_half_up(bracket_tax),
        });
        remaining -= portion;
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    (round_half_up(tax), details)
}

fn no_tax_result(
    state_code: String,
    withholding: Decimal,
) -> StateTaxResult {
    StateTaxResult {
        state_code,
        taxable_income: Decimal::ZERO,
        tax_owed: Decimal::ZERO,
        withholding,
        refund_or_owed: round_half_up(-withholding),
        effective_rate: Decimal::ZERO,
        bracket_details: Vec::new(),
    }
}

fn result(
    info: &StateTaxInfo,
    taxable_income: Decimal,
    tax_owed: Decimal,
    bracket_details: Vec<StateBracketDetail>,
    state_wages: Decimal,
    withholding: Decimal,
) -> StateTaxResult {
    let effective_rate = if state_wages > Decimal::ZERO {
        tax_owed / state_wages
    } else {
        Decimal::ZERO
    };

    StateTaxResult {
        state_code: info.code.clone(),
        taxable_income,
        tax_owed,
        withholding,
        refund_or_owed: round_half_up(tax_owed - withholding),
        effective_rate,
        bracket_details,
    }
}
