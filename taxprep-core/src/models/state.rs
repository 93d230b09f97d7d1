//! State tax configuration and results, structurally parallel to the federal
//! model but keyed by state code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::filing_status::FilingStatusTable;

/// One marginal band of a state's progressive schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

/// How a state taxes income. Dispatch happens once, at the top of the
/// state-tax entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateTaxRegime {
    /// The state levies no individual income tax.
    NoIncomeTax,

    /// A single rate on taxable income.
    Flat { rate: Decimal },

    /// A bracket schedule per filing status.
    Progressive {
        brackets: FilingStatusTable<Vec<StateTaxBracket>>,
    },
}

/// Per-state configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxInfo {
    /// Two-letter postal code, upper case.
    pub code: String,
    pub name: String,
    pub regime: StateTaxRegime,
    pub standard_deduction: FilingStatusTable<Decimal>,
    pub personal_exemption: FilingStatusTable<Decimal>,
    pub dependent_exemption: Decimal,
}

/// Tax attributable to one bracket of a progressive state schedule, kept for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBracketDetail {
    pub rate: Decimal,
    pub taxable_in_bracket: Decimal,
    pub tax: Decimal,
}

/// The computed state-level result.
///
/// Unlike the federal result, `refund_or_owed` is signed: positive means the
/// filer owes, negative means a refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    pub state_code: String,
    pub taxable_income: Decimal,
    pub tax_owed: Decimal,
    pub withholding: Decimal,
    pub refund_or_owed: Decimal,
    pub effective_rate: Decimal,
    pub bracket_details: Vec<StateBracketDetail>,
}
