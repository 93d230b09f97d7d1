mod filing_status;
mod state;
mod tax_bracket;
mod tax_calculation;
mod tax_return;
mod year_tables;

pub use filing_status::{FilingStatus, FilingStatusTable};
pub use state::{
    StateBracketDetail, StateTaxBracket, StateTaxInfo, StateTaxRegime, StateTaxResult,
};
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{CreditSummary, TaxCalculation};
pub use tax_return::{Deductions, Dependent, SelfEmploymentIncome, TaxReturn, W2Income};
pub use year_tables::{
    ChildTaxCreditParams, DependentDeductionRule, EitcParams, ItemizedDeductionLimits,
    SeTaxConfig, TableError, TaxYearTables,
};

#[cfg(test)]
pub(crate) use year_tables::fixtures;
