pub mod calculations;
pub mod models;

pub use calculations::{
    ChildTaxCredit, CreditCalculator, DeductionCalculator, DeductionResult,
    FederalReturnCalculator, SeTaxCalculator, SeTaxResult, StateTaxCalculator, tax_from_brackets,
};
pub use models::*;
