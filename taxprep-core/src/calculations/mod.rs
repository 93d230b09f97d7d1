//! Tax calculation modules.
//!
//! Every calculator here is pure and synchronous: identical inputs always
//! produce identical outputs, and bad numeric inputs are normalized rather
//! than rejected. The statutory constants come from an injected
//! [`TaxYearTables`](crate::models::TaxYearTables).

pub mod brackets;
pub mod common;
pub mod credits;
pub mod deductions;
pub mod federal;
pub mod self_employment;
pub mod state;

pub use brackets::tax_from_brackets;
pub use credits::{ChildTaxCredit, CreditCalculator};
pub use deductions::{DeductionCalculator, DeductionResult};
pub use federal::FederalReturnCalculator;
pub use self_employment::{SeTaxCalculator, SeTaxResult};
pub use state::StateTaxCalculator;
