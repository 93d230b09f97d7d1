//! Input records for a tax return.
//!
//! All records are plain values. Totals are derived on demand and never
//! stored; a changed return is recalculated wholesale. Constructors normalize
//! negative amounts to zero so every downstream calculation can assume
//! fully-populated, non-negative numeric fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::filing_status::FilingStatus;

fn non_negative(field: &'static str, value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, %value, "negative amount normalized to zero");
        Decimal::ZERO
    } else {
        value
    }
}

/// A W-2 wage statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2Income {
    pub employer: String,
    pub wages: Decimal,
    pub federal_withholding: Decimal,
    pub state_wages: Decimal,
    pub state_withholding: Decimal,
}

impl W2Income {
    pub fn new(
        employer: impl Into<String>,
        wages: Decimal,
        federal_withholding: Decimal,
    ) -> Self {
        let wages = non_negative("wages", wages);
        Self {
            employer: employer.into(),
            wages,
            federal_withholding: non_negative("federal_withholding", federal_withholding),
            state_wages: wages,
            state_withholding: Decimal::ZERO,
        }
    }

    pub fn with_state_amounts(
        mut self,
        state_wages: Decimal,
        state_withholding: Decimal,
    ) -> Self {
        self.state_wages = non_negative("state_wages", state_wages);
        self.state_withholding = non_negative("state_withholding", state_withholding);
        self
    }
}

/// A 1099-NEC nonemployee compensation statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentIncome {
    pub payer: String,
    pub compensation: Decimal,
}

impl SelfEmploymentIncome {
    pub fn new(payer: impl Into<String>, compensation: Decimal) -> Self {
        Self {
            payer: payer.into(),
            compensation: non_negative("compensation", compensation),
        }
    }
}

/// Raw user-entered deduction amounts plus the standard-vs-itemized choice.
///
/// Student loan interest is held here but is an above-the-line adjustment,
/// not an itemized category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub mortgage_interest: Decimal,
    pub student_loan_interest: Decimal,
    pub state_local_taxes: Decimal,
    pub charitable_contributions: Decimal,
    pub medical_expenses: Decimal,
    pub use_standard_deduction: bool,
}

impl Deductions {
    pub fn new(
        mortgage_interest: Decimal,
        student_loan_interest: Decimal,
        state_local_taxes: Decimal,
        charitable_contributions: Decimal,
        medical_expenses: Decimal,
        use_standard_deduction: bool,
    ) -> Self {
        Self {
            mortgage_interest: non_negative("mortgage_interest", mortgage_interest),
            student_loan_interest: non_negative("student_loan_interest", student_loan_interest),
            state_local_taxes: non_negative("state_local_taxes", state_local_taxes),
            charitable_contributions: non_negative(
                "charitable_contributions",
                charitable_contributions,
            ),
            medical_expenses: non_negative("medical_expenses", medical_expenses),
            use_standard_deduction,
        }
    }
}

impl Default for Deductions {
    fn default() -> Self {
        Self {
            mortgage_interest: Decimal::ZERO,
            student_loan_interest: Decimal::ZERO,
            state_local_taxes: Decimal::ZERO,
            charitable_contributions: Decimal::ZERO,
            medical_expenses: Decimal::ZERO,
            use_standard_deduction: true,
        }
    }
}

/// A claimed dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub id: u32,
    pub name: String,
    pub relationship: String,
    pub age: u8,
    pub lived_with_filer: bool,
}

impl Dependent {
    /// Whether this dependent is a qualifying child for the Child Tax
    /// Credit: under 17 at year end and lived with the filer.
    pub fn is_qualifying_child(&self) -> bool {
        self.age <= 16 && self.lived_with_filer
    }
}

/// The complete input to a federal calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturn {
    pub filing_status: FilingStatus,
    pub w2_forms: Vec<W2Income>,
    pub self_employment_forms: Vec<SelfEmploymentIncome>,
    pub deductions: Deductions,
    pub dependents: Vec<Dependent>,

    /// Whether the filer is claimed as a dependent on someone else's return.
    pub claimed_as_dependent: bool,
}

impl TaxReturn {
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            w2_forms: Vec::new(),
            self_employment_forms: Vec::new(),
            deductions: Deductions::default(),
            dependents: Vec::new(),
            claimed_as_dependent: false,
        }
    }

    pub fn total_wages(&self) -> Decimal {
        self.w2_forms.iter().map(|w2| w2.wages).sum()
    }

    pub fn total_withholding(&self) -> Decimal {
        self.w2_forms.iter().map(|w2| w2.federal_withholding).sum()
    }

    pub fn total_state_wages(&self) -> Decimal {
        self.w2_forms.iter().map(|w2| w2.state_wages).sum()
    }

    pub fn total_state_withholding(&self) -> Decimal {
        self.w2_forms.iter().map(|w2| w2.state_withholding).sum()
    }

    pub fn total_self_employment_income(&self) -> Decimal {
        self.self_employment_forms
            .iter()
            .map(|form| form.compensation)
            .sum()
    }

    /// Earned income: wages plus nonemployee compensation. Used by the EITC
    /// and the dependent-filer standard deduction rule.
    pub fn earned_income(&self) -> Decimal {
        self.total_wages() + self.total_self_employment_income()
    }

    pub fn qualifying_children(&self) -> usize {
        self.dependents
            .iter()
            .filter(|d| d.is_qualifying_child())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn child(id: u32, age: u8, lived_with_filer: bool) -> Dependent {
        Dependent {
            id,
            name: format!("Dependent {id}"),
            relationship: "child".to_string(),
            age,
            lived_with_filer,
        }
    }

    /// Installs a subscriber so normalization warnings are captured per test.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn w2_new_clamps_negative_amounts() {
        let _guard = init_test_tracing();
        let w2 = W2Income::new("Acme", dec!(-100), dec!(-50));

        assert_eq!(w2.wages, dec!(0));
        assert_eq!(w2.federal_withholding, dec!(0));
    }

    #[test]
    fn w2_defaults_state_wages_to_federal_wages() {
        let w2 = W2Income::new("Acme", dec!(50000), dec!(5000));

        assert_eq!(w2.state_wages, dec!(50000));
        assert_eq!(w2.state_withholding, dec!(0));
    }

    #[test]
    fn w2_state_amounts_can_differ_from_federal_wages() {
        let w2 = W2Income::new("Acme", dec!(50000), dec!(5000))
            .with_state_amounts(dec!(48000), dec!(1500));

        assert_eq!(w2.state_wages, dec!(48000));
        assert_eq!(w2.state_withholding, dec!(1500));
    }

    #[test]
    fn self_employment_income_clamps_negative_compensation() {
        let _guard = init_test_tracing();
        let form = SelfEmploymentIncome::new("Client", dec!(-2000));

        assert_eq!(form.compensation, dec!(0));
    }

    #[test]
    fn deductions_new_clamps_negative_amounts() {
        let _guard = init_test_tracing();
        let deductions = Deductions::new(
            dec!(-1),
            dec!(-1),
            dec!(-1),
            dec!(-1),
            dec!(-1),
            false,
        );

        assert_eq!(deductions.mortgage_interest, dec!(0));
        assert_eq!(deductions.student_loan_interest, dec!(0));
        assert_eq!(deductions.state_local_taxes, dec!(0));
        assert_eq!(deductions.charitable_contributions, dec!(0));
        assert_eq!(deductions.medical_expenses, dec!(0));
    }

    #[test]
    fn totals_sum_across_forms() {
        let mut tax_return = TaxReturn::new(FilingStatus::Single);
        tax_return.w2_forms.push(W2Income::new("A", dec!(30000), dec!(3000)));
        tax_return.w2_forms.push(W2Income::new("B", dec!(20000), dec!(2000)));
        tax_return
            .self_employment_forms
            .push(SelfEmploymentIncome::new("C", dec!(10000)));

        assert_eq!(tax_return.total_wages(), dec!(50000));
        assert_eq!(tax_return.total_withholding(), dec!(5000));
        assert_eq!(tax_return.total_state_wages(), dec!(50000));
        assert_eq!(tax_return.total_self_employment_income(), dec!(10000));
        assert_eq!(tax_return.earned_income(), dec!(60000));
    }

    #[test]
    fn qualifying_child_includes_sixteen_year_old() {
        assert!(child(1, 16, true).is_qualifying_child());
    }

    #[test]
    fn qualifying_child_excludes_seventeen_year_old() {
        assert!(!child(1, 17, true).is_qualifying_child());
    }

    #[test]
    fn qualifying_child_requires_residency() {
        assert!(!child(1, 10, false).is_qualifying_child());
    }

    #[test]
    fn qualifying_children_counts_only_qualifying_dependents() {
        let mut tax_return = TaxReturn::new(FilingStatus::HeadOfHousehold);
        tax_return.dependents = vec![
            child(1, 5, true),
            child(2, 16, true),
            child(3, 17, true),
            child(4, 12, false),
        ];

        assert_eq!(tax_return.qualifying_children(), 2);
    }
}
