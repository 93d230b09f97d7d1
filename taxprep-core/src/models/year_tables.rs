//! Versioned tax-year configuration.
//!
//! All statutory constants the engine needs for one tax year live in a single
//! [`TaxYearTables`] value. The tables are injected into the calculators at
//! construction and swapped as a unit to compute against a different year;
//! nothing in the engine reads hidden global state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::filing_status::{FilingStatus, FilingStatusTable};
use crate::models::tax_bracket::TaxBracket;

/// Errors produced when validating an injected [`TaxYearTables`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A filing status has no brackets at all.
    #[error("bracket schedule for {status} is empty")]
    EmptySchedule { status: &'static str },

    /// The first bracket of a schedule does not start at zero.
    #[error("bracket schedule for {status} must start at 0, got {min}")]
    ScheduleStart { status: &'static str, min: Decimal },

    /// Adjacent brackets leave a gap or overlap.
    #[error("bracket schedule for {status} is not contiguous at {min}")]
    ScheduleGap { status: &'static str, min: Decimal },

    /// Any bracket other than the last must have an upper bound.
    #[error("bracket schedule for {status} has an unbounded bracket before the last")]
    UnboundedInterior { status: &'static str },

    /// The last bracket must be unbounded.
    #[error("bracket schedule for {status} must end with an unbounded bracket")]
    BoundedFinal { status: &'static str },

    /// A marginal rate outside [0, 1].
    #[error("tax rate {rate} out of range in schedule for {status}")]
    RateOutOfRange { status: &'static str, rate: Decimal },

    /// A bracket's precomputed base tax disagrees with the cumulative tax
    /// at its lower bound.
    #[error("base tax mismatch for {status} at {min}: expected {expected}, got {actual}")]
    BaseTaxMismatch {
        status: &'static str,
        min: Decimal,
        expected: Decimal,
        actual: Decimal,
    },

    /// A configured amount that must be non-negative is negative.
    #[error("configured amount '{name}' must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// A configured rate or factor outside its valid range.
    #[error("configured rate '{name}' must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// EITC row parameters out of order (threshold, phase-out start, end).
    #[error("EITC row for {status} with {children} children is out of order")]
    EitcRowOrder {
        status: &'static str,
        children: usize,
    },
}

/// Self-employment tax constants.
///
/// The engine applies the simplified combined statute: net earnings are
/// income times `net_earnings_factor`, taxed at `combined_rate`, and
/// `deduction_factor` of the tax is deductible above the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxConfig {
    /// Portion of self-employment income subject to SE tax. Typically 92.35%.
    pub net_earnings_factor: Decimal,

    /// Combined Social Security + Medicare rate. Typically 15.3%.
    pub combined_rate: Decimal,

    /// Deductible portion of the computed tax. Typically 50%.
    pub deduction_factor: Decimal,
}

/// Standard deduction rule for filers claimed as someone else's dependent:
/// the greater of `minimum` or earned income plus `earned_income_add_on`,
/// capped at the full standard deduction for the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentDeductionRule {
    pub minimum: Decimal,
    pub earned_income_add_on: Decimal,
}

/// Caps and floors applied to itemized deduction categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemizedDeductionLimits {
    /// Ceiling on the state-and-local-tax deduction.
    pub salt_cap: Decimal,

    /// Medical expenses count only above this fraction of AGI.
    pub medical_agi_floor_rate: Decimal,
}

/// Child Tax Credit parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxCreditParams {
    /// Credit per qualifying child before phase-out.
    pub per_child: Decimal,

    /// Refundable ceiling per qualifying child (the ACTC cap).
    pub refundable_cap_per_child: Decimal,

    /// AGI above the threshold is measured in steps of this size.
    pub phase_out_step: Decimal,

    /// Credit reduction per (partial or full) step of excess AGI.
    pub reduction_per_step: Decimal,

    /// AGI threshold where phase-out begins, per filing status.
    pub agi_threshold: FilingStatusTable<Decimal>,
}

/// One row of the Earned Income Tax Credit table: the parameters for a
/// (filing status, qualifying-child count) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EitcParams {
    /// Earned income where the phase-in ends and the plateau begins.
    pub earned_income_threshold: Decimal,

    /// Plateau credit amount.
    pub max_credit: Decimal,

    /// Credit earned per dollar during phase-in.
    pub phase_in_rate: Decimal,

    /// Earned income where the phase-out begins.
    pub phase_out_start: Decimal,

    /// Credit lost per dollar past `phase_out_start`.
    pub phase_out_rate: Decimal,

    /// Earned income at or beyond which the credit is zero.
    pub phase_out_end: Decimal,
}

/// Complete statutory table set for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub tax_year: i32,

    /// Progressive bracket schedule per filing status.
    pub brackets: FilingStatusTable<Vec<TaxBracket>>,

    /// Full standard deduction per filing status.
    pub standard_deduction: FilingStatusTable<Decimal>,

    /// Standard deduction rule for dependent filers.
    pub dependent_standard_deduction: DependentDeductionRule,

    /// Ceiling on the above-the-line student loan interest adjustment.
    pub student_loan_interest_cap: Decimal,

    pub itemized: ItemizedDeductionLimits,
    pub se_tax: SeTaxConfig,
    pub child_tax_credit: ChildTaxCreditParams,

    /// EITC rows indexed by qualifying-child count (0 through 3).
    pub eitc: FilingStatusTable<[EitcParams; 4]>,
}

impl TaxYearTables {
    /// The bracket schedule for a filing status.
    pub fn schedule(&self, status: FilingStatus) -> &[TaxBracket] {
        self.brackets.get(status)
    }

    /// The full (non-dependent) standard deduction for a filing status.
    pub fn full_standard_deduction(&self, status: FilingStatus) -> Decimal {
        *self.standard_deduction.get(status)
    }

    /// The EITC row for a filing status and qualifying-child count.
    ///
    /// Counts above three use the three-child row.
    pub fn eitc_params(&self, status: FilingStatus, children: usize) -> &EitcParams {
        &self.eitc.get(status)[children.min(3)]
    }

    /// Validates the whole table set.
    ///
    /// Checks every bracket schedule (contiguous, ascending from zero, last
    /// bracket unbounded, rates in range, base tax consistent with the
    /// cumulative tax at each lower bound), every configured amount and
    /// rate, and the ordering of every EITC row.
    pub fn validate(&self) -> Result<(), TableError> {
        for status in FilingStatus::all() {
            validate_schedule(status.as_str(), self.brackets.get(status))?;

            let deduction = *self.standard_deduction.get(status);
            if deduction < Decimal::ZERO {
                return Err(TableError::NegativeAmount {
                    name: "standard_deduction",
                    value: deduction,
                });
            }

            let threshold = *self.child_tax_credit.agi_threshold.get(status);
            if threshold < Decimal::ZERO {
                return Err(TableError::NegativeAmount {
                    name: "child_tax_credit.agi_threshold",
                    value: threshold,
                });
            }

            for (children, row) in self.eitc.get(status).iter().enumerate() {
                validate_eitc_row(status.as_str(), children, row)?;
            }
        }

        check_amount(
            "dependent_standard_deduction.minimum",
            self.dependent_standard_deduction.minimum,
        )?;
        check_amount(
            "dependent_standard_deduction.earned_income_add_on",
            self.dependent_standard_deduction.earned_income_add_on,
        )?;
        check_amount("student_loan_interest_cap", self.student_loan_interest_cap)?;
        check_amount("itemized.salt_cap", self.itemized.salt_cap)?;
        check_rate(
            "itemized.medical_agi_floor_rate",
            self.itemized.medical_agi_floor_rate,
        )?;

        check_rate("se_tax.net_earnings_factor", self.se_tax.net_earnings_factor)?;
        check_rate("se_tax.combined_rate", self.se_tax.combined_rate)?;
        check_rate("se_tax.deduction_factor", self.se_tax.deduction_factor)?;

        check_amount("child_tax_credit.per_child", self.child_tax_credit.per_child)?;
        check_amount(
            "child_tax_credit.refundable_cap_per_child",
            self.child_tax_credit.refundable_cap_per_child,
        )?;
        check_amount(
            "child_tax_credit.reduction_per_step",
            self.child_tax_credit.reduction_per_step,
        )?;
        if self.child_tax_credit.phase_out_step <= Decimal::ZERO {
            return Err(TableError::NegativeAmount {
                name: "child_tax_credit.phase_out_step",
                value: self.child_tax_credit.phase_out_step,
            });
        }

        Ok(())
    }
}

fn check_amount(name: &'static str, value: Decimal) -> Result<(), TableError> {
    if value < Decimal::ZERO {
        return Err(TableError::NegativeAmount { name, value });
    }
    Ok(())
}

fn check_rate(name: &'static str, value: Decimal) -> Result<(), TableError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TableError::InvalidRate { name, value });
    }
    Ok(())
}

fn validate_schedule(status: &'static str, brackets: &[TaxBracket]) -> Result<(), TableError> {
    let Some(first) = brackets.first() else {
        return Err(TableError::EmptySchedule { status });
    };
    if first.min_income != Decimal::ZERO {
        return Err(TableError::ScheduleStart {
            status,
            min: first.min_income,
        });
    }

    let mut expected_base = Decimal::ZERO;
    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(TableError::RateOutOfRange {
                status,
                rate: bracket.tax_rate,
            });
        }
        if bracket.base_tax != expected_base {
            return Err(TableError::BaseTaxMismatch {
                status,
                min: bracket.min_income,
                expected: expected_base,
                actual: bracket.base_tax,
            });
        }

        let last = i == brackets.len() - 1;
        match bracket.max_income {
            None if !last => return Err(TableError::UnboundedInterior { status }),
            None => {}
            Some(_) if last => return Err(TableError::BoundedFinal { status }),
            Some(max) => {
                if max <= bracket.min_income {
                    return Err(TableError::ScheduleGap {
                        status,
                        min: bracket.min_income,
                    });
                }
                if brackets[i + 1].min_income != max {
                    return Err(TableError::ScheduleGap {
                        status,
                        min: brackets[i + 1].min_income,
                    });
                }
                expected_base += (max - bracket.min_income) * bracket.tax_rate;
            }
        }
    }

    Ok(())
}

fn validate_eitc_row(
    status: &'static str,
    children: usize,
    row: &EitcParams,
) -> Result<(), TableError> {
    check_amount("eitc.earned_income_threshold", row.earned_income_threshold)?;
    check_amount("eitc.max_credit", row.max_credit)?;
    check_rate("eitc.phase_in_rate", row.phase_in_rate)?;
    check_rate("eitc.phase_out_rate", row.phase_out_rate)?;
    if row.earned_income_threshold > row.phase_out_start
        || row.phase_out_start > row.phase_out_end
    {
        return Err(TableError::EitcRowOrder { status, children });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::fixtures::test_tables;
    use super::*;

    #[test]
    fn validate_accepts_test_tables() {
        assert_eq!(test_tables().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_empty_schedule() {
        let mut tables = test_tables();
        tables.brackets.single.clear();

        assert_eq!(
            tables.validate(),
            Err(TableError::EmptySchedule { status: "S" })
        );
    }

    #[test]
    fn validate_rejects_schedule_not_starting_at_zero() {
        let mut tables = test_tables();
        tables.brackets.single[0].min_income = dec!(100);

        assert_eq!(
            tables.validate(),
            Err(TableError::ScheduleStart {
                status: "S",
                min: dec!(100),
            })
        );
    }

    #[test]
    fn validate_rejects_gap_between_brackets() {
        let mut tables = test_tables();
        tables.brackets.single[1].min_income = dec!(12000);

        assert_eq!(
            tables.validate(),
            Err(TableError::ScheduleGap {
                status: "S",
                min: dec!(12000),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_final_bracket() {
        let mut tables = test_tables();
        tables.brackets.head_of_household[2].max_income = Some(dec!(1000000));

        assert_eq!(
            tables.validate(),
            Err(TableError::BoundedFinal { status: "HOH" })
        );
    }

    #[test]
    fn validate_rejects_unbounded_interior_bracket() {
        let mut tables = test_tables();
        tables.brackets.single[0].max_income = None;

        assert_eq!(
            tables.validate(),
            Err(TableError::UnboundedInterior { status: "S" })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut tables = test_tables();
        tables.brackets.married_filing_jointly[2].tax_rate = dec!(1.5);

        assert_eq!(
            tables.validate(),
            Err(TableError::RateOutOfRange {
                status: "MFJ",
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn validate_rejects_base_tax_mismatch() {
        let mut tables = test_tables();
        tables.brackets.single[1].base_tax = dec!(999);

        assert_eq!(
            tables.validate(),
            Err(TableError::BaseTaxMismatch {
                status: "S",
                min: dec!(10000),
                expected: dec!(1000),
                actual: dec!(999),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_salt_cap() {
        let mut tables = test_tables();
        tables.itemized.salt_cap = dec!(-1);

        assert_eq!(
            tables.validate(),
            Err(TableError::NegativeAmount {
                name: "itemized.salt_cap",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_se_factor_above_one() {
        let mut tables = test_tables();
        tables.se_tax.net_earnings_factor = dec!(1.5);

        assert_eq!(
            tables.validate(),
            Err(TableError::InvalidRate {
                name: "se_tax.net_earnings_factor",
                value: dec!(1.5),
            })
        );
    }

    #[test]
    fn validate_rejects_eitc_row_out_of_order() {
        let mut tables = test_tables();
        tables.eitc.single[2].phase_out_start = dec!(1);

        assert_eq!(
            tables.validate(),
            Err(TableError::EitcRowOrder {
                status: "S",
                children: 2,
            })
        );
    }

    #[test]
    fn eitc_params_clamps_child_count_to_three() {
        let tables = test_tables();

        assert_eq!(
            tables.eitc_params(FilingStatus::Single, 5),
            tables.eitc_params(FilingStatus::Single, 3)
        );
    }
}
