//! Federal tables for tax year 2025.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxprep_core::{
    ChildTaxCreditParams, DependentDeductionRule, EitcParams, FilingStatusTable,
    ItemizedDeductionLimits, SeTaxConfig, TaxBracket, TaxYearTables,
};

fn bracket(
    min: Decimal,
    max: Option<Decimal>,
    rate: Decimal,
    base: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_income: min,
        max_income: max,
        tax_rate: rate,
        base_tax: base,
    }
}

/// 2025 Schedule X (single).
fn single_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(dec!(0), Some(dec!(11925)), dec!(0.10), dec!(0)),
        bracket(dec!(11925), Some(dec!(48475)), dec!(0.12), dec!(1192.50)),
        bracket(dec!(48475), Some(dec!(103350)), dec!(0.22), dec!(5578.50)),
        bracket(dec!(103350), Some(dec!(197300)), dec!(0.24), dec!(17651)),
        bracket(dec!(197300), Some(dec!(250525)), dec!(0.32), dec!(40199)),
        bracket(dec!(250525), Some(dec!(626350)), dec!(0.35), dec!(57231)),
        bracket(dec!(626350), None, dec!(0.37), dec!(188769.75)),
    ]
}

/// 2025 Schedule Y-1 (married filing jointly).
fn married_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(dec!(0), Some(dec!(23850)), dec!(0.10), dec!(0)),
        bracket(dec!(23850), Some(dec!(96950)), dec!(0.12), dec!(2385)),
        bracket(dec!(96950), Some(dec!(206700)), dec!(0.22), dec!(11157)),
        bracket(dec!(206700), Some(dec!(394600)), dec!(0.24), dec!(35302)),
        bracket(dec!(394600), Some(dec!(501050)), dec!(0.32), dec!(80398)),
        bracket(dec!(501050), Some(dec!(751600)), dec!(0.35), dec!(114462)),
        bracket(dec!(751600), None, dec!(0.37), dec!(202154.50)),
    ]
}

/// 2025 Schedule Z (head of household).
fn head_of_household_brackets() -> Vec<TaxBracket> {
    vec![
        bracket(dec!(0), Some(dec!(17000)), dec!(0.10), dec!(0)),
        bracket(dec!(17000), Some(dec!(64850)), dec!(0.12), dec!(1700)),
        bracket(dec!(64850), Some(dec!(103350)), dec!(0.22), dec!(7442)),
        bracket(dec!(103350), Some(dec!(197300)), dec!(0.24), dec!(15912)),
        bracket(dec!(197300), Some(dec!(250500)), dec!(0.32), dec!(38460)),
        bracket(dec!(250500), Some(dec!(626350)), dec!(0.35), dec!(55484)),
        bracket(dec!(626350), None, dec!(0.37), dec!(187031.50)),
    ]
}

fn eitc_rows(
    phase_out_start_childless: Decimal,
    phase_out_start: Decimal,
    phase_out_ends: [Decimal; 4],
) -> [EitcParams; 4] {
    [
        EitcParams {
            earned_income_threshold: dec!(8260),
            max_credit: dec!(632),
            phase_in_rate: dec!(0.0765),
            phase_out_start: phase_out_start_childless,
            phase_out_rate: dec!(0.0765),
            phase_out_end: phase_out_ends[0],
        },
        EitcParams {
            earned_income_threshold: dec!(12390),
            max_credit: dec!(4213),
            phase_in_rate: dec!(0.34),
            phase_out_start,
            phase_out_rate: dec!(0.1598),
            phase_out_end: phase_out_ends[1],
        },
        EitcParams {
            earned_income_threshold: dec!(17400),
            max_credit: dec!(6960),
            phase_in_rate: dec!(0.40),
            phase_out_start,
            phase_out_rate: dec!(0.2106),
            phase_out_end: phase_out_ends[2],
        },
        EitcParams {
            earned_income_threshold: dec!(17400),
            max_credit: dec!(7830),
            phase_in_rate: dec!(0.45),
            phase_out_start,
            phase_out_rate: dec!(0.2106),
            phase_out_end: phase_out_ends[3],
        },
    ]
}

/// The complete federal table set for tax year 2025.
pub fn year_2025() -> TaxYearTables {
    let unmarried_eitc = eitc_rows(
        dec!(10330),
        dec!(22720),
        [dec!(18591), dec!(49084), dec!(55768), dec!(59899)],
    );

    TaxYearTables {
        tax_year: 2025,
        brackets: FilingStatusTable {
            single: single_brackets(),
            married_filing_jointly: married_brackets(),
            head_of_household: head_of_household_brackets(),
        },
        standard_deduction: FilingStatusTable {
            single: dec!(15000),
            married_filing_jointly: dec!(30000),
            head_of_household: dec!(22500),
        },
        dependent_standard_deduction: DependentDeductionRule {
            minimum: dec!(1350),
            earned_income_add_on: dec!(450),
        },
        student_loan_interest_cap: dec!(2500),
        itemized: ItemizedDeductionLimits {
            salt_cap: dec!(10000),
            medical_agi_floor_rate: dec!(0.075),
        },
        se_tax: SeTaxConfig {
            net_earnings_factor: dec!(0.9235),
            combined_rate: dec!(0.153),
            deduction_factor: dec!(0.50),
        },
        child_tax_credit: ChildTaxCreditParams {
            per_child: dec!(2200),
            refundable_cap_per_child: dec!(1700),
            phase_out_step: dec!(1000),
            reduction_per_step: dec!(50),
            agi_threshold: FilingStatusTable {
                single: dec!(200000),
                married_filing_jointly: dec!(400000),
                head_of_household: dec!(200000),
            },
        },
        eitc: FilingStatusTable {
            single: unmarried_eitc.clone(),
            married_filing_jointly: eitc_rows(
                dec!(17250),
                dec!(29640),
                [dec!(25511), dec!(56004), dec!(62688), dec!(66819)],
            ),
            head_of_household: unmarried_eitc,
        },
    }
}
