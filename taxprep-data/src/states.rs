//! The implemented state tax regimes.
//!
//! Ten states: two with no income tax, five flat, and three progressive.
//! Any other state code falls back to the engine's zero-tax behavior.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxprep_core::{FilingStatusTable, StateTaxBracket, StateTaxInfo, StateTaxRegime};

fn uniform(amount: Decimal) -> FilingStatusTable<Decimal> {
    FilingStatusTable {
        single: amount,
        married_filing_jointly: amount,
        head_of_household: amount,
    }
}

fn by_status(
    single: Decimal,
    married: Decimal,
    head_of_household: Decimal,
) -> FilingStatusTable<Decimal> {
    FilingStatusTable {
        single,
        married_filing_jointly: married,
        head_of_household,
    }
}

fn schedule(rows: &[(Decimal, Decimal)]) -> Vec<StateTaxBracket> {
    // rows are (lower bound, rate); the next row's bound closes the bracket.
    rows.iter()
        .enumerate()
        .map(|(i, &(min_income, tax_rate))| StateTaxBracket {
            min_income,
            max_income: rows.get(i + 1).map(|next| next.0),
            tax_rate,
        })
        .collect()
}

fn no_income_tax(
    code: &str,
    name: &str,
) -> StateTaxInfo {
    StateTaxInfo {
        code: code.to_string(),
        name: name.to_string(),
        regime: StateTaxRegime::NoIncomeTax,
        standard_deduction: uniform(dec!(0)),
        personal_exemption: uniform(dec!(0)),
        dependent_exemption: dec!(0),
    }
}

fn california() -> StateTaxInfo {
    let single = schedule(&[
        (dec!(0), dec!(0.01)),
        (dec!(10756), dec!(0.02)),
        (dec!(25499), dec!(0.04)),
        (dec!(40245), dec!(0.06)),
        (dec!(55866), dec!(0.08)),
        (dec!(70606), dec!(0.093)),
        (dec!(360659), dec!(0.103)),
        (dec!(432787), dec!(0.113)),
        (dec!(721314), dec!(0.123)),
    ]);
    let married = schedule(&[
        (dec!(0), dec!(0.01)),
        (dec!(21512), dec!(0.02)),
        (dec!(50998), dec!(0.04)),
        (dec!(80490), dec!(0.06)),
        (dec!(111732), dec!(0.08)),
        (dec!(141212), dec!(0.093)),
        (dec!(721318), dec!(0.103)),
        (dec!(865574), dec!(0.113)),
        (dec!(1442628), dec!(0.123)),
    ]);

    StateTaxInfo {
        code: "CA".to_string(),
        name: "California".to_string(),
        regime: StateTaxRegime::Progressive {
            brackets: FilingStatusTable {
                single: single.clone(),
                married_filing_jointly: married,
                head_of_household: single,
            },
        },
        standard_deduction: by_status(dec!(5540), dec!(11080), dec!(11080)),
        personal_exemption: by_status(dec!(149), dec!(298), dec!(149)),
        dependent_exemption: dec!(461),
    }
}

fn new_york() -> StateTaxInfo {
    let single = schedule(&[
        (dec!(0), dec!(0.04)),
        (dec!(8500), dec!(0.045)),
        (dec!(11700), dec!(0.0525)),
        (dec!(13900), dec!(0.055)),
        (dec!(80650), dec!(0.06)),
        (dec!(215400), dec!(0.0685)),
        (dec!(1077550), dec!(0.0965)),
    ]);
    let married = schedule(&[
        (dec!(0), dec!(0.04)),
        (dec!(17150), dec!(0.045)),
        (dec!(23600), dec!(0.0525)),
        (dec!(27900), dec!(0.055)),
        (dec!(161550), dec!(0.06)),
        (dec!(323200), dec!(0.0685)),
        (dec!(2155350), dec!(0.0965)),
    ]);
    let head_of_household = schedule(&[
        (dec!(0), dec!(0.04)),
        (dec!(12800), dec!(0.045)),
        (dec!(17650), dec!(0.0525)),
        (dec!(20900), dec!(0.055)),
        (dec!(107650), dec!(0.06)),
        (dec!(269300), dec!(0.0685)),
        (dec!(1616450), dec!(0.0965)),
    ]);

    StateTaxInfo {
        code: "NY".to_string(),
        name: "New York".to_string(),
        regime: StateTaxRegime::Progressive {
            brackets: FilingStatusTable {
                single,
                married_filing_jointly: married,
                head_of_household,
            },
        },
        standard_deduction: by_status(dec!(8000), dec!(16050), dec!(11200)),
        personal_exemption: uniform(dec!(0)),
        dependent_exemption: dec!(1000),
    }
}

fn oregon() -> StateTaxInfo {
    let single = schedule(&[
        (dec!(0), dec!(0.0475)),
        (dec!(4300), dec!(0.0675)),
        (dec!(10750), dec!(0.0875)),
        (dec!(125000), dec!(0.099)),
    ]);
    let married = schedule(&[
        (dec!(0), dec!(0.0475)),
        (dec!(8600), dec!(0.0675)),
        (dec!(21500), dec!(0.0875)),
        (dec!(250000), dec!(0.099)),
    ]);

    StateTaxInfo {
        code: "OR".to_string(),
        name: "Oregon".to_string(),
        regime: StateTaxRegime::Progressive {
            brackets: FilingStatusTable {
                single: single.clone(),
                married_filing_jointly: married,
                head_of_household: single,
            },
        },
        standard_deduction: by_status(dec!(2745), dec!(5495), dec!(4420)),
        personal_exemption: uniform(dec!(0)),
        dependent_exemption: dec!(249),
    }
}

fn flat(
    code: &str,
    name: &str,
    rate: Decimal,
    standard_deduction: FilingStatusTable<Decimal>,
    personal_exemption: FilingStatusTable<Decimal>,
    dependent_exemption: Decimal,
) -> StateTaxInfo {
    StateTaxInfo {
        code: code.to_string(),
        name: name.to_string(),
        regime: StateTaxRegime::Flat { rate },
        standard_deduction,
        personal_exemption,
        dependent_exemption,
    }
}

/// The ten implemented states.
pub fn states() -> Vec<StateTaxInfo> {
    vec![
        california(),
        new_york(),
        oregon(),
        flat(
            "IL",
            "Illinois",
            dec!(0.0495),
            uniform(dec!(0)),
            by_status(dec!(2775), dec!(5550), dec!(2775)),
            dec!(2775),
        ),
        flat(
            "PA",
            "Pennsylvania",
            dec!(0.0307),
            uniform(dec!(0)),
            uniform(dec!(0)),
            dec!(0),
        ),
        flat(
            "CO",
            "Colorado",
            dec!(0.044),
            by_status(dec!(15000), dec!(30000), dec!(22500)),
            uniform(dec!(0)),
            dec!(0),
        ),
        flat(
            "MI",
            "Michigan",
            dec!(0.0425),
            uniform(dec!(0)),
            by_status(dec!(5600), dec!(11200), dec!(5600)),
            dec!(5600),
        ),
        flat(
            "NC",
            "North Carolina",
            dec!(0.045),
            by_status(dec!(12750), dec!(25500), dec!(19125)),
            uniform(dec!(0)),
            dec!(0),
        ),
        no_income_tax("TX", "Texas"),
        no_income_tax("FL", "Florida"),
    ]
}
