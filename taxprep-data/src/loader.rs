//! CSV loading of bracket schedules.
//!
//! Bracket schedules can be maintained as CSV (one row per bracket, keyed by
//! tax year and IRS schedule code) and applied onto a [`TaxYearTables`]
//! value, replacing the schedules for the statuses present in the file.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxprep_core::{FilingStatus, TableError, TaxBracket, TaxYearTables};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when loading bracket schedule data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// The applied schedules left the table set inconsistent.
    #[error("Invalid table data: {0}")]
    Table(#[from] TableError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// Maps an IRS schedule code to a filing status.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, LoaderError> {
    match schedule {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedFilingJointly),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(LoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from a bracket schedule CSV file.
///
/// Columns:
/// - `tax_year`: the tax year (e.g., 2025)
/// - `schedule`: the IRS schedule code (X, Y-1, Z)
/// - `min_income`: the bracket's lower bound
/// - `max_income`: the bracket's upper bound (empty for unbounded)
/// - `base_tax`: cumulative tax at the lower bound
/// - `rate`: the marginal rate as a decimal (e.g., 0.10)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BracketScheduleRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedule data from CSV.
pub struct BracketScheduleLoader;

impl BracketScheduleLoader {
    /// Parses bracket records from a CSV reader.
    ///
    /// The reader can be any [`Read`] implementation, such as a file or a
    /// string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketScheduleRecord>, LoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Applies records onto a table set, replacing whole schedules.
    ///
    /// Only records whose `tax_year` matches `tables.tax_year` are used;
    /// others are skipped with a warning. Each schedule present in the
    /// records replaces that filing status's schedule wholesale (sorted by
    /// lower bound), so applying the same file twice is idempotent. The
    /// resulting table set is re-validated before this returns.
    ///
    /// Returns the number of brackets applied. On error the tables may have
    /// been partially updated and should be discarded.
    pub fn apply(
        records: &[BracketScheduleRecord],
        tables: &mut TaxYearTables,
    ) -> Result<usize, LoaderError> {
        let mut applied = 0;
        let mut replaced: Vec<FilingStatus> = Vec::new();

        for record in records {
            if record.tax_year != tables.tax_year {
                warn!(
                    record_year = record.tax_year,
                    table_year = tables.tax_year,
                    "skipping bracket record for a different tax year"
                );
                continue;
            }

            let status = schedule_to_filing_status(&record.schedule)?;
            let schedule = tables.brackets.get_mut(status);
            if !replaced.contains(&status) {
                schedule.clear();
                replaced.push(status);
            }
            schedule.push(TaxBracket {
                min_income: record.min_income,
                max_income: record.max_income,
                tax_rate: record.rate,
                base_tax: record.base_tax,
            });
            applied += 1;
        }

        for status in replaced {
            tables
                .brackets
                .get_mut(status)
                .sort_by(|a, b| a.min_income.cmp(&b.min_income));
        }

        tables.validate()?;
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::year_2025;

    const TEST_CSV: &str = "\
tax_year,schedule,min_income,max_income,base_tax,rate
2025,X,0,20000,0,0.10
2025,X,20000,,2000,0.20
2025,Y-1,0,40000,0,0.10
2025,Y-1,40000,,4000,0.20
2025,Z,0,30000,0,0.10
2025,Z,30000,,3000,0.20
";

    #[test]
    fn parse_reads_a_single_bracket() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2025,X,0,11925,0,0.10";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BracketScheduleRecord {
                tax_year: 2025,
                schedule: "X".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11925)),
                base_tax: dec!(0),
                rate: dec!(0.10),
            }
        );
    }

    #[test]
    fn parse_treats_empty_max_income_as_unbounded() {
        let csv =
            "tax_year,schedule,min_income,max_income,base_tax,rate\n2025,X,626350,,188769.75,0.37";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].base_tax, dec!(188769.75));
    }

    #[test]
    fn parse_reads_all_schedules() {
        let records = BracketScheduleLoader::parse(TEST_CSV.as_bytes()).expect("parse failed");

        assert_eq!(records.len(), 6);
        for schedule in ["X", "Y-1", "Z"] {
            let count = records.iter().filter(|r| r.schedule == schedule).count();
            assert_eq!(count, 2, "expected 2 brackets for schedule {schedule}");
        }
    }

    #[test]
    fn parse_fails_on_missing_column() {
        let csv = "tax_year,schedule,min_income\n2025,X,0";

        let err = BracketScheduleLoader::parse(csv.as_bytes()).expect_err("should fail");

        let LoaderError::CsvParse(msg) = err else {
            panic!("expected CsvParse error, got: {err:?}");
        };
        assert!(msg.contains("missing field"), "unexpected message: {msg}");
    }

    #[test]
    fn parse_fails_on_bad_decimal() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2025,X,abc,11925,0,0.10";

        let err = BracketScheduleLoader::parse(csv.as_bytes()).expect_err("should fail");

        assert!(matches!(err, LoaderError::CsvParse(_)));
    }

    #[test]
    fn parse_accepts_empty_file() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n";

        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");

        assert!(records.is_empty());
    }

    #[test]
    fn schedule_codes_map_to_filing_statuses() {
        assert_eq!(schedule_to_filing_status("X"), Ok(FilingStatus::Single));
        assert_eq!(
            schedule_to_filing_status("Y-1"),
            Ok(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            schedule_to_filing_status("Z"),
            Ok(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn unknown_schedule_code_is_rejected() {
        assert_eq!(
            schedule_to_filing_status("Y-2"),
            Err(LoaderError::InvalidSchedule("Y-2".to_string()))
        );
    }

    #[test]
    fn apply_replaces_schedules_wholesale() {
        let records = BracketScheduleLoader::parse(TEST_CSV.as_bytes()).expect("parse failed");
        let mut tables = year_2025();

        let applied = BracketScheduleLoader::apply(&records, &mut tables).expect("apply failed");

        assert_eq!(applied, 6);
        assert_eq!(tables.schedule(FilingStatus::Single).len(), 2);
        assert_eq!(
            tables.schedule(FilingStatus::Single)[1].base_tax,
            dec!(2000)
        );
    }

    #[test]
    fn apply_is_idempotent() {
        let records = BracketScheduleLoader::parse(TEST_CSV.as_bytes()).expect("parse failed");
        let mut tables = year_2025();

        BracketScheduleLoader::apply(&records, &mut tables).expect("first apply failed");
        BracketScheduleLoader::apply(&records, &mut tables).expect("second apply failed");

        assert_eq!(tables.schedule(FilingStatus::Single).len(), 2);
    }

    #[test]
    fn apply_skips_records_for_other_years() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2024,X,0,,0,0.10";
        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");
        let mut tables = year_2025();

        let applied = BracketScheduleLoader::apply(&records, &mut tables).expect("apply failed");

        assert_eq!(applied, 0);
        assert_eq!(tables.schedule(FilingStatus::Single).len(), 7);
    }

    #[test]
    fn apply_rejects_unknown_schedule() {
        let csv = "tax_year,schedule,min_income,max_income,base_tax,rate\n2025,Q,0,,0,0.10";
        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");
        let mut tables = year_2025();

        let err = BracketScheduleLoader::apply(&records, &mut tables).expect_err("should fail");

        assert_eq!(err, LoaderError::InvalidSchedule("Q".to_string()));
    }

    #[test]
    fn apply_rejects_inconsistent_schedule() {
        // Base tax of the second bracket disagrees with the first.
        let csv = "\
tax_year,schedule,min_income,max_income,base_tax,rate
2025,X,0,20000,0,0.10
2025,X,20000,,9999,0.20
";
        let records = BracketScheduleLoader::parse(csv.as_bytes()).expect("parse failed");
        let mut tables = year_2025();

        let err = BracketScheduleLoader::apply(&records, &mut tables).expect_err("should fail");

        assert!(matches!(err, LoaderError::Table(_)));
    }
}
