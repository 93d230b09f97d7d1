use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal rate band of a progressive schedule.
///
/// Brackets for a filing status are contiguous, non-overlapping, and sorted
/// ascending; the last bracket's `max_income` is `None` (unbounded).
/// `base_tax` is the cumulative tax owed at `min_income`, kept precomputed so
/// boundary values can be cross-checked against the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}
