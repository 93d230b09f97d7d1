use serde::{Deserialize, Serialize};

/// Filing status of the taxpayer. Selects the column of every rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            "HOH" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }

    pub fn all() -> [FilingStatus; 3] {
        [
            Self::Single,
            Self::MarriedFilingJointly,
            Self::HeadOfHousehold,
        ]
    }
}

/// A value per filing status.
///
/// Lookups are an exhaustive match on [`FilingStatus`], so adding a status is
/// a compile-time hole rather than a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatusTable<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub head_of_household: T,
}

impl<T> FilingStatusTable<T> {
    pub fn get(&self, status: FilingStatus) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn get_mut(&mut self, status: FilingStatus) -> &mut T {
        match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedFilingJointly => &mut self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
        }
    }
}
