//! Self-employment tax.
//!
//! Net earnings are nonemployee compensation times the statutory 92.35%
//! factor (the employer-equivalent exclusion); the tax is the combined
//! Social Security and Medicare rate of 15.3% on those earnings, and half of
//! the tax is deductible above the line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::SeTaxConfig;

/// Result of a self-employment tax calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxResult {
    /// Income subject to SE tax after the net-earnings factor. Kept for
    /// transparency; not rounded.
    pub net_earnings: Decimal,

    /// Self-employment tax, rounded to cents.
    pub tax: Decimal,

    /// Deductible half of the tax, rounded to cents from the rounded tax.
    pub deductible_half: Decimal,
}

/// Calculator for self-employment tax, bound to a year's [`SeTaxConfig`].
#[derive(Debug, Clone)]
pub struct SeTaxCalculator<'a> {
    config: &'a SeTaxConfig,
}

impl<'a> SeTaxCalculator<'a> {
    pub fn new(config: &'a SeTaxConfig) -> Self {
        Self { config }
    }

    /// Computes SE tax on net self-employment income.
    ///
    /// The tax and its deductible half each round from their own exact
    /// computation. Non-positive income yields a zero result.
    pub fn calculate(
        &self,
        net_self_employment_income: Decimal,
    ) -> SeTaxResult {
        if net_self_employment_income <= Decimal::ZERO {
            if net_self_employment_income < Decimal::ZERO {
                warn!(
                    income = %net_self_employment_income,
                    "negative self-employment income; no SE tax due"
                );
            }
            return SeTaxResult::default();
        }

        let net_earnings = net_self_employment_income * self.config.net_earnings_factor;
        let tax = round_half_up(net_earnings * self.config.combined_rate);
        let deductible_half = round_half_up(tax * self.config.deduction_factor);

        SeTaxResult {
            net_earnings,
            tax,
            deductible_half,
        }
    }
}
