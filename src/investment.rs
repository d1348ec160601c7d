//! Investment growth projection with annual top-ups and interest tax
//!
//! A top-up is a target balance for the year, not a deposit amount: only
//! the shortfall between the target and the current balance is deposited.
//! Interest is credited net of the yearly tax and compounds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInput;
use crate::simulation::round2;

/// Terms of an investment projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentTerms {
    /// Capital invested before year 1
    pub initial_capital: f64,

    /// Annual interest rate as a fraction between 0 and 1
    pub interest_rate: f64,

    /// Tax applied to each year's interest, as a fraction between 0 and 1
    pub yearly_tax: f64,

    /// Projection period in years; zero is a valid, empty projection
    pub period_years: u32,

    /// Target balances keyed by year; the shortfall is deposited at the
    /// start of that year
    #[serde(default)]
    pub top_ups: BTreeMap<u32, f64>,
}

impl InvestmentTerms {
    /// Terms with no top-ups
    pub fn new(initial_capital: f64, interest_rate: f64, yearly_tax: f64, period_years: u32) -> Self {
        Self {
            initial_capital,
            interest_rate,
            yearly_tax,
            period_years,
            top_ups: BTreeMap::new(),
        }
    }

    /// Same terms with the given top-up targets
    pub fn with_top_ups(mut self, top_ups: BTreeMap<u32, f64>) -> Self {
        self.top_ups = top_ups;
        self
    }

    /// Check every term invariant, reporting the first violation
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.initial_capital.is_finite() {
            return Err(InvalidInput::NonFinite("initial capital"));
        }
        if self.initial_capital < 0.0 {
            return Err(InvalidInput::NegativeCapital(self.initial_capital));
        }
        if !self.interest_rate.is_finite() || !(0.0..=1.0).contains(&self.interest_rate) {
            return Err(InvalidInput::InterestRateOutOfRange(self.interest_rate));
        }
        if !self.yearly_tax.is_finite() || !(0.0..=1.0).contains(&self.yearly_tax) {
            return Err(InvalidInput::TaxRateOutOfRange(self.yearly_tax));
        }
        for (&year, &target) in &self.top_ups {
            if !target.is_finite() || target < 0.0 {
                return Err(InvalidInput::InvalidTopUp { year, target });
            }
        }
        Ok(())
    }
}

/// Totals of an investment projection, all rounded to 2 decimals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResult {
    /// Sum of all shortfall deposits
    pub total_topped_up: f64,

    /// Sum of all net interest credited
    pub total_interest: f64,

    /// Balance after the final year
    pub final_balance: f64,
}

/// Project investment growth year by year.
pub fn project(terms: &InvestmentTerms) -> Result<InvestmentResult, InvalidInput> {
    terms.validate()?;

    let mut balance = terms.initial_capital;
    let mut total_topped_up = 0.0;
    let mut total_interest = 0.0;

    for year in 1..=terms.period_years {
        if let Some(&target) = terms.top_ups.get(&year) {
            let top_up = (target - balance).max(0.0);
            total_topped_up += top_up;
            balance += top_up;
        }

        let net_interest = balance * terms.interest_rate * (1.0 - terms.yearly_tax);
        total_interest += net_interest;
        balance += net_interest;
    }

    Ok(InvestmentResult {
        total_topped_up: round2(total_topped_up),
        total_interest: round2(total_interest),
        final_balance: round2(balance),
    })
}
