//! Year-by-year output structures for loan simulations

use serde::{Deserialize, Serialize};

/// A single simulated loan year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRecord {
    /// Loan year, starting at 1
    pub year: u32,

    /// Monthly payment due during this year
    pub monthly_payment: f64,

    /// Remaining balance at the start of this year
    pub balance_at_year_start: f64,
}

/// Complete result of a single-loan simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// One record per simulated year, in chronological order
    pub years: Vec<YearRecord>,

    /// Sum of every amount actually moved: installments, interest, and
    /// applied extra repayments. Rounded to 2 decimals.
    pub total_paid: f64,

    /// Scheduled extra repayments that were never absorbed, either because
    /// the loan was already paid off or because the scheduled amount
    /// exceeded the remaining balance. Rounded to 2 decimals.
    pub unused_repayment: f64,
}

impl SimulationResult {
    pub(crate) fn new() -> Self {
        Self {
            years: Vec::new(),
            total_paid: 0.0,
            unused_repayment: 0.0,
        }
    }

    /// Append a year record
    pub(crate) fn add_year(&mut self, record: YearRecord) {
        self.years.push(record);
    }

    /// Last simulated year, if any; earlier than the loan period when
    /// extra repayments paid the loan off early
    pub fn payoff_year(&self) -> Option<u32> {
        self.years.last().map(|record| record.year)
    }
}

/// Round a monetary total to 2 decimal places
///
/// Only output totals are rounded; per-year values are accumulated
/// unrounded so rounding error never compounds.
pub(crate) fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
