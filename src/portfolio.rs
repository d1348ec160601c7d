//! Multi-loan aggregation onto a shared calendar-year axis
//!
//! Each loan is simulated independently; its per-loan year indices are
//! shifted by the loan's start year and merged additively into
//! calendar-year totals. The per-loan simulations are independent, so
//! they run in parallel; the merge itself is a sequential fold in input
//! order.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::loan::LoanConfig;
use crate::simulation::{round2, simulate, SimulationResult};

/// Calendar-year totals across a batch of loans
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Summed monthly payment of all loans active in each calendar year
    pub monthly_payments: BTreeMap<i32, f64>,

    /// Summed balance-at-year-start of all loans active in each calendar year
    pub balances: BTreeMap<i32, f64>,

    /// Grand total paid across all loans, with each redirected loan's
    /// principal subtracted. Rounded to 2 decimals.
    pub total_paid: f64,
}

/// Aggregate a batch of loans into calendar-year totals.
///
/// Validation is eager and sequential so the first bad loan is reported
/// by its position in the list; the whole batch aborts on it and no
/// partial aggregate is returned.
pub fn aggregate(configs: &[LoanConfig]) -> Result<AggregateResult, ConfigError> {
    for (index, config) in configs.iter().enumerate() {
        config
            .terms
            .validate()
            .map_err(|source| ConfigError::InvalidLoan { index, source })?;
    }

    debug!("simulating {} loans", configs.len());
    let simulations: Vec<SimulationResult> = configs
        .par_iter()
        .enumerate()
        .map(|(index, config)| {
            simulate(&config.terms).map_err(|source| ConfigError::InvalidLoan { index, source })
        })
        .collect::<Result<_, _>>()?;

    let mut result = AggregateResult::default();
    let mut grand_total = 0.0;

    for (config, simulation) in configs.iter().zip(&simulations) {
        for record in &simulation.years {
            let calendar_year = config.start_year + record.year as i32 - 1;
            *result.monthly_payments.entry(calendar_year).or_insert(0.0) +=
                record.monthly_payment;
            *result.balances.entry(calendar_year).or_insert(0.0) +=
                record.balance_at_year_start;
        }

        grand_total += simulation.total_paid;
        if config.redirected {
            grand_total -= config.terms.principal;
        }
    }

    result.total_paid = round2(grand_total);
    Ok(result)
}
