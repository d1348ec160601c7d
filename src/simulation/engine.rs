//! Year-loop simulator for a single loan

use crate::errors::InvalidInput;
use crate::loan::LoanTerms;

use super::schedule::{round2, SimulationResult, YearRecord};

/// Simulate a loan year by year.
///
/// Each year pays the fixed annual installment plus interest on the
/// balance at year start, then applies any extra repayment scheduled for
/// that year, capped at the remaining balance. The loop stops early the
/// moment the balance reaches exactly zero; scheduled amounts past that
/// point count entirely as unused.
///
/// # Arguments
/// * `terms` - Loan terms, validated eagerly before any work
///
/// # Returns
/// * One `YearRecord` per simulated year plus totals, or `InvalidInput`
///   when any term invariant is violated
pub fn simulate(terms: &LoanTerms) -> Result<SimulationResult, InvalidInput> {
    terms.validate()?;

    let installment = terms.installment();
    let mut balance = terms.principal;
    let mut total_paid = 0.0;
    let mut unused_repayment = 0.0;
    let mut result = SimulationResult::new();

    for year in 1..=terms.period_years {
        let balance_at_year_start = balance;
        let principal_due = installment.min(balance);
        let monthly_payment = (balance * terms.interest_rate + principal_due) / 12.0;

        balance -= principal_due;
        total_paid += monthly_payment * 12.0;

        if let Some(&scheduled) = terms.repayments.get(&year) {
            let applied = scheduled.min(balance);
            balance -= applied;
            total_paid += applied;
            unused_repayment += scheduled - applied;
        }

        result.add_year(YearRecord {
            year,
            monthly_payment,
            balance_at_year_start,
        });

        if balance == 0.0 {
            break;
        }
    }

    // Repayments scheduled past the last simulated year can never be applied
    let last_year = result.payoff_year().unwrap_or(0);
    for (&year, &amount) in &terms.repayments {
        if year > last_year {
            unused_repayment += amount;
        }
    }

    result.total_paid = round2(total_paid);
    result.unused_repayment = round2(unused_repayment);
    Ok(result)
}
