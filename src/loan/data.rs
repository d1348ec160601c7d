//! Loan data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInput;

/// Terms of a single loan
///
/// Immutable input to the simulator. Validation is eager and happens
/// before any simulation work; no value is ever silently clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Annual interest rate as a fraction between 0 and 1
    pub interest_rate: f64,

    /// Original loan amount owed
    pub principal: f64,

    /// Loan period in years
    pub period_years: u32,

    /// Extra repayments keyed by loan year (year 1 is the first year)
    #[serde(default)]
    pub repayments: BTreeMap<u32, f64>,
}

impl LoanTerms {
    /// Terms with an empty repayment schedule
    pub fn new(interest_rate: f64, principal: f64, period_years: u32) -> Self {
        Self {
            interest_rate,
            principal,
            period_years,
            repayments: BTreeMap::new(),
        }
    }

    /// Same terms with the given repayment schedule
    pub fn with_repayments(mut self, repayments: BTreeMap<u32, f64>) -> Self {
        self.repayments = repayments;
        self
    }

    /// Fixed annual principal installment, constant across the loan's life
    /// (never recomputed from the shrinking balance)
    pub fn installment(&self) -> f64 {
        self.principal / self.period_years as f64
    }

    /// Check every term invariant, reporting the first violation
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if !self.interest_rate.is_finite() || !(0.0..=1.0).contains(&self.interest_rate) {
            return Err(InvalidInput::InterestRateOutOfRange(self.interest_rate));
        }
        if !self.principal.is_finite() {
            return Err(InvalidInput::NonFinite("principal"));
        }
        if self.principal <= 0.0 {
            return Err(InvalidInput::NonPositivePrincipal(self.principal));
        }
        if self.period_years == 0 {
            return Err(InvalidInput::ZeroPeriod);
        }
        for (&year, &amount) in &self.repayments {
            if year == 0 {
                return Err(InvalidInput::RepaymentYearZero);
            }
            if !amount.is_finite() || amount < 0.0 {
                return Err(InvalidInput::InvalidRepayment { year, amount });
            }
        }
        Ok(())
    }
}

/// One loan in a multi-loan batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanConfig {
    /// The loan's own terms
    pub terms: LoanTerms,

    /// Calendar year the loan's year 1 maps to
    pub start_year: i32,

    /// Replace this loan's paid total with its bare principal flow in the
    /// grand total (models pass-through refinancing)
    #[serde(default)]
    pub redirected: bool,
}

impl LoanConfig {
    pub fn new(terms: LoanTerms, start_year: i32) -> Self {
        Self {
            terms,
            start_year,
            redirected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_terms_pass_validation() {
        let terms = LoanTerms::new(0.05, 100_000.0, 10)
            .with_repayments([(3, 20_000.0)].into_iter().collect());
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn boundary_rates_are_valid() {
        assert!(LoanTerms::new(0.0, 1.0, 1).validate().is_ok());
        assert!(LoanTerms::new(1.0, 1.0, 1).validate().is_ok());
    }

    #[test]
    fn validation_reports_the_violated_invariant() {
        assert!(matches!(
            LoanTerms::new(-0.1, 100_000.0, 10).validate(),
            Err(InvalidInput::InterestRateOutOfRange(_))
        ));
        assert!(matches!(
            LoanTerms::new(1.1, 100_000.0, 10).validate(),
            Err(InvalidInput::InterestRateOutOfRange(_))
        ));
        assert!(matches!(
            LoanTerms::new(f64::NAN, 100_000.0, 10).validate(),
            Err(InvalidInput::InterestRateOutOfRange(_))
        ));
        assert!(matches!(
            LoanTerms::new(0.05, -100_000.0, 10).validate(),
            Err(InvalidInput::NonPositivePrincipal(_))
        ));
        assert!(matches!(
            LoanTerms::new(0.05, 0.0, 10).validate(),
            Err(InvalidInput::NonPositivePrincipal(_))
        ));
        assert!(matches!(
            LoanTerms::new(0.05, f64::NAN, 10).validate(),
            Err(InvalidInput::NonFinite("principal"))
        ));
        assert!(matches!(
            LoanTerms::new(0.05, 100_000.0, 0).validate(),
            Err(InvalidInput::ZeroPeriod)
        ));
    }

    #[test]
    fn bad_repayment_entries_are_rejected() {
        let negative = LoanTerms::new(0.05, 100_000.0, 10)
            .with_repayments([(3, -1.0)].into_iter().collect());
        assert!(matches!(
            negative.validate(),
            Err(InvalidInput::InvalidRepayment { year: 3, .. })
        ));

        let year_zero = LoanTerms::new(0.05, 100_000.0, 10)
            .with_repayments([(0, 1_000.0)].into_iter().collect());
        assert!(matches!(
            year_zero.validate(),
            Err(InvalidInput::RepaymentYearZero)
        ));
    }

    #[test]
    fn installment_is_principal_over_period() {
        let terms = LoanTerms::new(0.05, 120_000.0, 12);
        assert_eq!(terms.installment(), 10_000.0);
    }
}
