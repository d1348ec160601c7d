//! Error taxonomy for the projection engines
//!
//! `InvalidInput` covers every violated term invariant and is raised
//! eagerly, before any simulation work. `ConfigError` is the multi-loan
//! family: a bad loan identified by its position in the batch, plus
//! everything that can go wrong with the config file itself.

use std::path::PathBuf;

use thiserror::Error;

/// A loan or investment input that fails validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("interest rate must be between 0 and 1, got {0}")]
    InterestRateOutOfRange(f64),

    #[error("principal must be greater than 0, got {0}")]
    NonPositivePrincipal(f64),

    #[error("loan period must be greater than 0")]
    ZeroPeriod,

    #[error("repayment scheduled for year {year} must be a non-negative amount, got {amount}")]
    InvalidRepayment { year: u32, amount: f64 },

    #[error("repayment year index must be 1 or greater")]
    RepaymentYearZero,

    #[error("initial capital must be non-negative, got {0}")]
    NegativeCapital(f64),

    #[error("yearly tax must be between 0 and 1, got {0}")]
    TaxRateOutOfRange(f64),

    #[error("top-up target for year {year} must be a non-negative amount, got {target}")]
    InvalidTopUp { year: u32, target: f64 },

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// Failure while assembling or running a multi-loan batch
///
/// The aggregator aborts on the first bad loan; no partial aggregate is
/// ever returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A loan in the batch failed validation, identified by its position
    /// in the configuration list (0-based)
    #[error("loan {index}: {source}")]
    InvalidLoan { index: usize, source: InvalidInput },

    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("malformed loan config: {message}")]
    Malformed { message: String },

    #[error("unsupported config format {}: expected a .json or .csv file", .path.display())]
    UnsupportedFormat { path: PathBuf },
}
