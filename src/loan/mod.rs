//! Loan terms, multi-loan configuration, and config file loading

mod data;
pub mod loader;

pub use data::{LoanConfig, LoanTerms};
