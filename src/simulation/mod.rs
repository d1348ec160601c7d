//! Single-loan amortization simulation

mod engine;
mod schedule;

pub use engine::simulate;
pub use schedule::{SimulationResult, YearRecord};

pub(crate) use schedule::round2;
