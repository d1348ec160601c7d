//! Finance Planner CLI
//!
//! Command-line interface for loan amortization and investment projections

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use serde::Serialize;

use finance_planner::loan::loader::{self, parse_schedule_entry};
use finance_planner::{
    aggregate, investment, simulate, AggregateResult, InvestmentTerms, LoanTerms, SimulationResult,
};

/// Loan amortization and investment growth projections
#[derive(Parser)]
#[command(name = "finance_planner", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a single loan year by year
    Credit {
        /// Annual interest rate as a fraction between 0 and 1
        #[arg(long)]
        interest_rate: f64,

        /// Total loan amount
        #[arg(long)]
        principal: f64,

        /// Loan period in years
        #[arg(long)]
        period: u32,

        /// Extra repayment as YEAR:AMOUNT; may be repeated
        #[arg(long = "repayment", value_parser = parse_schedule_entry)]
        repayments: Vec<(u32, f64)>,

        /// Also write the year table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Aggregate a batch of loans onto a shared calendar-year axis
    Portfolio {
        /// Loan list as a .json or .csv file
        #[arg(long)]
        config: PathBuf,

        /// Also write the per-year table to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Project investment growth with top-ups and interest tax
    Investment {
        /// Initial investment capital
        #[arg(long)]
        initial: f64,

        /// Annual interest rate as a fraction between 0 and 1
        #[arg(long, default_value_t = 0.05)]
        rate: f64,

        /// Yearly tax applied to earned interest
        #[arg(long, default_value_t = 0.0)]
        tax: f64,

        /// Investment period in years
        #[arg(long)]
        period: u32,

        /// Target balance as YEAR:TARGET; may be repeated
        #[arg(long = "top-up", value_parser = parse_schedule_entry)]
        top_ups: Vec<(u32, f64)>,
    },
}

/// Row of the portfolio CSV export
#[derive(Serialize)]
struct PortfolioRow {
    calendar_year: i32,
    monthly_payment: f64,
    balance_at_year_start: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Credit {
            interest_rate,
            principal,
            period,
            repayments,
            csv,
        } => {
            let terms = LoanTerms::new(interest_rate, principal, period)
                .with_repayments(repayments.into_iter().collect());
            let result = simulate(&terms)?;

            print_loan_report(&result);
            if let Some(path) = csv {
                write_csv(&path, &result.years)?;
                println!("\nYear table written to {}", path.display());
            }
        }

        Command::Portfolio { config, csv } => {
            let current_year = chrono::Local::now().year();
            let configs = loader::load_configs(&config, current_year)?;
            let result = aggregate(&configs)?;

            print_portfolio_report(&result);
            if let Some(path) = csv {
                let rows: Vec<PortfolioRow> = result
                    .monthly_payments
                    .iter()
                    .map(|(&calendar_year, &monthly_payment)| PortfolioRow {
                        calendar_year,
                        monthly_payment,
                        balance_at_year_start: result
                            .balances
                            .get(&calendar_year)
                            .copied()
                            .unwrap_or(0.0),
                    })
                    .collect();
                write_csv(&path, &rows)?;
                println!("\nYear table written to {}", path.display());
            }
        }

        Command::Investment {
            initial,
            rate,
            tax,
            period,
            top_ups,
        } => {
            let terms = InvestmentTerms::new(initial, rate, tax, period)
                .with_top_ups(top_ups.into_iter().collect());
            let result = investment::project(&terms)?;

            println!("Total topped up: {:.2}", result.total_topped_up);
            println!("Interest accumulated: {:.2}", result.total_interest);
            println!("Final balance: {:.2}", result.final_balance);
        }
    }

    Ok(())
}

fn print_loan_report(result: &SimulationResult) {
    println!(
        "{:>4} {:>16} {:>22}",
        "Year", "Monthly Payment", "Balance at Start"
    );
    println!("{}", "-".repeat(44));
    for record in &result.years {
        println!(
            "{:>4} {:>16.2} {:>22.2}",
            record.year, record.monthly_payment, record.balance_at_year_start
        );
    }
    println!();
    println!("Total paid: {:.2}", result.total_paid);
    println!("Unused repayment: {:.2}", result.unused_repayment);
}

fn print_portfolio_report(result: &AggregateResult) {
    println!(
        "{:>6} {:>16} {:>22}",
        "Year", "Monthly Payment", "Balance at Start"
    );
    println!("{}", "-".repeat(46));
    for (year, payment) in &result.monthly_payments {
        let balance = result.balances.get(year).copied().unwrap_or(0.0);
        println!("{:>6} {:>16.2} {:>22.2}", year, payment, balance);
    }
    println!();
    println!("Total paid across all loans: {:.2}", result.total_paid);
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
