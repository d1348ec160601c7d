//! Load loan configurations from JSON or CSV files
//!
//! The file format is picked by extension. JSON is an array of loan
//! records; CSV encodes the repayment schedule as a `YEAR:AMOUNT;...`
//! cell. Records without a start year fall back to the caller-supplied
//! default (the CLI passes the current calendar year).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::{LoanConfig, LoanTerms};
use crate::errors::ConfigError;

/// Raw JSON record, flat so config files stay hand-editable
#[derive(Debug, Deserialize)]
struct JsonRecord {
    interest_rate: f64,
    principal: f64,
    period_years: u32,
    #[serde(default)]
    repayments: BTreeMap<u32, f64>,
    #[serde(default)]
    start_year: Option<i32>,
    #[serde(default)]
    redirected: bool,
}

impl JsonRecord {
    fn into_config(self, default_start_year: i32) -> LoanConfig {
        LoanConfig {
            terms: LoanTerms {
                interest_rate: self.interest_rate,
                principal: self.principal,
                period_years: self.period_years,
                repayments: self.repayments,
            },
            start_year: self.start_year.unwrap_or(default_start_year),
            redirected: self.redirected,
        }
    }
}

/// Raw CSV row; optional cells may be left empty
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "PeriodYears")]
    period_years: u32,
    #[serde(rename = "StartYear")]
    start_year: Option<i32>,
    #[serde(rename = "Redirected")]
    redirected: Option<bool>,
    #[serde(rename = "Repayments")]
    repayments: Option<String>,
}

impl CsvRow {
    fn into_config(self, default_start_year: i32) -> Result<LoanConfig, ConfigError> {
        let repayments = match self.repayments.as_deref() {
            None | Some("") => BTreeMap::new(),
            Some(cell) => parse_schedule(cell).map_err(|message| ConfigError::Malformed { message })?,
        };

        Ok(LoanConfig {
            terms: LoanTerms {
                interest_rate: self.interest_rate,
                principal: self.principal,
                period_years: self.period_years,
                repayments,
            },
            start_year: self.start_year.unwrap_or(default_start_year),
            redirected: self.redirected.unwrap_or(false),
        })
    }
}

/// Parse one `YEAR:AMOUNT` schedule entry
///
/// Also used by the CLI as the value parser for repeated `--repayment`
/// and `--top-up` flags.
pub fn parse_schedule_entry(entry: &str) -> Result<(u32, f64), String> {
    let (year, amount) = entry
        .split_once(':')
        .ok_or_else(|| format!("expected YEAR:AMOUNT, got {entry:?}"))?;
    let year = year
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid year in {entry:?}"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid amount in {entry:?}"))?;
    Ok((year, amount))
}

/// Parse a `YEAR:AMOUNT;YEAR:AMOUNT` schedule cell
pub fn parse_schedule(cell: &str) -> Result<BTreeMap<u32, f64>, String> {
    let mut schedule = BTreeMap::new();
    for entry in cell.split(';').filter(|entry| !entry.trim().is_empty()) {
        let (year, amount) = parse_schedule_entry(entry.trim())?;
        schedule.insert(year, amount);
    }
    Ok(schedule)
}

/// Load all loan configurations from a `.json` or `.csv` file
pub fn load_configs<P: AsRef<Path>>(
    path: P,
    default_start_year: i32,
) -> Result<Vec<LoanConfig>, ConfigError> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if !matches!(extension, "json" | "csv") {
        return Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let configs = match extension {
        "json" => load_json_from_reader(file, default_start_year)?,
        _ => load_csv_from_reader(file, default_start_year)?,
    };

    info!(
        "loaded {} loan configs from {}",
        configs.len(),
        path.display()
    );
    Ok(configs)
}

/// Load JSON loan configurations from any reader (e.g. string buffer)
pub fn load_json_from_reader<R: Read>(
    reader: R,
    default_start_year: i32,
) -> Result<Vec<LoanConfig>, ConfigError> {
    let records: Vec<JsonRecord> =
        serde_json::from_reader(reader).map_err(|err| ConfigError::Malformed {
            message: err.to_string(),
        })?;

    Ok(records
        .into_iter()
        .map(|record| record.into_config(default_start_year))
        .collect())
}

/// Load CSV loan configurations from any reader (e.g. string buffer)
pub fn load_csv_from_reader<R: Read>(
    reader: R,
    default_start_year: i32,
) -> Result<Vec<LoanConfig>, ConfigError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut configs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result.map_err(|err| ConfigError::Malformed {
            message: err.to_string(),
        })?;
        configs.push(row.into_config(default_start_year)?);
    }

    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_json_configs() {
        let json = r#"[
            {"interest_rate": 0.05, "principal": 100000, "period_years": 10,
             "repayments": {"3": 20000}, "start_year": 2024},
            {"interest_rate": 0.02, "principal": 50000, "period_years": 5,
             "redirected": true}
        ]"#;

        let configs = load_json_from_reader(json.as_bytes(), 2026).unwrap();
        assert_eq!(configs.len(), 2);

        assert_eq!(configs[0].start_year, 2024);
        assert_eq!(configs[0].terms.repayments[&3], 20_000.0);
        assert!(!configs[0].redirected);

        // Missing start_year falls back to the supplied default
        assert_eq!(configs[1].start_year, 2026);
        assert!(configs[1].terms.repayments.is_empty());
        assert!(configs[1].redirected);
    }

    #[test]
    fn loads_csv_configs() {
        let csv = "InterestRate,Principal,PeriodYears,StartYear,Redirected,Repayments\n\
                   0.05,100000,10,2024,true,3:20000;5:10000\n\
                   0.02,50000,5,,,\n";

        let configs = load_csv_from_reader(csv.as_bytes(), 2026).unwrap();
        assert_eq!(configs.len(), 2);

        assert_eq!(configs[0].start_year, 2024);
        assert!(configs[0].redirected);
        assert_eq!(configs[0].terms.repayments[&3], 20_000.0);
        assert_eq!(configs[0].terms.repayments[&5], 10_000.0);

        assert_eq!(configs[1].start_year, 2026);
        assert!(!configs[1].redirected);
        assert!(configs[1].terms.repayments.is_empty());
    }

    #[test]
    fn malformed_schedule_cell_is_reported() {
        let csv = "InterestRate,Principal,PeriodYears,StartYear,Redirected,Repayments\n\
                   0.05,100000,10,2024,false,3=20000\n";

        let err = load_csv_from_reader(csv.as_bytes(), 2026).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = load_json_from_reader("not json".as_bytes(), 2026).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected_before_io() {
        let err = load_configs("loans.toml", 2026).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn schedule_entry_parsing() {
        assert_eq!(parse_schedule_entry("3:20000").unwrap(), (3, 20_000.0));
        assert_eq!(parse_schedule_entry(" 3 : 20000 ").unwrap(), (3, 20_000.0));
        assert!(parse_schedule_entry("no-separator").is_err());
        assert!(parse_schedule_entry("x:20000").is_err());
        assert!(parse_schedule_entry("3:twenty").is_err());

        let schedule = parse_schedule("1:100;2:200").unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[&2], 200.0);
        assert!(parse_schedule("").unwrap().is_empty());
    }
}
