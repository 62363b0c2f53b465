//! Portfolio table loading.
//!
//! The table is a CSV file with at least a `Ticker` and a `Weightage`
//! column. Header names are trimmed before lookup and any other column is
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::AppError;

const TICKER_COLUMN: &str = "Ticker";
const WEIGHT_COLUMN: &str = "Weightage";

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    pub ticker: String,
    /// Fraction of the total amount. Not required to sum to 1 across entries.
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
struct PortfolioRow {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Weightage")]
    weightage: String,
}

pub fn load_portfolio(path: &Path) -> Result<Vec<PortfolioEntry>, AppError> {
    let file = File::open(path)?;
    let entries = read_portfolio(file, &path.display().to_string())?;

    info!("[PORTFOLIO] Loaded {} entries from {}", entries.len(), path.display());
    for entry in &entries {
        debug!("[PORTFOLIO] {} weight={}", entry.ticker, entry.weight);
    }
    let symbols: Vec<&str> = entries.iter().map(|e| e.ticker.as_str()).collect();
    info!("[PORTFOLIO] Stock symbols: {:?}", symbols);

    Ok(entries)
}

/// Parse a portfolio table from any reader. `source` only labels errors.
pub fn read_portfolio<R: Read>(reader: R, source: &str) -> Result<Vec<PortfolioEntry>, AppError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in [TICKER_COLUMN, WEIGHT_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::MissingColumn {
                path: source.to_string(),
                column,
            });
        }
    }

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: PortfolioRow = record.deserialize(Some(&headers))?;

        let ticker = row.ticker.trim();
        if ticker.is_empty() {
            return Err(AppError::EmptyTicker {
                path: source.to_string(),
                line,
            });
        }

        let raw_weight = row.weightage.trim();
        let weight = match raw_weight.parse::<f64>() {
            Ok(w) if w.is_finite() => w,
            _ => {
                return Err(AppError::InvalidWeight {
                    path: source.to_string(),
                    line,
                    value: raw_weight.to_string(),
                })
            }
        };

        entries.push(PortfolioEntry {
            ticker: ticker.to_string(),
            weight,
        });
    }

    Ok(entries)
}
