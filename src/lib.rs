//! Share counts for a weighted portfolio on a single trading day.

pub mod allocation;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod portfolio;
pub mod report;
pub mod stocks;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::allocation::allocate;
use crate::config::Config;
use crate::error::AppError;
use crate::input::InvestmentRequest;
use crate::portfolio::load_portfolio;
use crate::report::{write_workbook, ResultRow};
use crate::stocks::{normalize_ticker, PriceSource};

/// Load the portfolio, price every ticker in turn and write the workbook.
///
/// Fetch failures only blank that ticker's columns; the file is written as
/// long as the portfolio loads and the workbook can be saved.
pub async fn run<P>(config: &Config, request: &InvestmentRequest, source: &P) -> Result<PathBuf, AppError>
where
    P: PriceSource + ?Sized,
{
    let entries = load_portfolio(&config.portfolio_file)?;

    let mut allocations = Vec::with_capacity(entries.len());
    let mut failed = 0;
    for entry in &entries {
        let symbol = normalize_ticker(&entry.ticker);
        let outcome = source.fetch_day(&symbol, request.date).await;
        if let Err(e) = &outcome {
            warn!("[API] Error downloading data for {} ({}): {}", entry.ticker, symbol, e);
            failed += 1;
        }
        allocations.push(allocate(entry, request.amount, &outcome));
    }
    info!(
        "[API] Fetch complete: {} success, {} failed",
        entries.len() - failed,
        failed
    );

    let row = ResultRow::from_allocations(request.date, allocations);
    let path = write_workbook(&row, &config.output_dir)?;
    info!("[RESULT] Wrote {} columns to {}", row.columns().len(), path.display());

    Ok(path)
}
