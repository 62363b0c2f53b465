use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PORTFOLIO_FILE: &str = "stocks.csv";
pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings. Every field has a default, so an empty environment
/// behaves like the plain interactive tool.
#[derive(Debug, Clone)]
pub struct Config {
    pub portfolio_file: PathBuf,
    pub output_dir: PathBuf,
    pub chart_url: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portfolio_file: PathBuf::from(DEFAULT_PORTFOLIO_FILE),
            output_dir: PathBuf::from("."),
            chart_url: DEFAULT_CHART_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("FETCH_TIMEOUT_SECS must be whole seconds, got '{}'", raw))
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            portfolio_file: lookup("PORTFOLIO_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.portfolio_file),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            chart_url: lookup("YAHOO_CHART_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.chart_url),
            request_timeout,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }
}
