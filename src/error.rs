use thiserror::Error;

/// Errors that end the run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("portfolio file '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: &'static str },

    #[error("portfolio file '{path}' line {line}: invalid weightage '{value}'")]
    InvalidWeight { path: String, line: u64, value: String },

    #[error("portfolio file '{path}' line {line}: empty ticker")]
    EmptyTicker { path: String, line: u64 },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid investment amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("result needs column {0}, more than a worksheet holds")]
    TooManyColumns(usize),

    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

/// Why prices for one ticker could not be obtained. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("no trading data for the requested date")]
    NoData,

    #[error("malformed response: {0}")]
    Parse(String),
}
