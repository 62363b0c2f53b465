//! Interactive prompts for the investment date and amount.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the user asked us to price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentRequest {
    pub date: NaiveDate,
    pub amount: f64,
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| AppError::InvalidDate(trimmed.to_string()))
}

pub fn parse_amount(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(AppError::InvalidAmount(trimmed.to_string())),
    }
}

/// Print `message` without a newline and read one line of reply.
fn prompt<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, message: &str) -> Result<String, AppError> {
    write!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line)
}

/// Ask for the date first, then the amount, mirroring the order a user expects.
pub fn read_request<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<InvestmentRequest, AppError> {
    let date = parse_date(&prompt(reader, writer, "Enter the date (YYYY-MM-DD): ")?)?;
    let amount = parse_amount(&prompt(reader, writer, "Enter the total investment amount: ")?)?;
    Ok(InvestmentRequest { date, amount })
}
