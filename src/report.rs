//! The one-row result table and its xlsx output.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use crate::allocation::Allocation;
use crate::error::AppError;
use crate::input::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub date: NaiveDate,
    allocations: Vec<Allocation>,
}

impl ResultRow {
    /// Merge per-ticker allocations. A repeated ticker keeps its first column
    /// position and takes the later values.
    pub fn from_allocations<I>(date: NaiveDate, allocations: I) -> Self
    where
        I: IntoIterator<Item = Allocation>,
    {
        let mut merged: Vec<Allocation> = Vec::new();
        for allocation in allocations {
            match merged.iter_mut().find(|a| a.ticker == allocation.ticker) {
                Some(existing) => *existing = allocation,
                None => merged.push(allocation),
            }
        }
        Self {
            date,
            allocations: merged,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(1 + 2 * self.allocations.len());
        columns.push("Date".to_string());
        for a in &self.allocations {
            columns.push(format!("{}_Shares_Open", a.ticker));
            columns.push(format!("{}_Shares_Close", a.ticker));
        }
        columns
    }

    /// Share values in column order, after the `Date` column.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.allocations
            .iter()
            .flat_map(|a| [a.shares_open, a.shares_close])
            .collect()
    }

    /// Value of a named column other than `Date`. Outer `None` means no such column.
    pub fn get(&self, column: &str) -> Option<Option<f64>> {
        self.columns()
            .iter()
            .skip(1)
            .position(|c| c == column)
            .map(|i| self.values()[i])
    }
}

pub fn output_file_name(date: NaiveDate) -> String {
    format!("investment_result_{}.xlsx", date.format(DATE_FORMAT))
}

fn column_number(index: usize) -> Result<u16, AppError> {
    u16::try_from(index).map_err(|_| AppError::TooManyColumns(index))
}

/// Write `row` under a header line to `<dir>/investment_result_<date>.xlsx`,
/// replacing any existing file. Missing values stay blank.
pub fn write_workbook(row: &ResultRow, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(output_file_name(row.date));

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in row.columns().iter().enumerate() {
        sheet.write_string(0, column_number(col)?, name.as_str())?;
    }

    sheet.write_string(1, 0, row.date.format(DATE_FORMAT).to_string())?;
    for (i, value) in row.values().into_iter().enumerate() {
        if let Some(v) = value {
            sheet.write_number(1, column_number(i + 1)?, v)?;
        }
    }

    workbook.save(&path)?;
    Ok(path)
}
