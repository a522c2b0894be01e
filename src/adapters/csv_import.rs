//! CSV import adapter for historical-quote exports.
//!
//! Expected layout: one header row, then
//! `date,open,high,low,close,adjusted_close,volume` rows. Only date, close,
//! and volume are consumed. Any bad row fails the whole import so a partial
//! file never reaches the portfolio.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::daily_data::DailyData;
use crate::domain::error::StockmanError;

const COL_DATE: usize = 0;
const COL_CLOSE: usize = 4;
const COL_VOLUME: usize = 6;

/// Parse a quote-history CSV into validated observations. Imported rows
/// carry no entry timestamp.
pub fn read_history(path: &Path) -> Result<Vec<DailyData>, StockmanError> {
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| StockmanError::Import {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut entries = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // Header is row 1; records start at row 2.
        let row = i + 2;
        let record = result.map_err(|e| StockmanError::Import {
            file: file.clone(),
            reason: format!("row {row}: {e}"),
        })?;

        let date_str = record.get(COL_DATE).ok_or_else(|| StockmanError::Import {
            file: file.clone(),
            reason: format!("row {row}: missing date column"),
        })?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            StockmanError::Import {
                file: file.clone(),
                reason: format!("row {row}: invalid date {date_str:?}: {e}"),
            }
        })?;

        let close = parse_column(&record, COL_CLOSE, "close", &file, row)?;
        let volume = parse_column(&record, COL_VOLUME, "volume", &file, row)?;

        let entry = DailyData::new(date, close, volume).map_err(|e| StockmanError::Import {
            file: file.clone(),
            reason: format!("row {row}: {e}"),
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

fn parse_column(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    file: &str,
    row: usize,
) -> Result<f64, StockmanError> {
    record
        .get(index)
        .ok_or_else(|| StockmanError::Import {
            file: file.to_string(),
            reason: format!("row {row}: missing {column} column"),
        })?
        .trim()
        .parse()
        .map_err(|e| StockmanError::Import {
            file: file.to_string(),
            reason: format!("row {row}: invalid {column} value: {e}"),
        })
}
